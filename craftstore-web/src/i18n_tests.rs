//! i18n coverage tests to ensure all required keys are present

use crate::shop::{AdminTab, AuthError, PromoDraftError, Rarity, SettingsError};
use serde_json::Value;
use std::collections::BTreeSet;

const PLURAL_FORMS: &[&str] = &["zero", "one", "two", "few", "many", "other", "_"];

fn locale_codes() -> Vec<String> {
    let mut locales = Vec::new();
    let entries = std::fs::read_dir("i18n").expect("i18n directory should exist");
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().is_some_and(|ext| ext == "json")
            && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
        {
            locales.push(stem.to_string());
        }
    }
    locales.sort();
    locales
}

fn load_locale(locale: &str) -> (String, Value) {
    let path = format!("i18n/{locale}.json");
    let content =
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("Failed to read {path}"));
    let json: Value =
        serde_json::from_str(&content).unwrap_or_else(|_| panic!("Failed to parse JSON in {path}"));
    (content, json)
}

fn find_nested_key(json: &Value, key: &str) -> bool {
    key.split('.')
        .try_fold(json, |current, part| current.get(part))
        .is_some_and(|v| v.is_string() || is_plural(v))
}

fn is_plural(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| !map.is_empty() && map.keys().all(|k| PLURAL_FORMS.contains(&k.as_str())))
}

/// Leaf keys; plural tables count as one leaf since their forms differ per language.
fn collect_keys(prefix: &str, value: &Value, out: &mut BTreeSet<String>) {
    if let Value::Object(map) = value {
        for (k, v) in map {
            let next_prefix = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            if v.is_object() && !is_plural(v) {
                collect_keys(&next_prefix, v, out);
            } else {
                out.insert(next_prefix);
            }
        }
    }
}

#[test]
fn locales_have_matching_keys() {
    let locales = locale_codes();
    assert!(locales.contains(&"ru".to_string()));
    let (_, base_json) = load_locale("en");
    let mut base_keys = BTreeSet::new();
    collect_keys("", &base_json, &mut base_keys);

    for locale in locales {
        let (_, json) = load_locale(&locale);
        let mut keys = BTreeSet::new();
        collect_keys("", &json, &mut keys);
        assert_eq!(keys, base_keys, "key sets differ in locale '{locale}'");
    }
}

#[test]
fn error_and_label_keys_exist() {
    let mut required: Vec<&str> = vec![
        AuthError::EmptyName.message_key(),
        AuthError::EmptyUsername.message_key(),
        AuthError::UsernameTooShort.message_key(),
        AuthError::EmptyPassword.message_key(),
        AuthError::PasswordTooShort.message_key(),
        AuthError::PasswordMismatch.message_key(),
        PromoDraftError::EmptyCode.message_key(),
        PromoDraftError::Duplicate(String::new()).message_key(),
        PromoDraftError::OutOfRange { min: 0, max: 100 }.message_key(),
        SettingsError::EmptyServerName.message_key(),
        SettingsError::InvalidColor(String::new()).message_key(),
        "admin.errors.request",
        "admin.errors.load",
        "admin.promos.usages",
    ];
    required.extend(
        [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary].map(Rarity::label_key),
    );
    required.extend(AdminTab::ALL.map(AdminTab::label_key));

    for locale in locale_codes() {
        let (_, json) = load_locale(&locale);
        for key in &required {
            assert!(
                find_nested_key(&json, key),
                "Missing key '{key}' in locale '{locale}'"
            );
        }
    }
}

#[test]
fn locales_have_balanced_templates() {
    for locale in locale_codes() {
        let (content, _json) = load_locale(&locale);
        let open_count = content.matches('{').count();
        let close_count = content.matches('}').count();
        assert_eq!(
            open_count, close_count,
            "Unmatched braces in {locale}: {open_count} open, {close_count} close"
        );
        assert!(
            !content.contains("{{"),
            "Found doubled placeholder brace in {locale}"
        );
    }
}
