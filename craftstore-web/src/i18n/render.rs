use crate::i18n::bundle::with_bundle;
use serde_json::Value;
use std::collections::BTreeMap;

fn get_nested_value<'a>(obj: &'a Value, key: &str) -> Option<&'a Value> {
    key.split('.').try_fold(obj, |current, k| current.get(k))
}

/// CLDR plural category for whole counts in the supported locales.
fn plural_category(lang: &str, count: u64) -> &'static str {
    if lang == "ru" {
        let (tens, ones) = (count % 100, count % 10);
        if ones == 1 && tens != 11 {
            "one"
        } else if (2..=4).contains(&ones) && !(12..=14).contains(&tens) {
            "few"
        } else {
            "many"
        }
    } else if count == 1 {
        "one"
    } else {
        "other"
    }
}

fn render_value(value: &Value, lang: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    let mut text = match value {
        Value::String(s) => s.clone(),
        Value::Object(map) => {
            let category = args
                .and_then(|m| m.get("count"))
                .and_then(|count| count.parse::<u64>().ok())
                .map(|count| plural_category(lang, count));
            category
                .and_then(|c| map.get(c))
                .or_else(|| map.get("other"))
                .or_else(|| map.get("_"))
                .and_then(Value::as_str)?
                .to_string()
        }
        _ => return None,
    };

    if let Some(args_map) = args {
        for (k, v) in args_map {
            text = text.replace(&format!("{{{k}}}"), v);
        }
    }
    Some(text)
}

fn resolve(key: &str, args: Option<&BTreeMap<&str, &str>>) -> Option<String> {
    with_bundle(|bundle| {
        get_nested_value(&bundle.translations, key)
            .and_then(|v| render_value(v, &bundle.lang, args))
            .or_else(|| {
                get_nested_value(&bundle.fallback, key)
                    .and_then(|v| render_value(v, &bundle.lang, args))
            })
    })
}

/// Translate a key to the current language
///
/// Falls back to English, then to the key itself.
#[must_use]
pub fn t(key: &str) -> String {
    tr(key, None)
}

/// Translate a key with `{name}` placeholders filled from `args`.
#[must_use]
pub fn tr(key: &str, args: Option<&BTreeMap<&str, &str>>) -> String {
    resolve(key, args).unwrap_or_else(|| key.to_string())
}

/// Shorthand for [`tr`] with inline pairs.
#[must_use]
pub fn tf(key: &str, pairs: &[(&str, &str)]) -> String {
    let args: BTreeMap<&str, &str> = pairs.iter().copied().collect();
    tr(key, Some(&args))
}
