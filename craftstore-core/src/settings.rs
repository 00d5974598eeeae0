//! Site-wide branding settings
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

static HEX_COLOR: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").ok());

pub const DEFAULT_PRIMARY_COLOR: &str = "#4ade80";

/// The single mutable record controlling storefront branding and text.
///
/// The API stores settings as a flat key/value map, so every field falls
/// back to its default when the key is absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettings {
    pub server_name: String,
    #[serde(rename = "serverIp")]
    pub server_address: String,
    pub welcome_text: String,
    pub primary_color: String,
}

/// Stored map as read back. The backend upserts any key it receives, so
/// `serverIp` and `serverAddress` can both be present; `serverIp` wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSettings {
    server_name: Option<String>,
    server_ip: Option<String>,
    server_address: Option<String>,
    welcome_text: Option<String>,
    primary_color: Option<String>,
}

impl From<StoredSettings> for SiteSettings {
    fn from(stored: StoredSettings) -> Self {
        let defaults = Self::default();
        Self {
            server_name: stored.server_name.unwrap_or(defaults.server_name),
            server_address: stored
                .server_ip
                .or(stored.server_address)
                .unwrap_or(defaults.server_address),
            welcome_text: stored.welcome_text.unwrap_or(defaults.welcome_text),
            primary_color: stored.primary_color.unwrap_or(defaults.primary_color),
        }
    }
}

impl<'de> Deserialize<'de> for SiteSettings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        StoredSettings::deserialize(deserializer).map(Self::from)
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            server_name: "CraftStore".to_string(),
            server_address: "play.craftstore.ru".to_string(),
            welcome_text: "Добро пожаловать в лучший Minecraft-магазин!".to_string(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("server name is empty")]
    EmptyServerName,
    #[error("invalid colour {0}, expected #rrggbb")]
    InvalidColor(String),
}

impl SettingsError {
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::EmptyServerName => "admin.settings.errors.name",
            Self::InvalidColor(_) => "admin.settings.errors.color",
        }
    }
}

/// `true` for `#rrggbb` colours.
#[must_use]
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.as_ref().is_some_and(|re| re.is_match(value))
}

impl SiteSettings {
    /// # Errors
    ///
    /// Returns an error when the server name is blank or the colour is not `#rrggbb`.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server_name.trim().is_empty() {
            return Err(SettingsError::EmptyServerName);
        }
        if !is_hex_color(&self.primary_color) {
            return Err(SettingsError::InvalidColor(self.primary_color.clone()));
        }
        Ok(())
    }

    /// Colour to theme with, ignoring a malformed stored value.
    #[must_use]
    pub fn theme_color(&self) -> &str {
        if is_hex_color(&self.primary_color) {
            &self.primary_color
        } else {
            DEFAULT_PRIMARY_COLOR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_key_value_map_with_defaults() {
        let parsed: SiteSettings =
            serde_json::from_str(r##"{"serverName":"Mine","primaryColor":"#112233"}"##).unwrap();
        assert_eq!(parsed.server_name, "Mine");
        assert_eq!(parsed.primary_color, "#112233");
        assert_eq!(parsed.server_address, "play.craftstore.ru");
    }

    #[test]
    fn accepts_server_address_alias() {
        let parsed: SiteSettings =
            serde_json::from_str(r#"{"serverAddress":"mc.example.org"}"#).unwrap();
        assert_eq!(parsed.server_address, "mc.example.org");
        let out = serde_json::to_value(&parsed).unwrap();
        assert_eq!(out["serverIp"], "mc.example.org");
    }

    #[test]
    fn server_ip_wins_when_both_keys_are_stored() {
        let parsed: SiteSettings = serde_json::from_str(
            r##"{"serverName":"Mine","serverIp":"a.example","serverAddress":"b.example","primaryColor":"#112233"}"##,
        )
        .unwrap();
        assert_eq!(parsed.server_name, "Mine");
        assert_eq!(parsed.server_address, "a.example");
        assert_eq!(parsed.primary_color, "#112233");
        assert_eq!(parsed.welcome_text, SiteSettings::default().welcome_text);
    }

    #[test]
    fn validates_color_format() {
        assert!(is_hex_color("#112233"));
        assert!(is_hex_color("#ABCdef"));
        assert!(!is_hex_color("112233"));
        assert!(!is_hex_color("#1122"));
        assert!(!is_hex_color("red"));

        let bad = SiteSettings {
            primary_color: "blue".to_string(),
            ..SiteSettings::default()
        };
        assert_eq!(
            bad.validate(),
            Err(SettingsError::InvalidColor("blue".to_string()))
        );
        assert_eq!(bad.theme_color(), DEFAULT_PRIMARY_COLOR);
    }

    #[test]
    fn rejects_blank_server_name() {
        let bad = SiteSettings {
            server_name: "  ".to_string(),
            ..SiteSettings::default()
        };
        assert_eq!(bad.validate(), Err(SettingsError::EmptyServerName));
        assert!(SiteSettings::default().validate().is_ok());
    }
}
