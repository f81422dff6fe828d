//! User settings.
//!
//! Settings are read from JSON, either as a flat object or from a host settings file where
//! they live under the `inlineMath` prefix:
//!
//! ```json
//! { "inlineMath": { "messageTemplate": "$source = $result" } }
//! { "inlineMath.messageTemplate": "$source = $result", "editor.fontSize": 14 }
//! ```
//!
//! Missing keys fall back to their defaults.

use inline_math::CacheConfig;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Prefix of every setting in a host settings file.
pub const SETTINGS_PREFIX: &str = "inlineMath";

/// Errors produced while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid settings JSON: {0}")]
    /// The input was not valid JSON or did not match the settings schema.
    Json(#[from] serde_json::Error),

    #[error("settings must be a JSON object, got {0}")]
    /// The top-level JSON value was not an object.
    NotAnObject(&'static str),
}

/// Cache capacities as exposed in settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CacheSettings {
    /// Whole-line results kept.
    pub whole_text_capacity: usize,
    /// Per-expression outcomes kept.
    pub subsequence_capacity: usize,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self::from(CacheConfig::default())
    }
}

impl From<CacheConfig> for CacheSettings {
    fn from(config: CacheConfig) -> Self {
        Self {
            whole_text_capacity: config.whole_text_capacity,
            subsequence_capacity: config.subsequence_capacity,
        }
    }
}

impl From<CacheSettings> for CacheConfig {
    fn from(settings: CacheSettings) -> Self {
        Self {
            whole_text_capacity: settings.whole_text_capacity,
            subsequence_capacity: settings.subsequence_capacity,
        }
    }
}

/// Inline math settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InlineMathConfig {
    /// Whether results are shown at all.
    pub enabled: bool,
    /// Message template; interpolates `$result` and `$source`.
    pub message_template: String,
    /// Maximum characters of the interpolated source; `0` hides messages.
    pub message_max_chars: usize,
    /// Whether decorations carry a hover tooltip.
    pub hover_message: bool,
    /// Cache capacities.
    pub cache: CacheSettings,
}

impl Default for InlineMathConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            message_template: "= $result".to_string(),
            message_max_chars: 50,
            hover_message: true,
            cache: CacheSettings::default(),
        }
    }
}

impl InlineMathConfig {
    /// Parse settings from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Parse settings from an already decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        let mut object = match value {
            Value::Object(object) => object,
            other => return Err(ConfigError::NotAnObject(json_kind(&other))),
        };

        if let Some(section) = object.remove(SETTINGS_PREFIX) {
            return Ok(serde_json::from_value(section)?);
        }

        let dotted = format!("{SETTINGS_PREFIX}.");
        let prefixed: Map<String, Value> = object
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(&dotted)
                    .map(|name| (name.to_string(), value.clone()))
            })
            .collect();

        let settings = if prefixed.is_empty() {
            object
        } else {
            prefixed
        };
        Ok(serde_json::from_value(Value::Object(settings))?)
    }

    /// Serialize as a flat JSON object.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = InlineMathConfig::default();
        assert!(config.enabled);
        assert_eq!(config.message_template, "= $result");
        assert_eq!(config.message_max_chars, 50);
        assert_eq!(config.cache.whole_text_capacity, 500);
        assert_eq!(config.cache.subsequence_capacity, 600);
    }

    #[test]
    fn test_flat_object_with_missing_keys() {
        let config = InlineMathConfig::from_json(r#"{ "enabled": false }"#).unwrap();
        assert_eq!(
            config,
            InlineMathConfig {
                enabled: false,
                ..InlineMathConfig::default()
            }
        );
    }

    #[test]
    fn test_section_object() {
        let json = r#"{
            "editor.fontSize": 14,
            "inlineMath": { "messageTemplate": "$source = $result", "cache": { "wholeTextCapacity": 10 } }
        }"#;
        let config = InlineMathConfig::from_json(json).unwrap();
        assert_eq!(config.message_template, "$source = $result");
        assert_eq!(config.cache.whole_text_capacity, 10);
        assert_eq!(config.cache.subsequence_capacity, 600);
    }

    #[test]
    fn test_dotted_keys() {
        let json = r#"{
            "editor.fontSize": 14,
            "inlineMath.messageMaxChars": 0,
            "inlineMath.hoverMessage": false
        }"#;
        let config = InlineMathConfig::from_json(json).unwrap();
        assert_eq!(config.message_max_chars, 0);
        assert!(!config.hover_message);
        assert!(config.enabled);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            InlineMathConfig::from_json("[1, 2]"),
            Err(ConfigError::NotAnObject("an array"))
        ));
        assert!(matches!(
            InlineMathConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            InlineMathConfig::from_json(r#"{ "messageMaxChars": "many" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = InlineMathConfig {
            message_template: "→ $result".to_string(),
            ..InlineMathConfig::default()
        };
        let json = config.to_json().unwrap();
        assert!(json.contains("\"messageTemplate\""));
        assert_eq!(InlineMathConfig::from_json(&json).unwrap(), config);
    }
}
