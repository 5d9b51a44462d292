//! Runtime settings
//!
//! Read once at startup from JSON (a `data-settings` attribute on the canvas in
//! the browser, the `PULSE_DODGE_SETTINGS` environment variable natively).
//! Missing keys fall back to defaults. Gameplay tuning is not configurable.

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::error::ConfigError;
use crate::sim::Field;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playing field size in CSS pixels
    pub field_width: f32,
    pub field_height: f32,
    /// Fixed RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,

    // === HUD ===
    /// Draw the shot/pulse cooldown dials
    pub show_cooldowns: bool,
    /// Draw the running score
    pub show_score: bool,
    /// Draw the aim reticle at the pointer
    pub show_reticle: bool,

    // === Accessibility ===
    /// High contrast palette
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            seed: None,

            show_cooldowns: true,
            show_score: true,
            show_reticle: true,

            high_contrast: false,
        }
    }
}

impl Settings {
    /// Environment variable consulted by the native build
    pub const ENV_VAR: &'static str = "PULSE_DODGE_SETTINGS";

    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.field()?;
        Ok(settings)
    }

    /// Settings from an optional JSON source, falling back to defaults with a warning
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(Self::from_json) {
            Some(Ok(settings)) => {
                log::info!("Loaded settings");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Ignoring settings: {e}");
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Validated playing field
    pub fn field(&self) -> Result<Field, ConfigError> {
        Field::new(self.field_width, self.field_height)
    }

    /// Settings from the environment (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let json = std::env::var(Self::ENV_VAR).ok();
        Self::from_json_or_default(json.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_use_defaults() {
        let settings = Settings::from_json(r#"{ "high_contrast": true }"#).unwrap();
        assert!(settings.high_contrast);
        assert_eq!(settings.field_width, FIELD_WIDTH);
        assert!(settings.show_cooldowns);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn seed_and_field_parse() {
        let settings =
            Settings::from_json(r#"{ "field_width": 1024, "field_height": 768, "seed": 42 }"#)
                .unwrap();
        assert_eq!(settings.seed, Some(42));
        let field = settings.field().unwrap();
        assert_eq!((field.width, field.height), (1024.0, 768.0));
    }

    #[test]
    fn undersized_field_is_rejected() {
        let err = Settings::from_json(r#"{ "field_width": 10 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::FieldTooSmall { .. }));
    }

    #[test]
    fn field_without_spawn_room_is_rejected() {
        let err = Settings::from_json(r#"{ "field_width": 142, "field_height": 142 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::SafeRadiusUnreachable { .. }));
        assert_eq!(
            Settings::from_json_or_default(Some(r#"{ "field_width": 142, "field_height": 142 }"#)),
            Settings::default()
        );
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn bad_source_falls_back_to_defaults() {
        assert_eq!(
            Settings::from_json_or_default(Some("[]")),
            Settings::default()
        );
        assert_eq!(Settings::from_json_or_default(None), Settings::default());
    }
}
