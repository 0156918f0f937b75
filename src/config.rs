use log::Level;
use serde::Deserialize;
use web_sys::Document;

use crate::error::BehaviorError;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Id of the optional `<script type="application/json">` block that overrides
/// the defaults below.
pub const SETTINGS_ELEMENT_ID: &str = "behavior-settings";

/// Tunables for every page behavior. Anything missing from the embedded JSON
/// keeps its default.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Fraction of a card that must be visible before it is revealed.
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    /// Seconds of transition delay added per platform card index.
    pub platform_stagger_secs: f64,
    /// Seconds of transition delay added per step card index.
    pub step_stagger_secs: f64,
    pub min_hourly_rate: f64,
    pub max_hourly_rate: f64,
    pub weeks_per_month: f64,
    pub newsletter_delay_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            platform_stagger_secs: 0.1,
            step_stagger_secs: 0.15,
            min_hourly_rate: 4.0,
            max_hourly_rate: 12.0,
            weeks_per_month: 4.33,
            newsletter_delay_ms: 1500,
        }
    }
}

impl Settings {
    pub fn from_json(raw: &str) -> Result<Self, BehaviorError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads overrides embedded in the page, falling back to defaults when the
    /// block is absent or malformed.
    pub fn load(document: &Document) -> Self {
        let raw = match document
            .get_element_by_id(SETTINGS_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::default(),
        };

        match Self::from_json(&raw) {
            Ok(settings) => {
                log::debug!("Loaded behavior settings: {:?}", settings);
                settings
            }
            Err(e) => {
                log::warn!("Ignoring embedded behavior settings: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_behavior() {
        let settings = Settings::default();
        assert_eq!(settings.newsletter_delay_ms, 1500);
        assert_eq!(settings.weeks_per_month, 4.33);
        assert_eq!(settings.min_hourly_rate, 4.0);
        assert_eq!(settings.max_hourly_rate, 12.0);
        assert_eq!(settings.reveal_threshold, 0.1);
        assert_eq!(settings.reveal_root_margin, "0px 0px -50px 0px");
        assert_eq!(settings.platform_stagger_secs, 0.1);
        assert_eq!(settings.step_stagger_secs, 0.15);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"newsletter_delay_ms": 200}"#).unwrap();
        assert_eq!(settings.newsletter_delay_ms, 200);
        assert_eq!(settings.weeks_per_month, 4.33);
        assert_eq!(settings.reveal_root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Settings::from_json("{}").unwrap(), Settings::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, BehaviorError::Settings(_)));
    }
}
