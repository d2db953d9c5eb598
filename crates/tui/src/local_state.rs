use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::Result;

const DEFAULT_STATE_PATH: &str = "config/carteira_state.json";

pub const ZOOM_STEP: f64 = 0.1;
pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 1.5;

/// Accessibility preferences, persisted under stable keys.
///
/// Read once at startup and written back after every change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(rename = "appFontSizeMultiplier")]
    pub font_size_multiplier: f64,
    #[serde(rename = "isLowVisionModeActive")]
    pub low_vision: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            font_size_multiplier: MIN_ZOOM,
            low_vision: false,
        }
    }
}

impl Preferences {
    pub fn load(path: &str) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let parent = Path::new(path).parent();
        if let Some(parent) = parent {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(self)?;
        fs::write(path, payload)?;
        Ok(())
    }

    /// Returns `true` when the multiplier changed.
    pub fn zoom_in(&mut self) -> bool {
        if self.font_size_multiplier < MAX_ZOOM {
            self.font_size_multiplier = round_tenth(self.font_size_multiplier + ZOOM_STEP);
            return true;
        }
        false
    }

    /// Returns `true` when the multiplier changed.
    pub fn zoom_out(&mut self) -> bool {
        if self.font_size_multiplier > MIN_ZOOM {
            self.font_size_multiplier = round_tenth(self.font_size_multiplier - ZOOM_STEP);
            return true;
        }
        false
    }

    pub fn toggle_low_vision(&mut self) {
        self.low_vision = !self.low_vision;
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn default_state_path() -> &'static str {
    DEFAULT_STATE_PATH
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("carteira_{}_{name}", std::process::id()))
            .join("state.json")
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn missing_file_yields_defaults() {
        let prefs = Preferences::load(&temp_path("missing")).unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[test]
    fn save_then_load_keeps_stable_keys() {
        let path = temp_path("roundtrip");
        let prefs = Preferences {
            font_size_multiplier: 1.3,
            low_vision: true,
        };

        prefs.save(&path).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        let loaded = Preferences::load(&path).unwrap();

        assert!(raw.contains("\"appFontSizeMultiplier\""));
        assert!(raw.contains("\"isLowVisionModeActive\""));
        assert_eq!(loaded, prefs);
        fs::remove_dir_all(Path::new(&path).parent().unwrap()).unwrap();
    }

    #[test]
    fn partial_file_fills_missing_keys() {
        let prefs: Preferences = serde_json::from_str(r#"{"isLowVisionModeActive":true}"#).unwrap();
        assert!(prefs.low_vision);
        assert_eq!(prefs.font_size_multiplier, 1.0);
    }

    #[test]
    fn zoom_is_clamped_and_rounded() {
        let mut prefs = Preferences::default();

        assert!(!prefs.zoom_out());
        for _ in 0..5 {
            assert!(prefs.zoom_in());
        }
        assert_eq!(prefs.font_size_multiplier, 1.5);
        assert!(!prefs.zoom_in());

        assert!(prefs.zoom_out());
        assert_eq!(prefs.font_size_multiplier, 1.4);
    }

    #[test]
    fn low_vision_toggles() {
        let mut prefs = Preferences::default();
        prefs.toggle_low_vision();
        assert!(prefs.low_vision);
        prefs.toggle_low_vision();
        assert!(!prefs.low_vision);
    }
}
