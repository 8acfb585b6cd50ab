// Application settings
// Loaded from ~/.config/finanzas/settings.json

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Backend API base URL
    #[serde(rename = "api.base")]
    pub api_base: String,

    /// Currency symbol for formatted output
    #[serde(rename = "display.currencySymbol")]
    pub currency_symbol: String,

    /// Amount tolerance for the matcher, in currency units
    #[serde(rename = "recon.amountTolerance")]
    pub amount_tolerance: f64,

    /// Date window for the matcher, in days
    #[serde(rename = "recon.dateWindowDays")]
    pub date_window_days: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: "http://localhost:8000".into(),
            currency_symbol: "S/".into(),
            amount_tolerance: 0.01,
            date_window_days: 3,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("finanzas");
        config_dir.join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub(crate) fn load_from(path: &PathBuf) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    eprintln!("Error parsing settings.json: {}", e);
                    eprintln!("Using default settings");
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Error reading settings.json: {}", e);
                Self::default()
            }
        }
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub(crate) fn save_to(&self, path: &PathBuf) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.currency_symbol, "S/");
        assert_eq!(s.amount_tolerance, 0.01);
        assert_eq!(s.date_window_days, 3);
    }

    #[test]
    fn roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let mut s = Settings::default();
        s.api_base = "https://erp.example".into();
        s.date_window_days = 5;
        s.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.api_base, "https://erp.example");
        assert_eq!(loaded.date_window_days, 5);
    }

    #[test]
    fn missing_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.api_base, Settings::default().api_base);
    }

    #[test]
    fn corrupt_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        let loaded = Settings::load_from(&path);
        assert_eq!(loaded.currency_symbol, "S/");
    }

    #[test]
    fn uses_display_key_names() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("recon.amountTolerance"));
        assert!(json.contains("display.currencySymbol"));
    }
}
