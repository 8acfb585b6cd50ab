use serde::Deserialize;

use crate::error::ReconError;

/// Matching tolerances.
///
/// Defaults reproduce the production behavior: amounts must differ by
/// strictly less than one cent, dates by at most three days.
#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    /// Amount gate, in currency units. The comparison is strict `<`:
    /// a difference of exactly this value does NOT match.
    #[serde(default = "default_amount")]
    pub amount: f64,
    /// Date gate, inclusive, in whole days.
    #[serde(default = "default_window")]
    pub date_window_days: i64,
}

fn default_amount() -> f64 {
    0.01
}

fn default_window() -> i64 {
    3
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            date_window_days: default_window(),
        }
    }
}

impl ToleranceConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ToleranceConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if !(self.amount > 0.0) {
            return Err(ReconError::ConfigValidation(format!(
                "amount tolerance must be positive, got {}",
                self.amount
            )));
        }
        if self.date_window_days < 0 {
            return Err(ReconError::ConfigValidation(format!(
                "date_window_days must be >= 0, got {}",
                self.date_window_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_behavior() {
        let tol = ToleranceConfig::default();
        assert_eq!(tol.amount, 0.01);
        assert_eq!(tol.date_window_days, 3);
    }

    #[test]
    fn parse_overrides() {
        let tol = ToleranceConfig::from_toml("amount = 0.05\ndate_window_days = 7\n").unwrap();
        assert_eq!(tol.amount, 0.05);
        assert_eq!(tol.date_window_days, 7);
    }

    #[test]
    fn parse_empty_uses_defaults() {
        let tol = ToleranceConfig::from_toml("").unwrap();
        assert_eq!(tol.amount, 0.01);
        assert_eq!(tol.date_window_days, 3);
    }

    #[test]
    fn reject_zero_amount() {
        let err = ToleranceConfig::from_toml("amount = 0.0").unwrap_err();
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn reject_negative_window() {
        let err = ToleranceConfig::from_toml("date_window_days = -1").unwrap_err();
        assert!(err.to_string().contains(">= 0"));
    }
}
