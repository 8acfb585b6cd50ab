use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (non-positive tolerance, negative window).
    ConfigValidation(String),
    /// Manual match attempted with an empty selection on one side.
    EmptySelection { side: &'static str },
    /// Selected sides do not balance within tolerance.
    Unbalanced { bank_total: f64, system_total: f64 },
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::EmptySelection { side } => {
                write!(f, "no {side} items selected")
            }
            Self::Unbalanced { bank_total, system_total } => {
                write!(
                    f,
                    "selection does not balance: bank total {bank_total:.2} vs system total {system_total:.2}"
                )
            }
        }
    }
}

impl std::error::Error for ReconError {}
