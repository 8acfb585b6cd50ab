//! Display formatting for amounts and dates (es-PE conventions).
//!
//! Total functions: absent input formats as zero or a placeholder,
//! never an error.

use chrono::NaiveDate;

/// Default currency symbol (Peruvian sol).
pub const DEFAULT_CURRENCY_SYMBOL: &str = "S/";

/// Format an optional amount with the default "S/" symbol.
///
/// `None` renders as `"S/ 0.00"`; `1234.5` renders as `"S/ 1,234.50"`.
pub fn format_currency(amount: Option<f64>) -> String {
    format_currency_with(amount, DEFAULT_CURRENCY_SYMBOL)
}

/// Format an optional amount: two decimals, comma thousands grouping,
/// dot decimal separator, sign between symbol and digits.
pub fn format_currency_with(amount: Option<f64>, symbol: &str) -> String {
    let value = amount.unwrap_or(0.0);
    let negative = value < 0.0;
    // Round half-away-from-zero to cents before splitting.
    let total_cents = (value.abs() * 100.0).round() as u64;
    let units = total_cents / 100;
    let cents = total_cents % 100;

    let digits = units.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative && total_cents > 0 { "-" } else { "" };
    format!("{symbol} {sign}{grouped}.{cents:02}")
}

/// Format an optional date as `dd/mm/yyyy`, or `"-"` when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// Parse a `YYYY-MM-DD` string. Returns `None` on anything else.
pub fn parse_iso_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}
