//! # Amounts
//!
//! Currency, minor-unit amounts, and parsing of user-entered amounts.
//!
//! Browsers submit the amount field as whatever the user typed, so
//! [`AmountInput`] accepts a JSON number or a JSON string. Strings are read
//! the way `parseFloat` reads them: the longest numeric prefix wins and any
//! trailing text is ignored (`"12.50 USD"` is `12.5`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported currencies (all two-decimal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code, lowercase as the processor expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
        }
    }

    /// Display symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
        }
    }

    /// Number of minor units in one major unit
    pub fn minor_per_major(&self) -> i64 {
        100
    }

    /// Convert a decimal amount to minor units, rounding halves up.
    ///
    /// Returns `None` when the result is not a finite integer that fits in `i64`.
    pub fn to_minor_units(&self, major: f64) -> Option<MinorUnits> {
        let scaled = major * self.minor_per_major() as f64;
        if !scaled.is_finite() {
            return None;
        }

        let floor = scaled.floor();
        let rounded = if scaled - floor >= 0.5 { floor + 1.0 } else { floor };

        if rounded >= i64::MAX as f64 || rounded < i64::MIN as f64 {
            return None;
        }
        Some(MinorUnits(rounded as i64))
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::USD
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "usd" => Ok(Currency::USD),
            "eur" => Ok(Currency::EUR),
            "gbp" => Ok(Currency::GBP),
            "cad" => Ok(Currency::CAD),
            "aud" => Ok(Currency::AUD),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

/// Amount in the smallest currency unit (cents for USD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(pub i64);

impl MinorUnits {
    pub fn get(self) -> i64 {
        self.0
    }

    /// Amount in major units (`1050` -> `10.5`)
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Format for display with two decimals (e.g., "$10.00")
    pub fn display(self, currency: Currency) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, currency.symbol(), abs / 100, abs % 100)
    }
}

impl From<i64> for MinorUnits {
    fn from(value: i64) -> Self {
        MinorUnits(value)
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw amount as submitted by the browser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// Amount in major units, or `None` when it is not a number
    pub fn major_units(&self) -> Option<f64> {
        match self {
            AmountInput::Number(n) => Some(*n).filter(|n| !n.is_nan()),
            AmountInput::Text(s) => parse_major_units(s),
        }
    }
}

impl From<&str> for AmountInput {
    fn from(value: &str) -> Self {
        AmountInput::Text(value.to_string())
    }
}

impl From<f64> for AmountInput {
    fn from(value: f64) -> Self {
        AmountInput::Number(value)
    }
}

/// Parse the leading decimal literal of `input`.
///
/// Leading whitespace is skipped; the longest prefix of the form
/// `[+-] digits [. digits] [e [+-] digits]` (or `[+-]Infinity`) is parsed.
/// Returns `None` if there is no such prefix.
pub fn parse_major_units(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_end = digits_from(end);
    let mut significant = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if frac_digits > 0 {
            significant += frac_digits;
            end = frac_end;
        }
    }

    if significant == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
