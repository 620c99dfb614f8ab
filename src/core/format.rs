use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Grouping/decimal symbol convention for formatted amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    /// `1,234.5`
    EnUs,
    /// `1.234,5`
    #[default]
    EsEs,
}

impl NumberLocale {
    #[must_use]
    pub const fn group_separator(self) -> char {
        match self {
            Self::EnUs => ',',
            Self::EsEs => '.',
        }
    }

    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::EnUs => '.',
            Self::EsEs => ',',
        }
    }
}

/// Currency-style value formatting used by axis ticks and value labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub locale: NumberLocale,
    #[serde(default)]
    pub decimals: u8,
}

impl NumberFormat {
    #[must_use]
    pub fn new(prefix: impl Into<String>, locale: NumberLocale) -> Self {
        Self {
            prefix: prefix.into(),
            locale,
            decimals: 0,
        }
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: u8) -> Self {
        self.decimals = decimals.min(8);
        self
    }

    /// Formats `value` as `prefix` + sign + grouped digits.
    ///
    /// Rounds half away from zero; non-finite input formats as zero.
    #[must_use]
    pub fn format(&self, value: f64) -> String {
        let value = if value.is_finite() { value } else { 0.0 };
        let digits = fixed_digits(value.abs(), self.decimals);
        let is_zero = digits.bytes().all(|byte| byte == b'0' || byte == b'.');
        let sign = if value < 0.0 && !is_zero { "-" } else { "" };

        let (integer, fraction) = match digits.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (digits.as_str(), None),
        };

        let mut out = String::with_capacity(self.prefix.len() + digits.len() + 4);
        out.push_str(&self.prefix);
        out.push_str(sign);
        push_grouped(&mut out, integer, self.locale.group_separator());
        if let Some(fraction) = fraction {
            out.push(self.locale.decimal_separator());
            out.push_str(fraction);
        }
        out
    }
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::new("$ ", NumberLocale::default())
    }
}

/// Rounded integer percentage text, e.g. `"42%"`.
#[must_use]
pub fn format_percentage(value: f64) -> String {
    let rounded = if value.is_finite() { value.round() } else { 0.0 };
    // `-0.4` rounds to `-0.0`, which would print as "-0%".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.0}%")
}

/// Truncates `text` to at most `max_chars` characters on a char boundary.
#[must_use]
pub fn truncate_label(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

fn fixed_digits(abs_value: f64, decimals: u8) -> String {
    let precision = usize::from(decimals);
    match Decimal::from_f64(abs_value) {
        Some(decimal) => {
            let rounded = decimal
                .round_dp_with_strategy(u32::from(decimals), RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.precision$}")
        }
        None => format!("{abs_value:.precision$}"),
    }
}

fn push_grouped(out: &mut String, integer: &str, separator: char) {
    let len = integer.len();
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(separator);
        }
        out.push(digit);
    }
}
