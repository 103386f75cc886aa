//! Decimal numerals as typed and displayed.
//!
//! The engine keeps operands as text so that what the user typed (`"5."`,
//! `"0.10"`) is shown verbatim. Every place that needs the numeric value goes
//! through [`parse_operand`], which validates the text first instead of
//! coercing whatever happens to be there.

/// Text shown in place of a numeral after a failed binary computation.
pub const ERROR_TEXT: &str = "Error";

/// Maximum number of digits accepted while typing a numeral.
pub const MAX_DIGITS: usize = 12;

/// Computed results are rounded to this many decimal places.
pub const ROUNDING_PLACES: i32 = 8;

const ROUNDING_SCALE: f64 = 1e8;

/// Returns `true` if `text` matches `-?[0-9]+(\.[0-9]*)?`.
///
/// A trailing point is allowed because it is a legitimate intermediate state
/// while typing (`"12."`).
pub fn is_valid(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (unsigned, ""),
    };

    !integer.is_empty()
        && integer.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit())
}

/// Parses an operand, returning `None` for anything that is not a numeral
/// (including [`ERROR_TEXT`]).
pub fn parse_operand(text: &str) -> Option<f64> {
    if !is_valid(text) {
        return None;
    }
    text.trim_end_matches('.').parse::<f64>().ok()
}

/// Rounds a computed value to [`ROUNDING_PLACES`] decimal places.
///
/// `0.1 + 0.2` comes out as `0.3` instead of `0.30000000000000004`. Values too
/// large to scale are returned as they are; they carry no fractional part
/// anyway.
pub fn round_result(value: f64) -> f64 {
    let scaled = value * ROUNDING_SCALE;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / ROUNDING_SCALE
}

/// Renders a finite value as a plain decimal numeral.
///
/// Never uses exponent notation, and negative zero renders as `"0"`.
pub fn from_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Counts the digits of a numeral, ignoring sign and decimal point.
pub fn digit_count(text: &str) -> usize {
    text.bytes().filter(u8::is_ascii_digit).count()
}

/// Formats a numeral for display: the integer part gets thousands separators,
/// the fractional part is kept verbatim.
///
/// Text that is not a numeral (such as [`ERROR_TEXT`]) is returned unchanged.
pub fn group_thousands(text: &str) -> String {
    if !is_valid(text) {
        return text.to_string();
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(text.len() + integer.len() / 3);
    grouped.push_str(sign);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
