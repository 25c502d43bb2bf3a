//! Free-text destination parsing
//!
//! Input is `"<latitude>, <longitude>"`. Each part is read with leading-number
//! semantics: the longest numeric prefix is used and trailing text is
//! ignored, so `"12.5km"` reads as `12.5`. A part with no numeric prefix
//! rejects the whole input.

use thiserror::Error;

use crate::core::Position;

/// Reasons a destination input was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DestinationError {
    #[error("expected `latitude, longitude`, found {found} part(s)")]
    WrongPartCount { found: usize },
    #[error("`{part}` is not a number")]
    InvalidNumber { part: String },
    #[error("{latitude}, {longitude} is outside the valid coordinate range")]
    OutOfRange { latitude: f64, longitude: f64 },
}

/// Parse `text` into a position without range checks
pub fn parse_destination(text: &str) -> Result<Position, DestinationError> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 2 {
        return Err(DestinationError::WrongPartCount { found: parts.len() });
    }

    let latitude = parse_coordinate(parts[0])?;
    let longitude = parse_coordinate(parts[1])?;
    Ok(Position::new(latitude, longitude))
}

/// Parse `text` and reject coordinates outside ±90 / ±180
pub fn parse_destination_in_range(text: &str) -> Result<Position, DestinationError> {
    let position = parse_destination(text)?;
    if !position.is_in_range() {
        return Err(DestinationError::OutOfRange {
            latitude: position.latitude,
            longitude: position.longitude,
        });
    }
    Ok(position)
}

fn parse_coordinate(part: &str) -> Result<f64, DestinationError> {
    leading_number(part)
        .filter(|value| value.is_finite())
        .ok_or_else(|| DestinationError::InvalidNumber {
            part: part.to_string(),
        })
}

/// Longest decimal prefix of `text` as a float: `[+-]digits[.digits][e[+-]digits]`.
///
/// At least one mantissa digit is required. An exponent marker without digits
/// is left out of the prefix.
pub fn leading_number(text: &str) -> Option<f64> {
    let bytes = text.trim_start().as_bytes();
    let mut literal = String::with_capacity(bytes.len());
    let mut i = 0;

    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            literal.push(sign as char);
            i += 1;
        }
    }

    let integer_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let integer = &bytes[integer_start..i];

    let mut fraction: &[u8] = &[];
    if i < bytes.len() && bytes[i] == b'.' {
        let fraction_start = i + 1;
        let mut j = fraction_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        fraction = &bytes[fraction_start..j];
        i = j;
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }

    literal.push_str(if integer.is_empty() { "0" } else { ascii(integer) });
    if !fraction.is_empty() {
        literal.push('.');
        literal.push_str(ascii(fraction));
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        let exponent_sign = match bytes.get(j) {
            Some(&sign) if sign == b'+' || sign == b'-' => {
                j += 1;
                Some(sign as char)
            }
            _ => None,
        };
        let digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > digits_start {
            literal.push('e');
            if let Some(sign) = exponent_sign {
                literal.push(sign);
            }
            literal.push_str(ascii(&bytes[digits_start..j]));
        }
    }

    literal.parse().ok()
}

fn ascii(digits: &[u8]) -> &str {
    // Only ASCII digits reach here
    std::str::from_utf8(digits).unwrap_or("0")
}
