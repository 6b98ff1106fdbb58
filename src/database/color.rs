// file: src/database/color.rs
// version: 1.0.0
// guid: a8cdf627-a5f2-4c34-b29f-cad644963846

//! Embed color parsing

use super::document::MAX_COLOR;
use crate::Result;

/// Parse a user-supplied embed color
///
/// Surrounding whitespace is ignored and a leading `#` is dropped. Six
/// characters are then read as hexadecimal, anything else as a decimal
/// integer. The result must fit in `0..=0xFFFFFF`.
pub fn parse_color(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let parsed = if digits.len() == 6 {
        u64::from_str_radix(digits, 16)
    } else {
        digits.parse::<u64>()
    };

    match parsed {
        Ok(value) if value <= u64::from(MAX_COLOR) => Ok(value as u32),
        _ => Err(crate::error::HerokronError::invalid_color(format!(
            "{} isn't a hexadecimal color or a base 10 integer between 0 and {}",
            input, MAX_COLOR
        ))),
    }
}
