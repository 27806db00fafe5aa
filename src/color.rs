//! RGB color triples.

use crate::{RleError,RleResult};

/// A pixel color in logical R, G, B order.
pub type Rgb = [u8; 3];

/// Transparent color used when transparency is requested without
/// naming a color, i.e. magenta.
pub const DEFAULT_TRANSPARENT_COLOR: Rgb = [0xFF, 0x00, 0xFF];

/// Default maximum MSE in a run.
pub const DEFAULT_TOLERANCE: f64 = 20.0;

/// Parse a color code of the form "RRGGBB".
///
/// Only the first six characters are examined; anything after them
/// is ignored.
///
/// # Examples
///
/// ```
/// assert_eq!(rlelib::parse_color("ff00ff").ok(), Some([0xFF, 0x00, 0xFF]));
/// assert!(rlelib::parse_color("ff00").is_err());
/// ```
pub fn parse_color(code: &str)
        -> RleResult<Rgb> {
    let digits = code.as_bytes();
    if digits.len() < 6 {
        return Err(RleError::InvalidColor(code.to_string()));
    }

    let mut c = [0; 3];
    for (i, e) in c.iter_mut().enumerate() {
        let hi = hex_value(digits[2 * i]);
        let lo = hex_value(digits[2 * i + 1]);
        match (hi, lo) {
            (Some(hi), Some(lo)) => *e = (hi << 4) | lo,
            _ => return Err(RleError::InvalidColor(code.to_string())),
        }
    }

    Ok(c)
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::RleError;
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("ff00ff").ok(), Some(DEFAULT_TRANSPARENT_COLOR));
        assert_eq!(parse_color("0A1b2C").ok(), Some([0x0A, 0x1B, 0x2C]));

        // Trailing characters are ignored.
        assert_eq!(parse_color("102030zz").ok(), Some([0x10, 0x20, 0x30]));
    }

    #[test]
    fn test_parse_color_invalid() {
        for code in &["", "ff00f", "gg0000", "#ff00ff", "ff 0ff"] {
            match parse_color(code) {
                Err(RleError::InvalidColor(ref s)) => assert_eq!(s, code),
                _ => panic!("{} should be rejected", code),
            }
        }
    }
}
