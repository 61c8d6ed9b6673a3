//! Hex color codec
//!
//! The zone file speaks 6-digit lowercase hex (`rrggbb`) with no prefix.
//! Decoding is case-insensitive and tolerates a single leading `#`.

use heapless::String;

use crate::color::Rgb;
use crate::error::ColorParseError;

/// Number of hex digits in an encoded color
pub const HEX_LEN: usize = 6;

/// Stack-allocated encoded color
pub type HexString = String<HEX_LEN>;

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encode a color as 6 lowercase hex digits
pub fn encode_hex(color: Rgb) -> HexString {
    let mut out = HexString::new();
    for channel in [color.r, color.g, color.b] {
        // Capacity is exactly 3 * 2 digits
        let _ = out.push(char::from(DIGITS[usize::from(channel >> 4)]));
        let _ = out.push(char::from(DIGITS[usize::from(channel & 0x0f)]));
    }
    out
}

/// Decode a `rrggbb` (or `#rrggbb`) string
pub fn decode_hex(input: &str) -> Result<Rgb, ColorParseError> {
    let digits = input.strip_prefix('#').unwrap_or(input);
    let bytes = digits.as_bytes();
    if bytes.len() != HEX_LEN {
        return Err(ColorParseError::InvalidLength(bytes.len()));
    }

    let nibble = |position: usize| -> Result<u8, ColorParseError> {
        let c = bytes[position];
        match c {
            b'0'..=b'9' => Ok(c - b'0'),
            b'a'..=b'f' => Ok(c - b'a' + 10),
            b'A'..=b'F' => Ok(c - b'A' + 10),
            _ => Err(ColorParseError::InvalidDigit {
                position,
                found: char::from(c),
            }),
        }
    };
    let byte = |at: usize| -> Result<u8, ColorParseError> {
        Ok((nibble(at)? << 4) | nibble(at + 1)?)
    };

    Ok(Rgb {
        r: byte(0)?,
        g: byte(2)?,
        b: byte(4)?,
    })
}
