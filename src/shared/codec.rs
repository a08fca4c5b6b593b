//! Text-to-hex encoding used in identity and signature material.
//!
//! Each character becomes exactly one byte: code points up to `0xFF` pass
//! through, higher code points are shifted down by [`NORMALIZE_OFFSET`], which
//! maps the Cyrillic block `U+0410..=U+044F` onto `0xC0..=0xFF` (the
//! Windows-1251 layout). The bytes are rendered as lowercase hex, two digits
//! per character.

use crate::error::CodecError;

/// Offset subtracted from code points above `0xFF`.
pub const NORMALIZE_OFFSET: u32 = 0x350;

/// Encode `text` as lowercase hex, one byte per character.
///
/// Characters that still fall outside a single byte after normalization are
/// rejected instead of being truncated.
pub fn hex_encode(text: &str) -> Result<String, CodecError> {
    let bytes = text
        .chars()
        .enumerate()
        .map(|(index, ch)| normalize(ch).ok_or(CodecError::OutOfRange { ch, index }))
        .collect::<Result<Vec<u8>, _>>()?;
    Ok(hex::encode(bytes))
}

fn normalize(ch: char) -> Option<u8> {
    let code = ch as u32;
    let value = if code > 0xFF {
        code.checked_sub(NORMALIZE_OFFSET)?
    } else {
        code
    };
    u8::try_from(value).ok()
}
