//! Property value codec.
//!
//! FIT properties are stored as raw byte strings; this module decodes them
//! into the typed shapes the model needs. All functions are pure — a missing
//! property is the caller's concern, not this module's.

use byteorder::{BigEndian, ByteOrder};

use crate::error::PropError;

/// Decodes a NUL-terminated text property.
///
/// Takes the bytes up to (and excluding) the first NUL, or the whole value
/// if no NUL is present. Invalid UTF-8 is replaced rather than rejected.
pub fn as_text(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

/// Decodes a big-endian u32 property.
///
/// The value must be exactly 4 bytes.
pub fn as_u32(raw: &[u8]) -> Result<u32, PropError> {
    if raw.len() != 4 {
        return Err(PropError::U32Length(raw.len()));
    }
    Ok(BigEndian::read_u32(raw))
}

/// Decodes a sequence of big-endian u32 cells.
///
/// The value length must be a multiple of 4.
pub fn as_u32_array(raw: &[u8]) -> Result<Vec<u32>, PropError> {
    if raw.len() % 4 != 0 {
        return Err(PropError::U32ArrayLength(raw.len()));
    }
    Ok(raw.chunks_exact(4).map(BigEndian::read_u32).collect())
}

/// Returns the raw payload unchanged.
pub fn as_bytes(raw: &[u8]) -> &[u8] {
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_stops_at_nul() {
        assert_eq!(as_text(b"kernel\0junk"), "kernel");
        assert_eq!(as_text(b"no terminator"), "no terminator");
        assert_eq!(as_text(b""), "");
    }

    #[test]
    fn test_u32_big_endian() {
        assert_eq!(as_u32(&[0, 0, 0, 1]), Ok(1));
        assert_eq!(as_u32(&[0x12, 0x34, 0x56, 0x78]), Ok(0x1234_5678));
    }

    #[test]
    fn test_u32_rejects_wrong_length() {
        assert_eq!(as_u32(&[0, 1]), Err(PropError::U32Length(2)));
        assert_eq!(as_u32(&[0; 8]), Err(PropError::U32Length(8)));
    }

    #[test]
    fn test_u32_array() {
        assert_eq!(
            as_u32_array(&[0, 0, 0, 1, 0, 0, 0, 2]),
            Ok(vec![1, 2])
        );
        assert_eq!(as_u32_array(&[]), Ok(vec![]));
        assert_eq!(as_u32_array(&[0, 1, 2]), Err(PropError::U32ArrayLength(3)));
    }

    #[test]
    fn test_bytes_is_identity() {
        assert_eq!(as_bytes(b"\x00\xff"), b"\x00\xff");
    }
}
