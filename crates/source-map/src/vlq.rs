//! Base64 VLQ encoding used by the `mappings` field of source maps.

const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Reverse lookup table from ASCII byte to base64 digit (or -1).
fn base64_digit(byte: u8) -> Option<i64> {
    BASE64_ALPHABET
        .iter()
        .position(|&b| b == byte)
        .map(|i| i as i64)
}

/// Decodes a single VLQ value starting at `pos`, advancing `pos` past it.
///
/// Returns `None` on a malformed or truncated sequence.
pub(crate) fn decode(bytes: &[u8], pos: &mut usize) -> Option<i64> {
    let mut result: i64 = 0;
    let mut shift: u32 = 0;

    loop {
        let byte = *bytes.get(*pos)?;
        *pos += 1;

        let digit = base64_digit(byte)?;
        result |= (digit & 0x1f) << shift;
        if digit & 0x20 == 0 {
            break;
        }
        shift += 5;
        if shift > 62 {
            return None;
        }
    }

    // The least significant bit carries the sign.
    let value = result >> 1;
    Some(if result & 1 == 1 { -value } else { value })
}

/// Encodes a single value as base64 VLQ, appending to `out`.
pub(crate) fn encode(value: i64, out: &mut String) {
    let mut v: u64 = if value < 0 {
        (((-value) as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };

    loop {
        let mut digit = (v & 0x1f) as usize;
        v >>= 5;
        if v > 0 {
            digit |= 0x20;
        }
        out.push(BASE64_ALPHABET[digit] as char);
        if v == 0 {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(value: i64) {
        let mut encoded = String::new();
        encode(value, &mut encoded);
        let mut pos = 0;
        let decoded = decode(encoded.as_bytes(), &mut pos).unwrap();
        assert_eq!(decoded, value, "roundtrip failed for {value}");
        assert_eq!(pos, encoded.len());
    }

    #[test]
    fn test_roundtrip() {
        for value in [-1000, -33, -16, -1, 0, 1, 15, 16, 31, 32, 1000, 123456] {
            roundtrip(value);
        }
    }

    #[test]
    fn test_known_encodings() {
        let mut out = String::new();
        encode(0, &mut out);
        assert_eq!(out, "A");

        let mut out = String::new();
        encode(1, &mut out);
        assert_eq!(out, "C");

        let mut out = String::new();
        encode(-1, &mut out);
        assert_eq!(out, "D");

        let mut out = String::new();
        encode(16, &mut out);
        assert_eq!(out, "gB");
    }

    #[test]
    fn test_decode_sequence() {
        // "AAAA" is four zeros: one fully mapped segment.
        let bytes = b"AAAA";
        let mut pos = 0;
        for _ in 0..4 {
            assert_eq!(decode(bytes, &mut pos), Some(0));
        }
        assert_eq!(pos, 4);
    }

    #[test]
    fn test_decode_malformed() {
        // Continuation bit set with no following digit.
        let mut pos = 0;
        assert_eq!(decode(b"g", &mut pos), None);

        // Not a base64 character.
        let mut pos = 0;
        assert_eq!(decode(b"!", &mut pos), None);
    }
}
