//! Little-endian write helpers mirroring the reader.

/// Append a little-endian u32.
pub fn put_u32_le(out: &mut Vec<u8>, value: u32) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append a little-endian u64.
pub fn put_u64_le(out: &mut Vec<u8>, value: u64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append a little-endian i64.
pub fn put_i64_le(out: &mut Vec<u8>, value: i64) {
    out.extend_from_slice(&value.to_le_bytes());
}

/// Append a big-endian u16 (port numbers in address records).
pub fn put_u16_be(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn little_endian_layout() {
        let mut out = Vec::new();
        put_u32_le(&mut out, 0x0102_0304);
        assert_eq!(out, [0x04, 0x03, 0x02, 0x01]);
    }
}
