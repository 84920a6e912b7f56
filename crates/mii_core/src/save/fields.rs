use std::fmt::Write as _;

use log::trace;

use crate::text::is_printable;

/// Bounds-checked, non-failing accessors over a save-file buffer.
///
/// Out-of-range reads return zero (integers) or an empty string (text, hex).
#[derive(Debug, Clone, Copy)]
pub struct FieldReader<'a> {
    bytes: &'a [u8],
}

impl<'a> FieldReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Borrows `len` bytes at `offset`, or `None` if any of them is missing.
    pub fn span(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let span = offset
            .checked_add(len)
            .and_then(|end| self.bytes.get(offset..end));
        if span.is_none() {
            trace!(
                "lenient read of {len} bytes at {offset:#x} outside {}-byte buffer",
                self.bytes.len()
            );
        }
        span
    }

    fn array<const N: usize>(&self, offset: usize) -> Option<[u8; N]> {
        self.span(offset, N)?.try_into().ok()
    }

    pub fn byte(&self, offset: usize) -> u8 {
        self.array::<1>(offset).map(|[b]| b).unwrap_or(0)
    }

    pub fn u16_le(&self, offset: usize) -> u16 {
        self.array(offset).map(u16::from_le_bytes).unwrap_or(0)
    }

    pub fn u32_le(&self, offset: usize) -> u32 {
        self.array(offset).map(u32::from_le_bytes).unwrap_or(0)
    }

    /// Reads up to `max_units` UTF-16LE code units.
    ///
    /// Surrogate units are skipped (they still count toward `max_units`).
    /// Reading stops at a null unit, a non-printable character or the end
    /// of the buffer; whatever was collected up to then is returned.
    pub fn utf16_string(&self, offset: usize, max_units: usize) -> String {
        let mut out = String::new();
        for index in 0..max_units {
            let Some(at) = index.checked_mul(2).and_then(|d| offset.checked_add(d)) else {
                break;
            };
            let Some(pair) = self.array::<2>(at) else {
                break;
            };
            let unit = u16::from_le_bytes(pair);
            if unit == 0 {
                break;
            }
            // Lone or paired surrogates are not reconstructed.
            let Some(ch) = char::from_u32(unit as u32) else {
                continue;
            };
            if !is_printable(ch) {
                break;
            }
            out.push(ch);
        }
        out
    }

    /// Uppercase hex of `len` bytes, empty if the range is out of bounds.
    pub fn hex(&self, offset: usize, len: usize) -> String {
        let Some(span) = self.span(offset, len) else {
            return String::new();
        };
        let mut out = String::with_capacity(len * 2);
        for byte in span {
            let _ = write!(out, "{byte:02X}");
        }
        out
    }

    /// Like [`byte`](Self::byte) but addressed by an optional offset, as
    /// produced by signed delta arithmetic.
    pub fn byte_at(&self, offset: Option<usize>) -> u8 {
        offset.map(|o| self.byte(o)).unwrap_or(0)
    }

    pub fn u16_le_at(&self, offset: Option<usize>) -> u16 {
        offset.map(|o| self.u16_le(o)).unwrap_or(0)
    }

    pub fn u32_le_at(&self, offset: Option<usize>) -> u32 {
        offset.map(|o| self.u32_le(o)).unwrap_or(0)
    }

    pub fn utf16_string_at(&self, offset: Option<usize>, max_units: usize) -> String {
        offset
            .map(|o| self.utf16_string(o, max_units))
            .unwrap_or_default()
    }

    pub fn hex_at(&self, offset: Option<usize>, len: usize) -> String {
        offset.map(|o| self.hex(o, len)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_little_endian() {
        let buf = [0x34, 0x12, 0x78, 0x56];
        let reader = FieldReader::new(&buf);
        assert_eq!(reader.u16_le(0), 0x1234);
        assert_eq!(reader.u32_le(0), 0x5678_1234);
    }

    #[test]
    fn partial_reads_at_the_tail_default() {
        let buf = [0xFF; 3];
        let reader = FieldReader::new(&buf);
        assert_eq!(reader.byte(2), 0xFF);
        assert_eq!(reader.u16_le(2), 0);
        assert_eq!(reader.u32_le(0), 0);
        assert_eq!(reader.hex(1, 3), "");
    }

    #[test]
    fn string_skips_surrogates_and_stops_at_control() {
        // 'A', high surrogate, 'B', BEL, 'C'
        let buf = [0x41, 0, 0x3D, 0xD8, 0x42, 0, 0x07, 0, 0x43, 0];
        let reader = FieldReader::new(&buf);
        assert_eq!(reader.utf16_string(0, 5), "AB");
        assert_eq!(reader.utf16_string(0, 1), "A");

        // 'A', unassigned U+0378, 'B'
        let buf = [0x41, 0, 0x78, 0x03, 0x42, 0];
        assert_eq!(FieldReader::new(&buf).utf16_string(0, 3), "A");
    }

    #[test]
    fn huge_offsets_do_not_overflow() {
        let reader = FieldReader::new(&[1, 2, 3]);
        assert_eq!(reader.u32_le(usize::MAX), 0);
        assert_eq!(reader.utf16_string(usize::MAX - 1, 4), "");
        assert_eq!(reader.hex(usize::MAX, 2), "");
    }
}
