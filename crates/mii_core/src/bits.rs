use thiserror::Error;

/// Bit order inside each byte.
///
/// `Big` packs the most significant bit first (the legacy record format),
/// `Little` packs the least significant bit first (the modern format).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Big,
    Little,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("read of {needed} bits at bit {offset} runs past end of {len}-byte buffer")]
    OutOfBounds {
        offset: usize,
        needed: usize,
        len: usize,
    },
    #[error("bit width {0} outside 1..=32")]
    InvalidWidth(u32),
    #[error("byte read requested at unaligned bit position {bit}")]
    Unaligned { bit: usize },
    #[error("expected a {expected}-byte record, got {actual} bytes")]
    WrongLength { expected: usize, actual: usize },
}

/// Position inside a buffer. `bit` is always in `0..8`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct BitCursor {
    pub byte: usize,
    pub bit: u8,
}

impl BitCursor {
    pub fn at_byte(byte: usize) -> Self {
        Self { byte, bit: 0 }
    }

    pub fn absolute_bit(&self) -> usize {
        self.byte * 8 + self.bit as usize
    }

    pub fn is_aligned(&self) -> bool {
        self.bit == 0
    }

    fn advance(&mut self, bits: usize) {
        let total = self.absolute_bit() + bits;
        self.byte = total / 8;
        self.bit = (total % 8) as u8;
    }
}

/// Forward-only bit reader over an immutable byte slice.
pub struct BitReader<'a> {
    bytes: &'a [u8],
    cursor: BitCursor,
}

impl<'a> BitReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::at(bytes, BitCursor::default())
    }

    pub fn at(bytes: &'a [u8], cursor: BitCursor) -> Self {
        Self { bytes, cursor }
    }

    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }

    pub fn remaining_bits(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.cursor.absolute_bit())
    }

    pub fn read_bits(&mut self, n: u32, endian: Endian) -> Result<u32, DecodeError> {
        if !(1..=32).contains(&n) {
            return Err(DecodeError::InvalidWidth(n));
        }
        self.ensure_available(n as usize)?;

        let mut value = 0u32;
        for k in 0..n {
            let byte = self.bytes[self.cursor.byte];
            let bit = match endian {
                Endian::Big => (byte >> (7 - self.cursor.bit)) & 1,
                Endian::Little => (byte >> self.cursor.bit) & 1,
            } as u32;
            value = match endian {
                Endian::Big => (value << 1) | bit,
                Endian::Little => value | (bit << k),
            };
            self.cursor.advance(1);
        }
        Ok(value)
    }

    /// Narrow read for fields of at most eight bits.
    pub fn read_u8_bits(&mut self, n: u32, endian: Endian) -> Result<u8, DecodeError> {
        if n > 8 {
            return Err(DecodeError::InvalidWidth(n));
        }
        Ok(self.read_bits(n, endian)? as u8)
    }

    pub fn read_flag(&mut self, endian: Endian) -> Result<bool, DecodeError> {
        Ok(self.read_bits(1, endian)? != 0)
    }

    pub fn align_to_byte(&mut self) {
        if !self.cursor.is_aligned() {
            self.cursor = BitCursor::at_byte(self.cursor.byte + 1);
        }
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if !self.cursor.is_aligned() {
            return Err(DecodeError::Unaligned {
                bit: self.cursor.absolute_bit(),
            });
        }
        self.ensure_available(n * 8)?;
        let start = self.cursor.byte;
        self.cursor.advance(n * 8);
        Ok(&self.bytes[start..start + n])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16_le(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.read_array()?))
    }

    pub fn read_u64_le(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array()?))
    }

    /// Fixed-width UTF-16 text field, decoded in the given byte order.
    pub fn read_utf16(&mut self, units: usize, endian: Endian) -> Result<String, DecodeError> {
        let raw = self.read_bytes(units * 2)?;
        Ok(crate::text::decode_utf16_field(raw, endian))
    }

    fn ensure_available(&self, bits: usize) -> Result<(), DecodeError> {
        if bits > self.remaining_bits() {
            return Err(DecodeError::OutOfBounds {
                offset: self.cursor.absolute_bit(),
                needed: bits,
                len: self.bytes.len(),
            });
        }
        Ok(())
    }
}

/// Inverse of [`BitReader`]; used to re-encode decoded records.
#[derive(Debug, Default)]
pub struct BitWriter {
    bytes: Vec<u8>,
    cursor: BitCursor,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(len: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(len),
            cursor: BitCursor::default(),
        }
    }

    pub fn cursor(&self) -> BitCursor {
        self.cursor
    }

    /// Writes the low `n` bits of `value`. Higher bits are ignored.
    pub fn write_bits(&mut self, value: u32, n: u32, endian: Endian) {
        debug_assert!((1..=32).contains(&n));
        for k in 0..n {
            let bit = match endian {
                Endian::Big => (value >> (n - 1 - k)) & 1,
                Endian::Little => (value >> k) & 1,
            } as u8;
            if self.cursor.is_aligned() {
                self.bytes.push(0);
            }
            let shift = match endian {
                Endian::Big => 7 - self.cursor.bit,
                Endian::Little => self.cursor.bit,
            };
            if let Some(last) = self.bytes.last_mut() {
                *last |= bit << shift;
            }
            self.cursor.advance(1);
        }
    }

    pub fn write_flag(&mut self, flag: bool, endian: Endian) {
        self.write_bits(flag as u32, 1, endian);
    }

    pub fn align_to_byte(&mut self) {
        if !self.cursor.is_aligned() {
            self.cursor = BitCursor::at_byte(self.cursor.byte + 1);
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.align_to_byte();
        self.bytes.extend_from_slice(bytes);
        self.cursor = BitCursor::at_byte(self.bytes.len());
    }

    pub fn write_u8(&mut self, value: u8) {
        self.write_bytes(&[value]);
    }

    pub fn write_u16_le(&mut self, value: u16) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_u64_le(&mut self, value: u64) {
        self.write_bytes(&value.to_le_bytes());
    }

    pub fn write_utf16(&mut self, text: &str, units: usize, endian: Endian) {
        let encoded = crate::text::encode_utf16_field(text, units, endian);
        self.write_bytes(&encoded);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn big_endian_reads_most_significant_bit_first() {
        let bytes = [0b1010_0000, 0xFF];
        let mut r = BitReader::new(&bytes);
        assert_eq!(r.read_bits(1, Endian::Big).unwrap(), 1);
        assert_eq!(r.read_bits(3, Endian::Big).unwrap(), 0b010);
        assert_eq!(r.cursor(), BitCursor { byte: 0, bit: 4 });
    }

    #[test]
    fn little_endian_reads_least_significant_bit_first() {
        let bytes = [0b0000_0110, 0x00];
        let mut r = BitReader::new(&bytes);
        assert_eq!(r.read_bits(1, Endian::Little).unwrap(), 0);
        assert_eq!(r.read_bits(2, Endian::Little).unwrap(), 0b11);
    }

    #[test]
    fn reads_span_byte_boundaries() {
        let bytes = [0x0F, 0xF0];
        let mut r = BitReader::new(&bytes);
        r.read_bits(4, Endian::Big).unwrap();
        assert_eq!(r.read_bits(8, Endian::Big).unwrap(), 0xFF);

        let bytes = [0xF0, 0x0F];
        let mut r = BitReader::new(&bytes);
        r.read_bits(4, Endian::Little).unwrap();
        assert_eq!(r.read_bits(8, Endian::Little).unwrap(), 0xFF);
    }

    #[test]
    fn align_is_noop_when_aligned() {
        let bytes = [0u8; 2];
        let mut r = BitReader::new(&bytes);
        r.align_to_byte();
        assert_eq!(r.cursor(), BitCursor::at_byte(0));
        r.read_bits(3, Endian::Big).unwrap();
        r.align_to_byte();
        assert_eq!(r.cursor(), BitCursor::at_byte(1));
    }

    #[test]
    fn byte_reads_require_alignment() {
        let bytes = [0u8; 4];
        let mut r = BitReader::new(&bytes);
        r.read_bits(1, Endian::Big).unwrap();
        assert_eq!(r.read_u8(), Err(DecodeError::Unaligned { bit: 1 }));
    }

    #[test]
    fn rejects_widths_outside_range() {
        let bytes = [0u8; 8];
        let mut r = BitReader::new(&bytes);
        assert_eq!(r.read_bits(0, Endian::Big), Err(DecodeError::InvalidWidth(0)));
        assert_eq!(r.read_bits(33, Endian::Big), Err(DecodeError::InvalidWidth(33)));
    }

    #[test]
    fn reading_past_end_fails_without_advancing() {
        let bytes = [0xAA];
        let mut r = BitReader::new(&bytes);
        r.read_bits(6, Endian::Big).unwrap();
        let err = r.read_bits(3, Endian::Big).unwrap_err();
        assert!(matches!(err, DecodeError::OutOfBounds { needed: 3, .. }));
        assert_eq!(r.cursor(), BitCursor { byte: 0, bit: 6 });
    }

    #[test]
    fn writer_mirrors_reader_for_both_orders() {
        for endian in [Endian::Big, Endian::Little] {
            let mut w = BitWriter::new();
            w.write_bits(0b101, 3, endian);
            w.write_bits(0x1FF, 9, endian);
            w.write_flag(true, endian);
            w.write_u16_le(0xBEEF);
            let bytes = w.into_bytes();

            let mut r = BitReader::new(&bytes);
            assert_eq!(r.read_bits(3, endian).unwrap(), 0b101);
            assert_eq!(r.read_bits(9, endian).unwrap(), 0x1FF);
            assert!(r.read_flag(endian).unwrap());
            r.align_to_byte();
            assert_eq!(r.read_u16_le().unwrap(), 0xBEEF);
        }
    }
}
