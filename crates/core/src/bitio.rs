//! Bit-level packing of Huffman codes into bytes.
//!
//! `BitWriter` and `BitReader` operate in MSB-first order: the first bit
//! written lands in the most significant bit of the first byte.
//!
//! # Padding Rules
//! - `BitWriter::finish` pads the final partial byte with trailing zeros and
//!   reports how many bits it added (0-7).
//! - `BitReader::with_padding` excludes those trailing bits, so padding is
//!   never handed to the tree walk.
//!
//! # Example
//! ```
//! use huffpack_core::bitio::{BitWriter, BitReader};
//!
//! let mut writer = BitWriter::new();
//! writer.write_bits(0b101, 3).unwrap();
//! writer.write_bits(0b11, 2).unwrap();
//! // 10111 -> padded to 10111000
//!
//! let packed = writer.finish();
//! assert_eq!(packed.bytes, vec![0b1011_1000]);
//! assert_eq!(packed.padding, 3);
//!
//! let mut reader = BitReader::with_padding(&packed.bytes, packed.padding);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(2).unwrap(), 0b11);
//! assert!(reader.is_empty());
//! ```

use crate::codes::Code;
use crate::error::{BitIoError, Result};

/// Packed bitstream: whole bytes plus the number of zero bits appended to
/// the last one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Vec<u8>,
    /// Trailing zero bits added to fill the last byte (0-7)
    pub padding: u8,
}

impl PackedBits {
    /// Number of meaningful bits.
    pub fn bit_len(&self) -> usize {
        (self.bytes.len() * 8).saturating_sub(self.padding as usize)
    }
}

/// Writes bits MSB-first into a byte buffer.
///
/// # Invariants
/// - `bit_count` is always < 8
#[derive(Debug, Clone)]
pub struct BitWriter {
    /// Completed bytes
    bytes: Vec<u8>,
    /// Accumulator for the current partial byte (MSB-aligned)
    bit_buffer: u8,
    /// Number of bits in bit_buffer (0-7)
    bit_count: u8,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a writer with room for `bytes` output bytes.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
            bit_buffer: 0,
            bit_count: 0,
        }
    }

    /// Write the lowest `count` bits of `value`, most significant first.
    ///
    /// # Errors
    /// Returns `BitIoError::InvalidBitCount` if count > 64.
    pub fn write_bits(&mut self, value: u64, count: usize) -> Result<()> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        self.push_bits(value, count);
        Ok(())
    }

    /// Write a single bit.
    pub fn write_bit(&mut self, bit: bool) {
        self.push_bits(bit as u64, 1);
    }

    /// Append the lowest `count` bits of `value`; `count` must be <= 64.
    fn push_bits(&mut self, value: u64, count: usize) {
        let mut remaining = count;
        while remaining > 0 {
            let free = 8 - self.bit_count as usize;
            let take = remaining.min(free);
            let shift = remaining - take;
            let bits = ((value >> shift) & ((1u64 << take) - 1)) as u8;

            self.bit_buffer |= bits << (free - take);
            self.bit_count += take as u8;

            if self.bit_count == 8 {
                self.bytes.push(self.bit_buffer);
                self.bit_buffer = 0;
                self.bit_count = 0;
            }

            remaining -= take;
        }
    }

    /// Append one Huffman code.
    pub fn write_code(&mut self, code: &Code) -> Result<()> {
        self.write_bits(code.bits(), code.len())
    }

    /// Finish writing, padding the final byte with zeros.
    pub fn finish(mut self) -> PackedBits {
        let padding = if self.bit_count > 0 {
            self.bytes.push(self.bit_buffer);
            8 - self.bit_count
        } else {
            0
        };
        PackedBits {
            bytes: self.bytes,
            padding,
        }
    }

    /// Total number of bits written (including the partial byte).
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 + self.bit_count as usize
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads bits MSB-first from a byte buffer.
///
/// # Invariants
/// - `bit_position` never exceeds `bit_len`
#[derive(Debug, Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Current bit position (0 = MSB of first byte)
    bit_position: usize,
    /// Number of readable bits; trailing padding lies beyond it
    bit_len: usize,
}

impl<'a> BitReader<'a> {
    /// Read every bit of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self::with_padding(data, 0)
    }

    /// Read `data` minus its last `padding` bits.
    pub fn with_padding(data: &'a [u8], padding: u8) -> Self {
        Self {
            data,
            bit_position: 0,
            bit_len: (data.len() * 8).saturating_sub(padding as usize),
        }
    }

    /// Read up to 64 bits, MSB-first.
    ///
    /// # Errors
    /// - `BitIoError::InvalidBitCount` if count > 64
    /// - `BitIoError::UnexpectedEof` if not enough bits remain
    pub fn read_bits(&mut self, count: usize) -> Result<u64> {
        if count > 64 {
            return Err(BitIoError::InvalidBitCount(count).into());
        }
        if count > self.bits_remaining() {
            return Err(BitIoError::UnexpectedEof.into());
        }

        let mut result = 0u64;
        let mut remaining = count;

        while remaining > 0 {
            let byte = self.data[self.bit_position / 8];
            let bits_in_byte = 8 - self.bit_position % 8;
            let take = remaining.min(bits_in_byte);

            let mask = ((1u16 << take) - 1) as u8;
            let bits = (byte >> (bits_in_byte - take)) & mask;
            result = (result << take) | bits as u64;

            self.bit_position += take;
            remaining -= take;
        }

        Ok(result)
    }

    /// Read a single bit.
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }

    pub fn bits_remaining(&self) -> usize {
        self.bit_len - self.bit_position
    }

    pub fn position(&self) -> usize {
        self.bit_position
    }

    pub fn is_empty(&self) -> bool {
        self.bit_position >= self.bit_len
    }
}

impl Iterator for BitReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bits_remaining();
        (n, Some(n))
    }
}

/// Pack a bit sequence into bytes, zero-padding the last byte.
///
/// An empty sequence packs to no bytes and no padding.
pub fn pack<I>(bits: I) -> PackedBits
where
    I: IntoIterator<Item = bool>,
{
    let mut writer = BitWriter::new();
    for bit in bits {
        writer.write_bit(bit);
    }
    writer.finish()
}

/// Expand bytes into their bits, eight per byte, MSB-first.
///
/// Padding is not removed; callers drop the trailing `padding` bits.
pub fn unpack(bytes: &[u8]) -> Vec<bool> {
    BitReader::new(bytes).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_write_read_single_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b10110011, 8).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b10110011]);
        assert_eq!(packed.padding, 0);

        let mut reader = BitReader::new(&packed.bytes);
        assert_eq!(reader.read_bits(8).unwrap(), 0b10110011);
    }

    #[test]
    fn test_padding_count() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1, 1).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b1000_0000]);
        assert_eq!(packed.padding, 7);
        assert_eq!(packed.bit_len(), 1);
    }

    #[test]
    fn test_multi_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b1010101111110000, 16).unwrap();
        assert_eq!(writer.bit_len(), 16);

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b10101011, 0b11110000]);

        let mut reader = BitReader::new(&packed.bytes);
        assert_eq!(reader.read_bits(16).unwrap(), 0b1010101111110000);
    }

    #[test]
    fn test_reader_stops_before_padding() {
        let data = [0b1011_0000];
        let mut reader = BitReader::with_padding(&data, 4);

        assert_eq!(reader.bits_remaining(), 4);
        assert_eq!(reader.read_bits(4).unwrap(), 0b1011);
        assert!(reader.is_empty());
        assert!(reader.read_bit().is_err());
    }

    #[test]
    fn test_read_past_end() {
        let data = vec![0b10101010];
        let mut reader = BitReader::new(&data);

        assert_eq!(reader.read_bits(8).unwrap(), 0b10101010);
        assert!(reader.read_bits(1).is_err());
    }

    #[test]
    fn test_invalid_bit_count() {
        let mut writer = BitWriter::new();
        assert!(writer.write_bits(0, 65).is_err());

        let mut reader = BitReader::new(&[0u8; 16]);
        assert!(reader.read_bits(65).is_err());
    }

    #[test]
    fn test_64_bit_values() {
        let mut writer = BitWriter::new();
        let val = 0x123456789ABCDEF0u64;
        writer.write_bit(true);
        writer.write_bits(val, 64).unwrap();

        let packed = writer.finish();
        assert_eq!(packed.padding, 7);
        let mut reader = BitReader::with_padding(&packed.bytes, packed.padding);
        assert!(reader.read_bit().unwrap());
        assert_eq!(reader.read_bits(64).unwrap(), val);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_pack_pads_to_byte() {
        let packed = pack(bits("1110"));
        assert_eq!(packed.bytes, vec![0b1110_0000]);
        assert_eq!(packed.padding, 4);

        let packed = pack(bits("0000000011"));
        assert_eq!(packed.bytes, vec![0x00, 0b1100_0000]);
        assert_eq!(packed.padding, 6);
    }

    #[test]
    fn test_pack_empty() {
        let packed = pack(Vec::new());
        assert!(packed.bytes.is_empty());
        assert_eq!(packed.padding, 0);
        assert_eq!(packed.bit_len(), 0);
    }

    #[test]
    fn test_bit_len_padding_without_bytes() {
        let packed = PackedBits {
            bytes: Vec::new(),
            padding: 3,
        };
        assert_eq!(packed.bit_len(), 0);
    }

    #[test]
    fn test_write_bit_after_partial_byte() {
        let mut writer = BitWriter::new();
        writer.write_bits(0b101, 3).unwrap();
        for _ in 0..5 {
            writer.write_bit(true);
        }
        writer.write_bit(false);
        assert_eq!(writer.bit_len(), 9);

        let packed = writer.finish();
        assert_eq!(packed.bytes, vec![0b1011_1111, 0b0000_0000]);
        assert_eq!(packed.padding, 7);
    }

    #[test]
    fn test_unpack_expands_msb_first() {
        assert_eq!(unpack(&[0b1000_0001, 0xFF]), bits("1000000111111111"));
        assert!(unpack(&[]).is_empty());
    }

    #[test]
    fn test_unpack_then_trim_recovers_input() {
        let original = bits("10110");
        let packed = pack(original.clone());
        let mut unpacked = unpack(&packed.bytes);
        unpacked.truncate(unpacked.len() - packed.padding as usize);
        assert_eq!(unpacked, original);
    }
}
