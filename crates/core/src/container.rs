//! HUF1 container serialization and the end-to-end codec.
//!
//! A container packages the frequency table with the packed code bits. The
//! table is enough to rebuild the tree, so neither the tree nor the codes are
//! stored.
//!
//! # Container Format
//!
//! All multi-byte integers are big-endian.
//!
//! ```text
//! +------------------+
//! | Magic (4 bytes)  |  0x48 0x55 0x46 0x31 ("HUF1")
//! +------------------+
//! | N (4)            |  u32 number of distinct symbols
//! +------------------+
//! | N x entry (5)    |  u8 symbol, u32 frequency
//! +------------------+
//! | padding (1)      |  zero bits appended to the payload (0-7)
//! +------------------+
//! | payload          |  packed code bits (rest of the file)
//! | (variable)       |
//! +------------------+
//! ```
//!
//! The sum of the frequencies is the number of symbols to decode; the
//! bitstream carries no end marker.

use tracing::debug;

use crate::bitio::{BitReader, BitWriter};
use crate::codes::CodeTable;
use crate::error::{CorruptError, Error, FormatError, HuffmanError, Result, Section};
use crate::frequency::FrequencyTable;
use crate::tree::HuffmanTree;

/// Magic number for containers: "HUF1"
pub const MAGIC: [u8; 4] = *b"HUF1";

const COUNT_SIZE: usize = 4;
const ENTRY_SIZE: usize = 5;
const PADDING_SIZE: usize = 1;

/// A parsed or freshly encoded container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    frequencies: FrequencyTable,
    /// Zero bits at the end of `payload` (0-7)
    padding: u8,
    payload: Vec<u8>,
}

impl Container {
    /// Compress `data` into a container.
    ///
    /// # Errors
    /// - `Error::EmptyInput` if `data` is empty
    /// - `Error::FrequencyOverflow` if a byte occurs more than `u32::MAX` times
    pub fn compress(data: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::build(data);
        let tree = HuffmanTree::build(&frequencies)?;
        let codes = CodeTable::derive(&tree)?;
        Self::encode_with(data, &frequencies, &codes)
    }

    /// Compress `data` with a table and codes already derived from it.
    ///
    /// `frequencies` must be the table of `data`; it is stored as-is.
    pub fn encode_with(data: &[u8], frequencies: &FrequencyTable, codes: &CodeTable) -> Result<Self> {
        if data.is_empty() || frequencies.is_empty() {
            return Err(Error::EmptyInput);
        }
        if let Some((symbol, count)) = frequencies.iter().find(|&(_, c)| c > u32::MAX as u64) {
            return Err(Error::FrequencyOverflow { symbol, count });
        }

        let payload_bits = codes.encoded_bits(frequencies);
        let mut writer = BitWriter::with_capacity(payload_bits.div_ceil(8) as usize);
        for &byte in data {
            let code = codes
                .get(byte)
                .ok_or(HuffmanError::SymbolNotInTable { symbol: byte })?;
            writer.write_code(code)?;
        }
        let packed = writer.finish();

        debug!(
            input_bytes = data.len(),
            symbols = frequencies.len(),
            payload_bytes = packed.bytes.len(),
            padding = packed.padding,
            "encoded container"
        );

        Ok(Self {
            frequencies: frequencies.clone(),
            padding: packed.padding,
            payload: packed.bytes,
        })
    }

    /// Parse a container from bytes.
    ///
    /// # Errors
    /// - `FormatError::InvalidMagic` if the first 4 bytes are not "HUF1"
    /// - `FormatError::Truncated` naming the header field that is cut short
    /// - `CorruptError::{ZeroFrequency, DuplicateSymbol}` for a bad table
    /// - `CorruptError::InvalidPadding` if padding is above 7, or non-zero
    ///   with no payload to pad
    /// - `CorruptError::MissingPayload` if symbols are declared but no payload follows
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MAGIC.len() || bytes[..MAGIC.len()] != MAGIC {
            return Err(FormatError::InvalidMagic {
                expected: MAGIC,
                actual: bytes[..bytes.len().min(MAGIC.len())].to_vec(),
            }
            .into());
        }

        let mut cursor = Cursor::new(&bytes[MAGIC.len()..]);

        let count = cursor.read_u32(Section::SymbolCount)?;

        let mut entries = Vec::with_capacity((count as usize).min(256));
        for index in 0..count {
            let entry = cursor.take(Section::Entry(index), ENTRY_SIZE)?;
            let frequency = u32::from_be_bytes([entry[1], entry[2], entry[3], entry[4]]);
            entries.push((entry[0], frequency as u64));
        }
        let frequencies = FrequencyTable::from_entries(entries)?;

        let padding = cursor.take(Section::Padding, PADDING_SIZE)?[0];
        if padding > 7 {
            return Err(CorruptError::InvalidPadding { padding }.into());
        }

        let payload = cursor.rest();
        let expected = frequencies.total();
        if payload.is_empty() && expected > 0 {
            return Err(CorruptError::MissingPayload { expected }.into());
        }
        if payload.is_empty() && padding != 0 {
            return Err(CorruptError::InvalidPadding { padding }.into());
        }

        Ok(Self {
            frequencies,
            padding,
            payload: payload.to_vec(),
        })
    }

    /// Serialize to the on-disk layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.header_len() + self.payload.len());

        out.extend_from_slice(&MAGIC);
        out.extend_from_slice(&(self.frequencies.len() as u32).to_be_bytes());
        for (symbol, count) in self.frequencies.iter() {
            out.push(symbol);
            // bounded by encode_with / parse
            out.extend_from_slice(&(count as u32).to_be_bytes());
        }
        out.push(self.padding);
        out.extend_from_slice(&self.payload);

        out
    }

    /// Recover the original bytes.
    ///
    /// # Errors
    /// - `CorruptError::InvalidNavigation` if a bit leads to an absent child
    /// - `CorruptError::PayloadExhausted` if the bits run out early
    pub fn decompress(&self) -> Result<Vec<u8>> {
        let expected = self.total_symbols();
        if expected == 0 {
            return Ok(Vec::new());
        }

        let tree = HuffmanTree::build(&self.frequencies)?;
        let root = tree.root();

        let mut reader = BitReader::with_padding(&self.payload, self.padding);
        // every symbol costs at least one bit
        let capacity = expected.min(reader.bits_remaining() as u64) as usize;
        let mut output = Vec::with_capacity(capacity);

        let mut node = root;
        while (output.len() as u64) < expected {
            let bit_position = reader.position();
            let Some(bit) = reader.next() else {
                return Err(CorruptError::PayloadExhausted {
                    expected,
                    decoded: output.len() as u64,
                }
                .into());
            };

            node = node
                .child(bit)
                .ok_or(CorruptError::InvalidNavigation { bit_position })?;

            if let Some(symbol) = node.symbol() {
                output.push(symbol);
                node = root;
            }
        }

        debug!(
            output_bytes = output.len(),
            unused_bits = reader.bits_remaining(),
            "decoded container"
        );

        Ok(output)
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn padding(&self) -> u8 {
        self.padding
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Size of everything before the payload.
    pub fn header_len(&self) -> usize {
        MAGIC.len() + COUNT_SIZE + ENTRY_SIZE * self.frequencies.len() + PADDING_SIZE
    }

    /// Number of symbols the payload encodes.
    pub fn total_symbols(&self) -> u64 {
        self.frequencies.total()
    }
}

/// Bounds-checked reader over the header bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    fn take(&mut self, section: Section, len: usize) -> Result<&'a [u8]> {
        if self.bytes.len() < len {
            return Err(FormatError::Truncated {
                section,
                required: len,
                actual: self.bytes.len(),
            }
            .into());
        }
        let (head, tail) = self.bytes.split_at(len);
        self.bytes = tail;
        Ok(head)
    }

    fn read_u32(&mut self, section: Section) -> Result<u32> {
        let b = self.take(section, COUNT_SIZE)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn rest(self) -> &'a [u8] {
        self.bytes
    }
}

/// Compress `data` into container bytes.
///
/// Text callers encode their text as UTF-8 first (see [`crate::text`]).
pub fn encode(data: &[u8]) -> Result<Vec<u8>> {
    Ok(Container::compress(data)?.to_bytes())
}

/// Decode container bytes back into the original data.
pub fn decode(bytes: &[u8]) -> Result<Vec<u8>> {
    Container::parse(bytes)?.decompress()
}
