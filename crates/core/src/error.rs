//! Error types for the huffpack codec.
//!
//! All operations return structured errors rather than panicking. Every
//! structural check on a container reports which part of the layout failed,
//! so a caller can tell a bad magic from a short entry table from a payload
//! that walks off the tree.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all operations in the crate.
///
/// Each variant corresponds to a failure domain:
/// - Input: nothing to compress, or a session used before loading input
/// - Format: the container header is unrecognised or shorter than declared
/// - Corrupt: the header parsed but its contents cannot be decoded
/// - Huffman: tree or code table construction failures
/// - Bit I/O: reading/writing bits from/to byte buffers
/// - I/O: file system operations
#[derive(Debug, Error)]
pub enum Error {
    /// No bytes to compress; no container is produced
    #[error("empty input: nothing to compress")]
    EmptyInput,

    /// A session operation needs a loaded source first
    #[error("no source loaded: call load_source or load_file first")]
    NoSource,

    /// Source or container path does not exist
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Container header is not recognised or is cut short
    #[error("container format error: {0}")]
    Format(#[from] FormatError),

    /// Container parsed but its contents are inconsistent
    #[error("corrupt container: {0}")]
    Corrupt(#[from] CorruptError),

    /// Huffman tree or code table error
    #[error("huffman codec error: {0}")]
    Huffman(#[from] HuffmanError),

    /// Bit I/O operation failed (e.g., reading past end of buffer)
    #[error("bit I/O error: {0}")]
    BitIo(#[from] BitIoError),

    /// A symbol count does not fit the 32-bit frequency field
    #[error("frequency of symbol {symbol:#04x} is {count}, above the u32 limit of the container")]
    FrequencyOverflow { symbol: u8, count: u64 },

    /// Recovered bytes are not valid UTF-8
    #[error("text decode error: {0}")]
    TextDecode(#[from] std::string::FromUtf8Error),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], for callers that only need to
/// decide how to report a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    EmptyInput,
    NotFound,
    InvalidFormat,
    Truncated,
    Corrupt,
    TextDecodeFailure,
    Usage,
    Io,
    Internal,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Format(FormatError::InvalidMagic { .. }) => ErrorKind::InvalidFormat,
            Error::Format(FormatError::Truncated { .. }) => ErrorKind::Truncated,
            Error::Corrupt(_) => ErrorKind::Corrupt,
            Error::TextDecode(_) => ErrorKind::TextDecodeFailure,
            Error::NoSource | Error::Config(_) => ErrorKind::Usage,
            Error::Io(_) => ErrorKind::Io,
            Error::Huffman(_) | Error::BitIo(_) | Error::FrequencyOverflow { .. } => {
                ErrorKind::Internal
            }
        }
    }
}

/// Part of the container layout that a header check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// 4-byte distinct symbol count
    SymbolCount,
    /// One 5-byte (symbol, frequency) entry, by index
    Entry(u32),
    /// 1-byte padding bit count
    Padding,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::SymbolCount => f.write_str("symbol count"),
            Section::Entry(index) => write!(f, "frequency entry {index}"),
            Section::Padding => f.write_str("padding byte"),
        }
    }
}

/// Container header errors.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Invalid magic number in header
    #[error("invalid magic number: expected {expected:?}, got {actual:?}")]
    InvalidMagic { expected: [u8; 4], actual: Vec<u8> },

    /// Container ends inside a header field
    #[error("truncated {section}: need {required} bytes, got {actual}")]
    Truncated {
        section: Section,
        required: usize,
        actual: usize,
    },
}

/// Errors in a container whose header parsed.
#[derive(Debug, Error)]
pub enum CorruptError {
    /// An entry declares a symbol that never occurs
    #[error("symbol {symbol:#04x} has zero frequency")]
    ZeroFrequency { symbol: u8 },

    /// Two entries declare the same symbol
    #[error("symbol {symbol:#04x} appears twice in the frequency table")]
    DuplicateSymbol { symbol: u8 },

    /// Padding count outside 0..=7
    #[error("padding count {padding} is outside 0..=7")]
    InvalidPadding { padding: u8 },

    /// Header promises symbols but no payload follows
    #[error("missing payload: header declares {expected} symbols")]
    MissingPayload { expected: u64 },

    /// A payload bit leads to an absent child
    #[error("invalid tree navigation at bit {bit_position}")]
    InvalidNavigation { bit_position: usize },

    /// Payload ran out before every declared symbol was decoded
    #[error("payload exhausted: expected {expected} symbols, decoded {decoded}")]
    PayloadExhausted { expected: u64, decoded: u64 },
}

/// Huffman tree and code table errors.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Code length exceeds what a single code word can hold
    #[error("code length {length} exceeds maximum {max}")]
    CodeLengthTooLong { length: usize, max: usize },

    /// Byte has no code in the table used for encoding
    #[error("symbol {symbol:#04x} not in code table")]
    SymbolNotInTable { symbol: u8 },
}

/// Bit-level I/O errors.
#[derive(Debug, Error)]
pub enum BitIoError {
    /// Attempted to read past the end of the buffer
    #[error("unexpected end of bit stream")]
    UnexpectedEof,

    /// Invalid bit count (e.g., more than 64 bits)
    #[error("invalid bit count: {0}")]
    InvalidBitCount(usize),
}

/// Type alias for Result with our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(Error::EmptyInput.kind(), ErrorKind::EmptyInput);
        assert_eq!(
            Error::from(FormatError::InvalidMagic {
                expected: *b"HUF1",
                actual: b"XXXX".to_vec(),
            })
            .kind(),
            ErrorKind::InvalidFormat
        );
        assert_eq!(
            Error::from(FormatError::Truncated {
                section: Section::Padding,
                required: 1,
                actual: 0,
            })
            .kind(),
            ErrorKind::Truncated
        );
        assert_eq!(
            Error::from(CorruptError::InvalidNavigation { bit_position: 3 }).kind(),
            ErrorKind::Corrupt
        );
        assert_eq!(Error::NoSource.kind(), ErrorKind::Usage);
    }

    #[test]
    fn test_messages_name_the_section() {
        let err = Error::from(FormatError::Truncated {
            section: Section::Entry(2),
            required: 5,
            actual: 3,
        });
        assert_eq!(
            err.to_string(),
            "container format error: truncated frequency entry 2: need 5 bytes, got 3"
        );
    }
}
