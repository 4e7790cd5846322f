//! huffpack-core: Huffman compression with a self-describing container
//!
//! This library provides:
//! - Byte frequency counting in first-occurrence order
//! - Deterministic Huffman tree construction and code derivation
//! - MSB-first bit packing with explicit padding
//! - The HUF1 container, which stores only the frequency table and lets the
//!   decoder rebuild the identical tree
//!
//! # Architecture
//!
//! - `frequency`: symbol counting
//! - `tree`: priority-queue tree builder
//! - `codes`: code table derivation
//! - `bitio`: low-level bit reading/writing
//! - `container`: HUF1 serialization and the end-to-end codec
//! - `session`: file-level compressor with cached intermediate structures
//! - `text`: UTF-8 / Latin-1 framing for text callers
//! - `metrics`: per-operation sizes, timing and checksums
//!
//! # Example
//! ```
//! let packed = huffpack_core::encode(b"abracadabra").unwrap();
//! assert_eq!(&packed[..4], b"HUF1");
//! assert_eq!(huffpack_core::decode(&packed).unwrap(), b"abracadabra");
//! ```
//!
//! # Design Principles
//!
//! - **No panics**: all errors are structured and recoverable
//! - **Deterministic**: identical input always yields identical containers
//! - **Fail before writing**: an encode error never leaves a partial container

pub mod bitio;
pub mod codes;
pub mod container;
pub mod error;
pub mod frequency;
pub mod metrics;
pub mod session;
pub mod text;
pub mod tree;

// Re-export commonly used types
pub use codes::{Code, CodeTable};
pub use container::{decode, encode, Container};
pub use error::{Error, ErrorKind, Result};
pub use frequency::FrequencyTable;
pub use metrics::Metrics;
pub use session::{decompress, decompress_to_text, Compressor};
pub use tree::HuffmanTree;
