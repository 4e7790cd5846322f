//! Text framing around the byte codec.
//!
//! The codec only promises byte-exact round trips. Callers that handle text
//! encode it as UTF-8 before compressing and turn recovered bytes back into
//! text with [`decode_text`], which falls back to Latin-1 when the bytes are
//! not valid UTF-8. The fallback always yields a string but is not guaranteed
//! to match what the original producer meant.

use tracing::warn;

use crate::error::Result;

/// Encoding that produced a [`DecodedText`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    /// ISO-8859-1: each byte maps to the code point of the same value
    Latin1,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
}

/// Bytes to feed the codec for `text`.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Strict UTF-8 decoding.
///
/// # Errors
/// `Error::TextDecode` if `bytes` is not valid UTF-8.
pub fn decode_utf8(bytes: &[u8]) -> Result<String> {
    Ok(String::from_utf8(bytes.to_vec())?)
}

/// UTF-8 decoding with a Latin-1 fallback. Never fails.
pub fn decode_text(bytes: &[u8]) -> DecodedText {
    match decode_utf8(bytes) {
        Ok(text) => DecodedText {
            text,
            encoding: TextEncoding::Utf8,
        },
        Err(err) => {
            warn!(error = %err, "recovered bytes are not UTF-8, decoding as Latin-1");
            DecodedText {
                text: bytes.iter().map(|&b| b as char).collect(),
                encoding: TextEncoding::Latin1,
            }
        }
    }
}
