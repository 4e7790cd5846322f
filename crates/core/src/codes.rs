//! Code table derivation.
//!
//! One traversal of the tree assigns each leaf the path that reaches it:
//! `0` for a left edge, `1` for a right edge. Because every symbol sits at a
//! leaf, no code is a prefix of another.

use std::fmt;

use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{HuffmanTree, Node};

/// Longest code a [`Code`] can hold.
pub const MAX_CODE_LEN: usize = 64;

/// A Huffman code word: `len` bits stored right-aligned in `bits`, written
/// most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code {
    bits: u64,
    len: u8,
}

impl Code {
    /// The right-aligned code bits.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of bits, 1..=64.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// Companion to [`Code::len`]; a derived code always has at least one bit,
    /// so this is false for every entry of a [`CodeTable`].
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `self` is a prefix of `other` (a code is a prefix of itself).
    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits >> (other.len - self.len) == self.bits
    }
}

impl fmt::Display for Code {
    /// Renders the code as `0`/`1` digits, e.g. `011`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for shift in (0..self.len).rev() {
            let digit = if (self.bits >> shift) & 1 == 1 { '1' } else { '0' };
            fmt::Write::write_char(f, digit)?;
        }
        Ok(())
    }
}

/// Mapping from byte value to its code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: [Option<Code>; 256],
    len: usize,
}

impl CodeTable {
    /// Derive codes from `tree`.
    ///
    /// # Errors
    /// `HuffmanError::CodeLengthTooLong` if a leaf lies deeper than
    /// [`MAX_CODE_LEN`].
    pub fn derive(tree: &HuffmanTree) -> Result<Self> {
        let mut table = Self {
            codes: [None; 256],
            len: 0,
        };
        table.visit(tree.root(), 0, 0)?;
        Ok(table)
    }

    fn visit(&mut self, node: &Node, bits: u64, depth: usize) -> Result<()> {
        if depth > MAX_CODE_LEN {
            return Err(HuffmanError::CodeLengthTooLong {
                length: depth,
                max: MAX_CODE_LEN,
            }
            .into());
        }

        match node {
            Node::Leaf { symbol, .. } => {
                // a bare leaf root would have an empty path
                let code = if depth == 0 {
                    Code { bits: 0, len: 1 }
                } else {
                    Code {
                        bits,
                        len: depth as u8,
                    }
                };
                if self.codes[*symbol as usize].replace(code).is_none() {
                    self.len += 1;
                }
                Ok(())
            }
            Node::Internal { left, right, .. } => {
                self.visit(left, bits << 1, depth + 1)?;
                if let Some(right) = right {
                    self.visit(right, (bits << 1) | 1, depth + 1)?;
                }
                Ok(())
            }
        }
    }

    /// Code for `symbol`, if it has one.
    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    /// Number of symbols with a code.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// (symbol, code) pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter_map(|(symbol, code)| code.as_ref().map(|code| (symbol as u8, code)))
    }

    /// Exact payload length in bits for input described by `table`.
    ///
    /// Symbols without a code contribute nothing.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table
            .iter()
            .filter_map(|(symbol, count)| self.get(symbol).map(|code| count * code.len() as u64))
            .sum()
    }
}
