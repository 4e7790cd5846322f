//! File-level compressor session.
//!
//! A [`Compressor`] holds one loaded source and lazily builds its frequency
//! table, tree and code table. The three caches describe the loaded bytes
//! only; loading new bytes clears all of them at once. Decompression needs no
//! session and is a free function.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::codes::CodeTable;
use crate::container::Container;
use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;
use crate::metrics::{Metrics, Operation};
use crate::text::{self, TextEncoding};
use crate::tree::HuffmanTree;

#[derive(Debug, Default)]
pub struct Compressor {
    source: Option<Vec<u8>>,
    frequencies: Option<FrequencyTable>,
    tree: Option<HuffmanTree>,
    codes: Option<CodeTable>,
}

impl Compressor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the loaded source, dropping every cached structure.
    pub fn load_source(&mut self, bytes: impl Into<Vec<u8>>) {
        let bytes = bytes.into();
        debug!(bytes = bytes.len(), "loaded source");
        self.source = Some(bytes);
        self.frequencies = None;
        self.tree = None;
        self.codes = None;
    }

    /// Load the contents of `path` as the source.
    ///
    /// # Errors
    /// `Error::NotFound` if `path` does not exist.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let bytes = read_file(path.as_ref())?;
        self.load_source(bytes);
        Ok(())
    }

    pub fn source(&self) -> Option<&[u8]> {
        self.source.as_deref()
    }

    /// Frequency table of the source, built on first use.
    pub fn frequency_table(&mut self) -> Result<&FrequencyTable> {
        let source = self.source.as_deref().ok_or(Error::NoSource)?;
        Ok(self
            .frequencies
            .get_or_insert_with(|| FrequencyTable::build(source)))
    }

    /// Huffman tree of the source, built on first use.
    ///
    /// # Errors
    /// `Error::EmptyInput` if the source is empty.
    pub fn tree(&mut self) -> Result<&HuffmanTree> {
        let tree = match self.tree.take() {
            Some(tree) => tree,
            None => HuffmanTree::build(self.frequency_table()?)?,
        };
        Ok(self.tree.insert(tree))
    }

    /// Code table of the source, built on first use.
    pub fn code_table(&mut self) -> Result<&CodeTable> {
        let codes = match self.codes.take() {
            Some(codes) => codes,
            None => CodeTable::derive(self.tree()?)?,
        };
        Ok(self.codes.insert(codes))
    }

    /// Compress the source into container bytes.
    pub fn compress_to_vec(&mut self) -> Result<(Vec<u8>, Metrics)> {
        let mut metrics = Metrics::new(Operation::Compress);

        self.code_table()?;
        let (Some(source), Some(frequencies), Some(codes)) =
            (self.source.as_deref(), self.frequencies.as_ref(), self.codes.as_ref())
        else {
            return Err(Error::NoSource);
        };

        let container = Container::encode_with(source, frequencies, codes)?;
        metrics.record_raw(source);
        metrics.record_container(&container);
        let bytes = container.to_bytes();
        metrics.complete();

        Ok((bytes, metrics))
    }

    /// Compress the source and write the container to `output`.
    ///
    /// The container is fully encoded before `output` is created, so a failed
    /// compression leaves nothing on disk.
    pub fn compress(&mut self, output: impl AsRef<Path>) -> Result<Metrics> {
        let output = output.as_ref();
        let (bytes, metrics) = self.compress_to_vec()?;
        fs::write(output, &bytes)?;

        info!(
            path = %output.display(),
            raw_bytes = metrics.raw_bytes,
            container_bytes = metrics.container_bytes,
            "wrote container"
        );
        Ok(metrics)
    }
}

/// Decompress the container at `container_path` into `output_path`.
///
/// # Errors
/// `Error::NotFound` if the container does not exist, plus every error of
/// [`Container::parse`] and [`Container::decompress`].
pub fn decompress(container_path: impl AsRef<Path>, output_path: impl AsRef<Path>) -> Result<Metrics> {
    let (raw, metrics) = decompress_file(container_path.as_ref())?;
    let output_path = output_path.as_ref();
    fs::write(output_path, &raw)?;

    info!(path = %output_path.display(), raw_bytes = metrics.raw_bytes, "wrote decompressed data");
    Ok(metrics)
}

/// Decompress the container at `container_path` and write it as UTF-8 text,
/// reinterpreting non-UTF-8 data as Latin-1.
///
/// Returns the encoding the recovered bytes were read with.
pub fn decompress_to_text(
    container_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
) -> Result<(Metrics, TextEncoding)> {
    let (raw, metrics) = decompress_file(container_path.as_ref())?;
    let decoded = text::decode_text(&raw);
    let output_path = output_path.as_ref();
    fs::write(output_path, decoded.text.as_bytes())?;

    info!(
        path = %output_path.display(),
        encoding = ?decoded.encoding,
        "wrote decompressed text"
    );
    Ok((metrics, decoded.encoding))
}

fn decompress_file(container_path: &Path) -> Result<(Vec<u8>, Metrics)> {
    let mut metrics = Metrics::new(Operation::Decompress);

    let bytes = read_file(container_path)?;
    let container = Container::parse(&bytes)?;
    let raw = container.decompress()?;

    metrics.record_container(&container);
    metrics.record_raw(&raw);
    metrics.complete();
    Ok((raw, metrics))
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::NotFound {
            path: path.to_path_buf(),
        },
        _ => Error::Io(err),
    })
}
