//! Metrics for a single compress or decompress operation.
//!
//! Tracks sizes on both sides of the codec, the shape of the code, a CRC32
//! fingerprint of the raw bytes and timing. A compress and the matching
//! decompress report the same `raw_crc32`, which gives callers a cheap
//! end-to-end check.
//!
//! # Thread Safety
//!
//! `Metrics` is a plain value owned by the operation that fills it in.

use std::fmt;
use std::time::{Duration, Instant};

use crate::container::Container;

/// Which direction the codec ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Decompress,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Compress => f.write_str("compress"),
            Operation::Decompress => f.write_str("decompress"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Metrics {
    pub operation: Operation,

    // === Timing ===
    pub start_time: Instant,
    pub end_time: Option<Instant>,

    // === Sizes ===
    /// Uncompressed bytes (input of compress, output of decompress)
    pub raw_bytes: u64,
    /// Whole container, header included
    pub container_bytes: u64,
    /// Container bytes before the payload
    pub header_bytes: u64,
    /// Meaningful payload bits (padding excluded)
    pub payload_bits: u64,
    /// Zero bits appended to the last payload byte
    pub padding_bits: u8,

    // === Code shape ===
    pub distinct_symbols: usize,

    // === Integrity ===
    /// CRC32 of the raw bytes
    pub raw_crc32: u32,
}

impl Metrics {
    /// Create new metrics with start time set to now.
    pub fn new(operation: Operation) -> Self {
        Self {
            operation,
            start_time: Instant::now(),
            end_time: None,
            raw_bytes: 0,
            container_bytes: 0,
            header_bytes: 0,
            payload_bits: 0,
            padding_bits: 0,
            distinct_symbols: 0,
            raw_crc32: 0,
        }
    }

    /// Record the uncompressed side.
    pub fn record_raw(&mut self, raw: &[u8]) {
        self.raw_bytes = raw.len() as u64;
        self.raw_crc32 = crc32fast::hash(raw);
    }

    /// Record the compressed side.
    pub fn record_container(&mut self, container: &Container) {
        self.header_bytes = container.header_len() as u64;
        self.container_bytes = self.header_bytes + container.payload().len() as u64;
        self.padding_bits = container.padding();
        self.payload_bits = (container.payload().len() as u64 * 8).saturating_sub(container.padding() as u64);
        self.distinct_symbols = container.frequencies().len();
    }

    /// Mark the operation as complete.
    pub fn complete(&mut self) {
        self.end_time = Some(Instant::now());
    }

    /// Total duration (or current elapsed if not complete).
    pub fn duration(&self) -> Duration {
        match self.end_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Compression ratio (container / raw); 0.0 when there is no raw data.
    pub fn compression_ratio(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.container_bytes as f64 / self.raw_bytes as f64
        }
    }

    /// Average code length over the input.
    pub fn bits_per_symbol(&self) -> f64 {
        if self.raw_bytes == 0 {
            0.0
        } else {
            self.payload_bits as f64 / self.raw_bytes as f64
        }
    }

    /// Raw bytes processed per second.
    pub fn throughput_bps(&self) -> f64 {
        let duration_secs = self.duration().as_secs_f64();
        if duration_secs == 0.0 {
            0.0
        } else {
            self.raw_bytes as f64 / duration_secs
        }
    }

    /// Export metrics as `key=value` lines.
    pub fn export_text(&self) -> String {
        format!(
            "operation={}\n\
             duration_ms={}\n\
             raw_bytes={}\n\
             container_bytes={}\n\
             header_bytes={}\n\
             payload_bits={}\n\
             padding_bits={}\n\
             distinct_symbols={}\n\
             compression_ratio={:.4}\n\
             bits_per_symbol={:.4}\n\
             throughput_bps={:.0}\n\
             raw_crc32={:08x}\n",
            self.operation,
            self.duration().as_millis(),
            self.raw_bytes,
            self.container_bytes,
            self.header_bytes,
            self.payload_bits,
            self.padding_bits,
            self.distinct_symbols,
            self.compression_ratio(),
            self.bits_per_symbol(),
            self.throughput_bps(),
            self.raw_crc32,
        )
    }
}
