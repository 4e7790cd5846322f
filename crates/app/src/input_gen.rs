//! Sample input generation.
//!
//! `huffpack sample` writes reproducible inputs for trying the codec:
//! - `Mixed`: runs of one byte, small-alphabet text, repeating patterns and
//!   random bytes, so different sections compress very differently
//! - `Text`: UTF-8 prose built from a word list with accented characters,
//!   for exercising `decompress --text`

use std::path::Path;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Kind of sample to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Mixed,
    Text,
}

const WORDS: &[&str] = &[
    "árvore", "código", "compressão", "frequência", "símbolo", "huffman", "bits", "bytes", "tabela",
    "prefixo", "folha", "nó", "raiz", "peso", "arquivo", "dados", "the", "tree", "of", "and",
];

/// Generate exactly `size_bytes` bytes of the given kind.
pub fn generate_sample_data(kind: SampleKind, seed: u64, size_bytes: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut data = match kind {
        SampleKind::Mixed => mixed(&mut rng, size_bytes),
        SampleKind::Text => text(&mut rng, size_bytes),
    };
    data.truncate(size_bytes);
    data
}

fn mixed(rng: &mut ChaCha8Rng, size_bytes: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(size_bytes);

    while data.len() < size_bytes {
        let section = (size_bytes - data.len()).min(4096);

        match rng.gen_range(0..10) {
            // runs of one byte
            0..=2 => {
                let byte: u8 = rng.gen();
                data.extend(std::iter::repeat(byte).take(section));
            }
            // small alphabet
            3..=5 => {
                let alphabet = b"etaoin shrdlu\n";
                data.extend((0..section).map(|_| alphabet[rng.gen_range(0..alphabet.len())]));
            }
            // short repeating pattern
            6..=7 => {
                let pattern: Vec<u8> = (0..rng.gen_range(4..=32)).map(|_| rng.gen()).collect();
                data.extend(pattern.iter().cycle().take(section));
            }
            // random bytes
            _ => data.extend((0..section).map(|_| rng.gen::<u8>())),
        }
    }

    data
}

fn text(rng: &mut ChaCha8Rng, size_bytes: usize) -> Vec<u8> {
    let mut out = String::with_capacity(size_bytes + 16);

    while out.len() < size_bytes {
        out.push_str(WORDS[rng.gen_range(0..WORDS.len())]);
        out.push(if rng.gen_ratio(1, 12) { '\n' } else { ' ' });
    }

    // keep the result valid UTF-8 after truncation
    let mut end = size_bytes.min(out.len());
    while !out.is_char_boundary(end) {
        end -= 1;
    }
    out.truncate(end);
    out.into_bytes()
}

/// Write generated data to `path`, returning the number of bytes written.
pub fn write_sample_file(path: &Path, kind: SampleKind, seed: u64, size_bytes: usize) -> std::io::Result<usize> {
    let data = generate_sample_data(kind, seed, size_bytes);
    std::fs::write(path, &data)?;
    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_size() {
        for size in [0, 1, 100, 4096, 10_000] {
            assert_eq!(generate_sample_data(SampleKind::Mixed, 999, size).len(), size);
        }
    }

    #[test]
    fn test_determinism() {
        let data1 = generate_sample_data(SampleKind::Mixed, 12345, 5000);
        let data2 = generate_sample_data(SampleKind::Mixed, 12345, 5000);
        assert_eq!(data1, data2);
    }

    #[test]
    fn test_different_seeds() {
        let data1 = generate_sample_data(SampleKind::Mixed, 1, 1000);
        let data2 = generate_sample_data(SampleKind::Mixed, 2, 1000);
        assert_ne!(data1, data2);
    }

    #[test]
    fn test_text_is_utf8() {
        for size in [0, 1, 7, 333, 5000] {
            let data = generate_sample_data(SampleKind::Text, 3, size);
            assert!(data.len() <= size);
            assert!(size - data.len() < 4);
            assert!(String::from_utf8(data).is_ok());
        }
    }
}
