//! Integration tests for the full codec pipeline.
//!
//! These tests verify end-to-end behavior: bytes -> frequency table -> tree ->
//! codes -> packed container -> parse -> tree walk -> bytes, with verification
//! that output matches input.

use huffpack_core::{
    bitio::{pack, unpack},
    decode, encode,
    error::{CorruptError, Error, ErrorKind},
    CodeTable, Compressor, Container, FrequencyTable, HuffmanTree,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Walk the pipeline by hand, stage by stage, and compare with `encode`.
#[test]
fn test_manual_pipeline_matches_encode() {
    let input_data = b"hello world! this is a test of the full pipeline: aaaaaaaaaa bbbbb c";

    let table = FrequencyTable::build(input_data);
    assert_eq!(table.total(), input_data.len() as u64);

    let tree = HuffmanTree::build(&table).expect("tree build failed");
    let codes = CodeTable::derive(&tree).expect("code derivation failed");

    let bits: Vec<bool> = input_data
        .iter()
        .flat_map(|&b| {
            let code = codes.get(b).expect("every input byte has a code");
            (0..code.len()).rev().map(move |shift| (code.bits() >> shift) & 1 == 1)
        })
        .collect();
    let packed = pack(bits.iter().copied());

    let encoded = encode(input_data).expect("encode failed");
    let container = Container::parse(&encoded).expect("parse failed");
    assert_eq!(container.payload(), &packed.bytes[..]);
    assert_eq!(container.padding(), packed.padding);

    let mut unpacked = unpack(container.payload());
    unpacked.truncate(unpacked.len() - container.padding() as usize);
    assert_eq!(unpacked, bits);

    assert_eq!(decode(&encoded).expect("decode failed"), input_data);
}

/// All 256 byte values, including non-text bytes.
#[test]
fn test_all_symbols() {
    let input_data: Vec<u8> = (0..=255).collect();

    let encoded = encode(&input_data).expect("encode failed");
    let container = Container::parse(&encoded).expect("parse failed");
    assert_eq!(container.frequencies().len(), 256);
    // 256 equal weights -> 8-bit codes, no padding
    assert_eq!(container.payload().len(), 256);
    assert_eq!(container.padding(), 0);

    assert_eq!(decode(&encoded).expect("decode failed"), input_data);
}

#[test]
fn test_single_distinct_symbol() {
    let input_data = vec![b'A'; 300];

    let mut compressor = Compressor::new();
    compressor.load_source(input_data.clone());
    assert_eq!(compressor.code_table().unwrap().get(b'A').unwrap().to_string(), "0");

    let (encoded, _) = compressor.compress_to_vec().unwrap();
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.len(), 300);
    assert_eq!(decoded, input_data);
}

#[test]
fn test_literal_aaab() {
    let encoded = encode(b"aaab").unwrap();
    let container = Container::parse(&encoded).unwrap();
    let tree = HuffmanTree::build(container.frequencies()).unwrap();
    let codes = CodeTable::derive(&tree).unwrap();

    let a = codes.get(b'a').unwrap();
    let b = codes.get(b'b').unwrap();
    assert_eq!(a.len(), 1);
    assert!(b.len() >= a.len());
    assert!(!a.is_prefix_of(b) && !b.is_prefix_of(a));
    assert_eq!(decode(&encoded).unwrap(), b"aaab");

    // with a third symbol the frequent byte keeps one bit and the rare ones get two
    let codes = CodeTable::derive(&HuffmanTree::build(&FrequencyTable::build(b"aaabc")).unwrap())
        .unwrap();
    assert_eq!(codes.get(b'a').unwrap().len(), 1);
    assert_eq!(codes.get(b'b').unwrap().len(), 2);
}

#[test]
fn test_empty_input() {
    let result = encode(b"");
    assert!(matches!(result, Err(Error::EmptyInput)));
}

#[test]
fn test_payload_removed() {
    let encoded = encode(b"a perfectly good container").unwrap();
    let header_len = Container::parse(&encoded).unwrap().header_len();

    let err = decode(&encoded[..header_len]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Corrupt);
    assert!(matches!(err, Error::Corrupt(CorruptError::MissingPayload { .. })));
}

#[test]
fn test_magic_replaced() {
    let mut encoded = encode(b"some data").unwrap();
    for magic in [[0u8; 4], *b"HUF2", *b"huf1", [0xFF; 4]] {
        encoded[..4].copy_from_slice(&magic);
        assert_eq!(decode(&encoded).unwrap_err().kind(), ErrorKind::InvalidFormat);
    }
}

/// Truncating a container anywhere inside its header never panics and is
/// reported as a format error.
#[test]
fn test_every_header_truncation() {
    let encoded = encode(b"truncate me at every offset").unwrap();
    let header_len = Container::parse(&encoded).unwrap().header_len();

    for cut in 0..header_len {
        let kind = decode(&encoded[..cut]).unwrap_err().kind();
        if cut < 4 {
            assert_eq!(kind, ErrorKind::InvalidFormat, "cut at {cut}");
        } else {
            assert_eq!(kind, ErrorKind::Truncated, "cut at {cut}");
        }
    }
}

/// Random payload corruption either decodes to something or fails cleanly.
#[test]
fn test_corrupted_payload_never_panics() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let input_data: Vec<u8> = (0..2000).map(|_| rng.gen_range(b'a'..=b'k')).collect();
    let encoded = encode(&input_data).unwrap();
    let header_len = Container::parse(&encoded).unwrap().header_len();

    for _ in 0..200 {
        let mut corrupted = encoded.clone();
        let idx = rng.gen_range(header_len..corrupted.len());
        corrupted[idx] ^= 1 << rng.gen_range(0..8);
        if let Err(err) = decode(&corrupted) {
            assert_eq!(err.kind(), ErrorKind::Corrupt);
        }
    }
}

#[test]
fn test_large_random_data() {
    let mut rng = ChaCha8Rng::seed_from_u64(12345);
    let mut input_data = vec![0u8; 256 * 1024];
    rng.fill(&mut input_data[..]);

    let encoded = encode(&input_data).unwrap();
    // uniform bytes do not compress, but the container stays close in size
    assert!(encoded.len() < input_data.len() + 2048);
    assert_eq!(decode(&encoded).unwrap(), input_data);
}

#[test]
fn test_skewed_data_compresses() {
    let input_data = b"The quick brown fox jumps over the lazy dog. ".repeat(200);
    let encoded = encode(&input_data).unwrap();
    assert!(encoded.len() < input_data.len() * 3 / 4);
    assert_eq!(decode(&encoded).unwrap(), input_data);
}
