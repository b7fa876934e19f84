//! E2E Test Suite 02: Reference Streams
//!
//! Pins the exact bytes each format uses for small inputs, in both
//! directions:
//! - decoding hand-assembled streams
//! - encoding inputs whose optimal token sequence is unambiguous
//!
//! Any change to flag order, token packing or displacement encoding shows
//! up here as a byte-level diff.

use lzforge::decode::{
    HuffmanDecoder, IrLzDecoder, Lz10Decoder, Lzss01Decoder, RleDecoder, SpikeChunsoftDecoder, SymbolDepth,
};
use lzforge::encode::{
    HuffmanEncoder, IrLzEncoder, Lz10Encoder, Lzss01Encoder, RleEncoder, SpikeChunsoftEncoder,
};
use lzforge::{decode_to_vec, encode_to_vec, Decoder, Encoder, LzSettings, ParseStrategy};

const ABC4: &[u8] = b"abcabcabcabc";

fn assert_stream(encoder: &dyn Encoder, decoder: &dyn Decoder, plain: &[u8], stream: &[u8]) {
    assert_eq!(encode_to_vec(encoder, plain).unwrap(), stream, "encoded bytes");
    assert_eq!(decode_to_vec(decoder, stream, Some(plain.len())).unwrap(), plain, "decoded bytes");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: literal-only streams
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lz10_literal_block() {
    let out = decode_to_vec(&Lz10Decoder, &[0x00, 0x41, 0x00, 0x10], Some(3)).unwrap();
    assert_eq!(out, [0x41, 0x00, 0x10]);
}

#[test]
fn test_literal_only_encodings() {
    // Nothing repeats, so every format writes its literal form.
    let plain = b"xyz";
    assert_stream(&Lz10Encoder::new(), &Lz10Decoder, plain, &[0x00, b'x', b'y', b'z']);
    assert_stream(&IrLzEncoder::new(), &IrLzDecoder, plain, &[0x00, b'x', b'y', b'z']);
    assert_stream(&Lzss01Encoder::new(), &Lzss01Decoder, plain, &[0x07, b'x', b'y', b'z']);
    assert_stream(&SpikeChunsoftEncoder::new(), &SpikeChunsoftDecoder, plain, &[0x03, b'x', b'y', b'z']);
    assert_stream(&RleEncoder, &RleDecoder, plain, &[0x02, b'x', b'y', b'z']);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: one literal stretch plus one match
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lz10_repeated_triplet() {
    // Flags 0b0001_0000, match length 9 (stored 6), displacement 3 (stored 2).
    let stream = [0x10, b'a', b'b', b'c', 0x60, 0x02];
    for strategy in [ParseStrategy::Greedy, ParseStrategy::Optimal] {
        let encoder = Lz10Encoder::new().with_settings(LzSettings::new().with_strategy(strategy));
        assert_stream(&encoder, &Lz10Decoder, ABC4, &stream);
    }
}

#[test]
fn test_irlz_repeated_triplet() {
    // Flags LSB first, bit 3 marks the match; length 9 (stored 7) sits in the
    // high nibble of the second byte.
    assert_stream(&IrLzEncoder::new(), &IrLzDecoder, ABC4, &[0x08, b'a', b'b', b'c', 0x02, 0x70]);
}

#[test]
fn test_lzss01_repeated_triplet() {
    // Three literal bits set; the match copies ring position 0xFEE, where
    // the first output byte was written.
    assert_stream(&Lzss01Encoder::new(), &Lzss01Decoder, ABC4, &[0x07, b'a', b'b', b'c', 0xEE, 0xF6]);
}

#[test]
fn test_spike_chunsoft_repeated_triplet() {
    // Raw block of three, a seven-byte match at displacement 3, then a
    // continue token for the last two bytes.
    assert_stream(
        &SpikeChunsoftEncoder::new(),
        &SpikeChunsoftDecoder,
        ABC4,
        &[0x03, b'a', b'b', b'c', 0xE0, 0x03, 0x62],
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: runs
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_rle_run_then_raw() {
    assert_stream(&RleEncoder, &RleDecoder, b"aaaaab", &[0x82, b'a', 0x00, b'b']);
}

#[test]
fn test_spike_chunsoft_run_token() {
    // 010XLLLL with X clear: a short run of 0x0B + 4 bytes.
    let out = decode_to_vec(&SpikeChunsoftDecoder, &[0x4B, 0x7E], None).unwrap();
    assert_eq!(out, vec![0x7E; 15]);
    // X set: twelve more length bits in the next byte.
    let out = decode_to_vec(&SpikeChunsoftDecoder, &[0x51, 0x00, 0x7E], None).unwrap();
    assert_eq!(out, vec![0x7E; 0x104]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: Huffman
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_huffman_two_symbol_stream() {
    // One node pair under a root with two leaf flags: 'A' on bit 0, 'B' on
    // bit 1. Bits 0 1 1 fill the top of one little-endian word.
    let stream = [0x01, 0xC0, b'A', b'B', 0x00, 0x00, 0x00, 0x60];
    let encoder = HuffmanEncoder::new(SymbolDepth::Eight);
    let decoder = HuffmanDecoder::new(SymbolDepth::Eight);
    assert_stream(&encoder, &decoder, b"ABB", &stream);
}
