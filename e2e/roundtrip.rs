//! E2E Test Suite 01: Encode / Decode Round Trips
//!
//! Runs every encoder against its decoder over realistic content:
//! - text, binary tables and long runs
//! - greedy and optimal parsing
//! - known and unknown decompressed size
//! - Huffman with every symbol depth, nibble order and word order
//! - data far larger than the 4 KiB windows

use lzforge::decode::{
    HuffmanDecoder, IrLzDecoder, Lz10Decoder, Lzss01Decoder, NibbleOrder, RleDecoder, SpikeChunsoftDecoder,
    SymbolDepth, WordOrder,
};
use lzforge::encode::{
    HuffmanEncoder, IrLzEncoder, Lz10Encoder, Lzss01Encoder, RleEncoder, SpikeChunsoftEncoder,
};
use lzforge::{decode_to_vec, encode_to_vec, Decoder, Encoder, LzSettings, ParseStrategy};

// ─────────────────────────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────────────────────────

fn text_corpus() -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..120 {
        out.extend_from_slice(b"The quick brown fox jumps over the lazy dog. ");
        out.extend_from_slice(format!("Line {i}: pack my box with five dozen liquor jugs.\n").as_bytes());
    }
    out
}

/// Little-endian record table with a slowly changing counter and padding.
fn binary_corpus() -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..700u32 {
        out.extend_from_slice(&(i * 16).to_le_bytes());
        out.extend_from_slice(&[0x01, 0x00, (i % 5) as u8, 0x00]);
        out.extend_from_slice(&[0u8; 8]);
    }
    out
}

fn run_heavy_corpus() -> Vec<u8> {
    let mut out = Vec::new();
    for i in 0..64u8 {
        out.extend(std::iter::repeat(i).take(5 + i as usize * 3));
        out.extend_from_slice(b"<>");
    }
    out
}

type Pair = (&'static str, Box<dyn Encoder>, Box<dyn Decoder>);

fn pair<E: Encoder + 'static, D: Decoder + 'static>(name: &'static str, encoder: E, decoder: D) -> Pair {
    (name, Box::new(encoder), Box::new(decoder))
}

fn lz_pairs(settings: LzSettings) -> Vec<Pair> {
    vec![
        pair("lz10", Lz10Encoder::new().with_settings(settings), Lz10Decoder),
        pair("irlz", IrLzEncoder::new().with_settings(settings), IrLzDecoder),
        pair("lzss01", Lzss01Encoder::new().with_settings(settings), Lzss01Decoder),
        pair("spike", SpikeChunsoftEncoder::new().with_settings(settings), SpikeChunsoftDecoder),
    ]
}

fn check_lz_round_trip(data: &[u8], settings: LzSettings) {
    for (name, encoder, decoder) in lz_pairs(settings) {
        let packed = encode_to_vec(encoder.as_ref(), data).unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(
            packed.len() < data.len(),
            "{name}: packed {} bytes from {}",
            packed.len(),
            data.len()
        );
        let sized = decode_to_vec(decoder.as_ref(), &packed, Some(data.len())).unwrap();
        assert!(sized == data, "{name}: sized decode differs");
        let unsized_ = decode_to_vec(decoder.as_ref(), &packed, None).unwrap();
        assert!(unsized_ == data, "{name}: unsized decode differs");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: LZ formats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lz_roundtrip_text_optimal() {
    check_lz_round_trip(&text_corpus(), LzSettings::new());
}

#[test]
fn test_lz_roundtrip_text_greedy() {
    check_lz_round_trip(&text_corpus(), LzSettings::new().with_strategy(ParseStrategy::Greedy));
}

#[test]
fn test_lz_roundtrip_binary_table() {
    check_lz_round_trip(&binary_corpus(), LzSettings::new().with_task_count(2));
}

#[test]
fn test_lz_roundtrip_runs() {
    check_lz_round_trip(&run_heavy_corpus(), LzSettings::new().with_task_count(1));
}

#[test]
fn test_lz_roundtrip_shallow_search() {
    check_lz_round_trip(&text_corpus(), LzSettings::new().with_search_depth(4));
}

#[test]
fn test_lz_tiny_inputs() {
    for len in 0..12usize {
        let data: Vec<u8> = (0..len).map(|i| b"ab"[i % 2]).collect();
        for (name, encoder, decoder) in lz_pairs(LzSettings::new().with_task_count(1)) {
            let packed = encode_to_vec(encoder.as_ref(), &data).unwrap();
            let out = decode_to_vec(decoder.as_ref(), &packed, Some(len)).unwrap();
            assert_eq!(out, data, "{name} at length {len}");
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: compression ratio on repetitive text
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_text_shrinks_to_a_third() {
    let data = text_corpus();
    for (name, encoder, _) in lz_pairs(LzSettings::new()) {
        let packed = encode_to_vec(encoder.as_ref(), &data).unwrap();
        assert!(packed.len() * 3 < data.len(), "{name}: {} of {}", packed.len(), data.len());
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: Huffman and RLE
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_huffman_roundtrip_every_layout() {
    let text = text_corpus();
    let binary = binary_corpus();
    for word_order in [WordOrder::LittleEndian, WordOrder::BigEndian] {
        let encoder = HuffmanEncoder::new(SymbolDepth::Eight).with_word_order(word_order);
        let decoder = HuffmanDecoder::new(SymbolDepth::Eight).with_word_order(word_order);
        let packed = encode_to_vec(&encoder, &text).unwrap();
        assert!(packed.len() < text.len());
        assert_eq!(decode_to_vec(&decoder, &packed, Some(text.len())).unwrap(), text);

        for nibble_order in [NibbleOrder::LowNibbleFirst, NibbleOrder::HighNibbleFirst] {
            let encoder = HuffmanEncoder::new(SymbolDepth::Four)
                .with_word_order(word_order)
                .with_nibble_order(nibble_order);
            let decoder = HuffmanDecoder::new(SymbolDepth::Four)
                .with_word_order(word_order)
                .with_nibble_order(nibble_order);
            let packed = encode_to_vec(&encoder, &binary).unwrap();
            assert_eq!(decode_to_vec(&decoder, &packed, Some(binary.len())).unwrap(), binary);
        }
    }
}

#[test]
fn test_rle_roundtrip() {
    for data in [run_heavy_corpus(), binary_corpus(), text_corpus()] {
        let packed = encode_to_vec(&RleEncoder, &data).unwrap();
        assert_eq!(decode_to_vec(&RleDecoder, &packed, None).unwrap(), data);
        assert_eq!(decode_to_vec(&RleDecoder, &packed, Some(data.len())).unwrap(), data);
    }
}

#[test]
fn test_rle_shrinks_runs() {
    let data = run_heavy_corpus();
    let packed = encode_to_vec(&RleEncoder, &data).unwrap();
    assert!(packed.len() * 4 < data.len());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: chained formats
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_lz10_then_huffman() {
    let data = text_corpus();
    let lz = encode_to_vec(&Lz10Encoder::new(), &data).unwrap();
    let packed = encode_to_vec(&HuffmanEncoder::new(SymbolDepth::Four), &lz).unwrap();

    let lz_back = decode_to_vec(&HuffmanDecoder::new(SymbolDepth::Four), &packed, Some(lz.len())).unwrap();
    assert_eq!(decode_to_vec(&Lz10Decoder, &lz_back, Some(data.len())).unwrap(), data);
}
