// Integration tests for the Huffman decoder: tree walking, symbol depths,
// nibble orders, word byte orders and table-bound checks.

use lzforge::decode::{decode_to_vec, HuffmanDecoder, NibbleOrder, SymbolDepth, WordOrder};
use lzforge::Error;

/// Three-symbol tree: 'x' is `0`, 'y' is `10`, 'z' is `11`.
///
/// Root (address 1) points at pair 0 (addresses 2, 3): leaf 'x' and an
/// internal node with offset 0, whose pair 1 (addresses 4, 5) holds 'y', 'z'.
const THREE_SYMBOLS: [u8; 6] = [0x02, 0x80, b'x', 0xC0, b'y', b'z'];

fn stream(table: &[u8], words: &[u32]) -> Vec<u8> {
    let mut out = table.to_vec();
    for w in words {
        out.extend_from_slice(&w.to_le_bytes());
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Tree walk
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn walks_nested_nodes() {
    // x y z x -> 0 10 11 0
    let input = stream(&THREE_SYMBOLS, &[0b0101_1000u32 << 24]);
    let out = decode_to_vec(&HuffmanDecoder::new(SymbolDepth::Eight), &input, Some(4)).unwrap();
    assert_eq!(out, b"xyzx");
}

#[test]
fn codes_span_word_boundaries() {
    // 16 'z' symbols fill exactly one word; the 17th needs a second word.
    let input = stream(&THREE_SYMBOLS, &[u32::MAX, 0x4000_0000]);
    let out = decode_to_vec(&HuffmanDecoder::new(SymbolDepth::Eight), &input, Some(17)).unwrap();
    let mut expected = vec![b'z'; 16];
    expected.push(b'x');
    assert_eq!(out, expected);
}

#[test]
fn big_endian_words_are_supported() {
    let mut input = THREE_SYMBOLS.to_vec();
    input.extend_from_slice(&(0b0101_1000u32 << 24).to_be_bytes());
    let decoder = HuffmanDecoder::new(SymbolDepth::Eight).with_word_order(WordOrder::BigEndian);
    assert_eq!(decode_to_vec(&decoder, &input, Some(4)).unwrap(), b"xyzx");
}

// ─────────────────────────────────────────────────────────────────────────────
// Four-bit symbols
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn nibble_orders() {
    let table = [0x02, 0x80, 0x0A, 0xC0, 0x0B, 0x0C];
    // A B C A -> 0 10 11 0
    let input = stream(&table, &[0b0101_1000u32 << 24]);
    let low = HuffmanDecoder::new(SymbolDepth::Four);
    assert_eq!(decode_to_vec(&low, &input, Some(2)).unwrap(), [0xBA, 0xAC]);
    let high = low.with_nibble_order(NibbleOrder::HighNibbleFirst);
    assert_eq!(decode_to_vec(&high, &input, Some(2)).unwrap(), [0xAB, 0xCA]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Failures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn missing_size_is_an_error() {
    let err = decode_to_vec(&HuffmanDecoder::default(), &THREE_SYMBOLS, None).unwrap_err();
    assert!(matches!(err, Error::SizeRequired { format: "huffman" }));
}

#[test]
fn truncated_table() {
    let err = decode_to_vec(&HuffmanDecoder::default(), &THREE_SYMBOLS[..4], Some(1)).unwrap_err();
    assert!(matches!(err, Error::StreamTooShort { offset: 4 }));
}

#[test]
fn truncated_bit_stream() {
    let input = stream(&THREE_SYMBOLS, &[0]);
    // 32 'x' fit in one word, a 33rd does not.
    let err = decode_to_vec(&HuffmanDecoder::default(), &input, Some(33)).unwrap_err();
    assert!(matches!(err, Error::StreamTooShort { .. }));
}

#[test]
fn node_offset_outside_table() {
    let table = [0x02, 0x80, b'x', 0x3F, b'y', b'z'];
    let input = stream(&table, &[u32::MAX]);
    let err = decode_to_vec(&HuffmanDecoder::default(), &input, Some(1)).unwrap_err();
    match err {
        Error::CorruptHuffmanTree { address, table_len } => {
            assert_eq!(table_len, 6);
            assert!(address >= table_len);
        }
        other => panic!("expected CorruptHuffmanTree, got {other:?}"),
    }
}
