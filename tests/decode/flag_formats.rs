// Integration tests for the flag-byte decoders (Lz10, IrLz, Lzss01).
//
// Streams here are written by hand so each test pins one detail of the
// token layout: flag bit order, what a set bit means, and how the two match
// bytes pack length and displacement.

use lzforge::decode::{decode_to_vec, IrLzDecoder, Lz10Decoder, Lzss01Decoder};
use lzforge::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Lz10
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lz10_all_literal_block() {
    let out = decode_to_vec(&Lz10Decoder, &[0x00, 0x41, 0x00, 0x10], Some(3)).unwrap();
    assert_eq!(out, [0x41, 0x00, 0x10]);
}

#[test]
fn lz10_flag_bits_are_msb_first() {
    // 0b0010_0000: literal, literal, match.
    let out = decode_to_vec(&Lz10Decoder, &[0x20, b'h', b'o', 0x10, 0x01], None).unwrap();
    assert_eq!(out, b"hohoho");
}

#[test]
fn lz10_longest_match_and_farthest_displacement() {
    let mut input = Vec::new();
    let mut expected = Vec::new();
    for i in 0..0x1000usize {
        if i % 8 == 0 {
            input.push(0x00);
        }
        input.push(i as u8);
        expected.push(i as u8);
    }
    // Match of 18 bytes reaching back 0x1000.
    input.extend_from_slice(&[0x80, 0xFF, 0xFF]);
    let head = expected[..18].to_vec();
    expected.extend_from_slice(&head);
    let out = decode_to_vec(&Lz10Decoder, &input, None).unwrap();
    assert_eq!(out, expected);
}

#[test]
fn lz10_displacement_past_history_is_rejected() {
    let err = decode_to_vec(&Lz10Decoder, &[0x40, b'a', 0x00, 0x01], None).unwrap_err();
    match err {
        Error::InvalidDisplacement { position, displacement, available } => {
            assert_eq!((position, displacement, available), (1, 2, 1));
        }
        other => panic!("expected InvalidDisplacement, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// IrLz
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn irlz_flag_bits_are_lsb_first() {
    // 0b0000_0100: literal, literal, match (length 2 + 1, displacement 2).
    let out = decode_to_vec(&IrLzDecoder, &[0x04, b'h', b'o', 0x01, 0x10], None).unwrap();
    assert_eq!(out, b"hohoh");
}

#[test]
fn irlz_shortest_match_is_two_bytes() {
    let out = decode_to_vec(&IrLzDecoder, &[0x02, b'k', 0x00, 0x00], None).unwrap();
    assert_eq!(out, b"kkk");
}

// ─────────────────────────────────────────────────────────────────────────────
// Lzss01
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lzss01_set_bit_is_literal() {
    let out = decode_to_vec(&Lzss01Decoder, &[0xFF, b'l', b'z', b's', b's'], None).unwrap();
    assert_eq!(out, b"lzss");
}

#[test]
fn lzss01_match_addresses_ring_position() {
    // Literal 'q' lands at ring 0xFEE; a match from 0xFEE of length 5
    // repeats it.
    let out = decode_to_vec(&Lzss01Decoder, &[0x01, b'q', 0xEE, 0xF2], None).unwrap();
    assert_eq!(out, b"qqqqqq");
}

#[test]
fn lzss01_pre_buffer_reads_zeros() {
    // Match from ring 0x000 before anything was written there.
    let out = decode_to_vec(&Lzss01Decoder, &[0x00, 0x00, 0x0F], Some(18)).unwrap();
    assert_eq!(out, [0u8; 18]);
}
