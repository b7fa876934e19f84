// Integration tests for the SpikeChunsoft decoder: all four token kinds,
// their long-length forms and the continue-token rules.

use lzforge::decode::{decode_to_vec, SpikeChunsoftDecoder};
use lzforge::Error;

fn decode(input: &[u8]) -> Result<Vec<u8>, Error> {
    decode_to_vec(&SpikeChunsoftDecoder, input, None)
}

// ─────────────────────────────────────────────────────────────────────────────
// Raw tokens
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn short_raw_token() {
    assert_eq!(decode(&[0x02, b'o', b'k']).unwrap(), b"ok");
}

#[test]
fn long_raw_token_reads_second_length_byte() {
    let mut input = vec![0x21, 0x04];
    input.extend((0..0x104u32).map(|i| i as u8));
    let out = decode(&input).unwrap();
    assert_eq!(out.len(), 0x104);
    assert_eq!(out[0x103], 0x03);
}

#[test]
fn empty_raw_token_is_a_no_op() {
    assert_eq!(decode(&[0x00, 0x01, b'x']).unwrap(), b"x");
}

// ─────────────────────────────────────────────────────────────────────────────
// Run tokens
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn short_run_token() {
    assert_eq!(decode(&[0x43, b'-']).unwrap(), b"-------");
}

#[test]
fn long_run_token() {
    assert_eq!(decode(&[0x5F, 0xFF, 0x00]).unwrap(), vec![0u8; 0xFFF + 4]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Match and continue tokens
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn match_length_comes_from_flag_bits() {
    // Raw "abcd", then a 7-byte match at displacement 4.
    let out = decode(&[0x04, b'a', b'b', b'c', b'd', 0xE0, 0x04]).unwrap();
    assert_eq!(out, b"abcdabcdabc");
}

#[test]
fn continues_chain_after_match() {
    let out = decode(&[0x01, b'r', 0x80, 0x01, 0x7F, 0x61]).unwrap();
    assert_eq!(out, vec![b'r'; 1 + 4 + 31 + 1]);
}

#[test]
fn continue_after_run_is_rejected() {
    let err = decode(&[0x44, b'r', 0x62]).unwrap_err();
    assert!(matches!(err, Error::MissingPriorMatch { position: 8 }));
}

#[test]
fn match_beyond_window_history_is_rejected() {
    let err = decode(&[0x01, b'r', 0x9F, 0xFF]).unwrap_err();
    assert!(matches!(err, Error::InvalidDisplacement { displacement: 0x1FFF, available: 1, .. }));
}

#[test]
fn truncated_match_token() {
    let err = decode(&[0x01, b'r', 0x80]).unwrap_err();
    assert!(matches!(err, Error::StreamTooShort { offset: 3 }));
}
