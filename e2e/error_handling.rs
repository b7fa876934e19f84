//! E2E Test Suite 03: Error Handling
//!
//! Damaged streams, misconfigured encoders and failing I/O all surface as
//! typed errors, never as panics or silently wrong output:
//! - every truncation of a valid stream
//! - back-references before the start of output
//! - format-specific corruption (Huffman tree, SpikeChunsoft continue tokens)
//! - invalid encoder settings
//! - writer failures

use std::io::{self, Write};

use lzforge::decode::{
    HuffmanDecoder, IrLzDecoder, Lz10Decoder, Lzss01Decoder, RleDecoder, SpikeChunsoftDecoder, SymbolDepth,
};
use lzforge::encode::{IrLzEncoder, Lz10Encoder, Lzss01Encoder, RleEncoder, SpikeChunsoftEncoder};
use lzforge::{decode_to_vec, encode_to_vec, Decoder, Encoder, Error, LzSettings};

type Pair = (&'static str, Box<dyn Encoder>, Box<dyn Decoder>);

fn pair<E: Encoder + 'static, D: Decoder + 'static>(name: &'static str, encoder: E, decoder: D) -> Pair {
    (name, Box::new(encoder), Box::new(decoder))
}

fn pairs() -> Vec<Pair> {
    vec![
        pair("lz10", Lz10Encoder::new(), Lz10Decoder),
        pair("irlz", IrLzEncoder::new(), IrLzDecoder),
        pair("lzss01", Lzss01Encoder::new(), Lzss01Decoder),
        pair("spike", SpikeChunsoftEncoder::new(), SpikeChunsoftDecoder),
        pair("rle", RleEncoder, RleDecoder),
    ]
}

/// Writer that accepts `budget` bytes and then fails.
struct FailingWriter {
    budget: usize,
}

impl Write for FailingWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.budget == 0 {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
        }
        let n = buf.len().min(self.budget);
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: truncation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_every_truncation_with_size_is_too_short() -> anyhow::Result<()> {
    let data = b"tick tock tick tock tick tock, the clock goes tick tock.".repeat(4);
    for (name, encoder, decoder) in pairs() {
        let packed = encode_to_vec(encoder.as_ref(), &data)?;
        for cut in 0..packed.len() {
            let result = decode_to_vec(decoder.as_ref(), &packed[..cut], Some(data.len()));
            assert!(
                matches!(result, Err(Error::StreamTooShort { .. })),
                "{name}: cut at {cut} gave {result:?}"
            );
        }
    }
    Ok(())
}

#[test]
fn test_truncation_without_size_never_overreads() -> anyhow::Result<()> {
    // Without a size a cut can land on a token boundary and decode cleanly,
    // but the output is then a prefix of the original.
    let data = b"0123456789012345678901234567890123456789abcdefabcdef".to_vec();
    for (name, encoder, decoder) in pairs() {
        let packed = encode_to_vec(encoder.as_ref(), &data)?;
        for cut in 0..packed.len() {
            match decode_to_vec(decoder.as_ref(), &packed[..cut], None) {
                Ok(out) => assert!(data.starts_with(&out), "{name}: cut at {cut}"),
                Err(Error::StreamTooShort { offset }) => assert!(offset <= cut as u64, "{name}: cut at {cut}"),
                Err(other) => panic!("{name}: cut at {cut} gave {other:?}"),
            }
        }
    }
    Ok(())
}

#[test]
fn test_huffman_truncated_tree_and_data() -> anyhow::Result<()> {
    let stream = [0x01, 0xC0, b'A', b'B', 0x00, 0x00, 0x00, 0x60];
    let decoder = HuffmanDecoder::new(SymbolDepth::Eight);
    for cut in 0..stream.len() {
        let err = decode_to_vec(&decoder, &stream[..cut], Some(3)).unwrap_err();
        assert!(matches!(err, Error::StreamTooShort { .. }), "cut at {cut}: {err:?}");
    }
    assert_eq!(decode_to_vec(&decoder, &stream, Some(3))?, b"ABB");
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: corrupt content
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_back_reference_before_output_start() {
    // A match as the very first token of each flag format.
    let cases: [(&str, &dyn Decoder, &[u8]); 3] = [
        ("lz10", &Lz10Decoder, &[0x80, 0x00, 0x00]),
        ("irlz", &IrLzDecoder, &[0x01, 0x00, 0x00]),
        ("spike", &SpikeChunsoftDecoder, &[0x80, 0x01]),
    ];
    for (name, decoder, stream) in cases {
        let err = decode_to_vec(decoder, stream, None).unwrap_err();
        assert!(
            matches!(err, Error::InvalidDisplacement { position: 0, .. }),
            "{name}: {err:?}"
        );
    }
}

#[test]
fn test_lzss01_reads_zero_filled_ring() -> anyhow::Result<()> {
    // The ring starts zeroed, so a leading match is valid and yields zeros.
    let out = decode_to_vec(&Lzss01Decoder, &[0x00, 0x00, 0x00], None)?;
    assert_eq!(out, [0u8; 3]);
    Ok(())
}

#[test]
fn test_spike_continue_without_match() {
    let err = decode_to_vec(&SpikeChunsoftDecoder, &[0x01, b'x', 0x63], None).unwrap_err();
    assert!(matches!(err, Error::MissingPriorMatch { position: 1 }), "{err:?}");
}

#[test]
fn test_huffman_node_offset_outside_table() {
    let stream = [0x01, 0x3F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    let err = decode_to_vec(&HuffmanDecoder::default(), &stream, Some(1)).unwrap_err();
    assert!(
        matches!(err, Error::CorruptHuffmanTree { address: 128, table_len: 4 }),
        "{err:?}"
    );
}

#[test]
fn test_huffman_needs_size() {
    let err = decode_to_vec(&HuffmanDecoder::default(), &[0x01, 0xC0, 0, 1], None).unwrap_err();
    assert!(matches!(err, Error::SizeRequired { format: "huffman" }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: configuration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_zero_search_depth_is_rejected() {
    let encoder = Lz10Encoder::new().with_settings(LzSettings::new().with_search_depth(0));
    let err = encode_to_vec(&encoder, b"aaaa").unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "{err:?}");
}

#[test]
fn test_zero_task_count_is_rejected() {
    let encoder = SpikeChunsoftEncoder::new().with_settings(LzSettings::new().with_task_count(0));
    let err = encode_to_vec(&encoder, b"aaaa").unwrap_err();
    assert!(matches!(err, Error::Configuration(_)), "{err:?}");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: I/O failures
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_decoder_reports_writer_failure() {
    let stream = [0x00, b'a', b'b', b'c', b'd'];
    let mut input: &[u8] = &stream;
    let mut sink = FailingWriter { budget: 2 };
    let err = Lz10Decoder.decode(&mut input, &mut sink, None).unwrap_err();
    match err {
        Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected Io, got {other:?}"),
    }
}

#[test]
fn test_encoder_reports_writer_failure() {
    let mut sink = FailingWriter { budget: 0 };
    let err = RleEncoder.encode(b"abc", &mut sink).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
