// Integration tests for how every decoder stops: exact decompressed sizes,
// clean ends at token boundaries, and truncation anywhere else.

use std::io::Cursor;

use lzforge::decode::{
    decode_to_vec, HuffmanDecoder, IrLzDecoder, Lz10Decoder, Lzss01Decoder, RleDecoder,
    SpikeChunsoftDecoder,
};
use lzforge::encode::{
    HuffmanEncoder, IrLzEncoder, Lz10Encoder, Lzss01Encoder, RleEncoder, SpikeChunsoftEncoder,
};
use lzforge::{encode_to_vec, Decoder, Encoder, Error};

fn all_decoders() -> Vec<(&'static str, Box<dyn Decoder>)> {
    vec![
        ("lz10", Box::new(Lz10Decoder) as Box<dyn Decoder>),
        ("irlz", Box::new(IrLzDecoder) as Box<dyn Decoder>),
        ("lzss01", Box::new(Lzss01Decoder) as Box<dyn Decoder>),
        ("spike", Box::new(SpikeChunsoftDecoder) as Box<dyn Decoder>),
        ("huffman", Box::new(HuffmanDecoder::default()) as Box<dyn Decoder>),
        ("rle", Box::new(RleDecoder) as Box<dyn Decoder>),
    ]
}

// ─────────────────────────────────────────────────────────────────────────────
// Size zero
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn zero_size_reads_nothing() {
    for (name, decoder) in all_decoders() {
        let out = decode_to_vec(decoder.as_ref(), &[], Some(0))
            .unwrap_or_else(|e| panic!("{name}: {e}"));
        assert!(out.is_empty(), "{name} wrote {} bytes", out.len());
    }
}

#[test]
fn empty_input_with_size_is_too_short() {
    for (name, decoder) in all_decoders() {
        let err = decode_to_vec(decoder.as_ref(), &[], Some(1)).unwrap_err();
        assert!(
            matches!(err, Error::StreamTooShort { offset: 0 }),
            "{name}: unexpected {err:?}"
        );
    }
}

#[test]
fn empty_input_without_size_is_empty_output() {
    for (name, decoder) in all_decoders() {
        if name == "huffman" {
            continue;
        }
        let out = decode_to_vec(decoder.as_ref(), &[], None).unwrap();
        assert!(out.is_empty(), "{name}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Truncation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn lz10_missing_trailing_literals() {
    let err = decode_to_vec(&Lz10Decoder, &[0x00, 0x41, 0x00], Some(3)).unwrap_err();
    assert!(matches!(err, Error::StreamTooShort { offset: 3 }));
}

#[test]
fn lz10_half_match_token_without_size() {
    let err = decode_to_vec(&Lz10Decoder, &[0x40, b'a', 0x20], None).unwrap_err();
    assert!(matches!(err, Error::StreamTooShort { offset: 3 }));
}

#[test]
fn lz10_ends_cleanly_after_flag_byte() {
    // Trailing flag bits with no tokens behind them are padding.
    let out = decode_to_vec(&Lz10Decoder, &[0x00, b'a', b'b'], None).unwrap();
    assert_eq!(out, b"ab");
}

#[test]
fn size_stops_before_unread_tokens() {
    let out = decode_to_vec(&Lz10Decoder, &[0x00, b'a', b'b', b'c', b'd'], Some(2)).unwrap();
    assert_eq!(out, b"ab");
}

#[test]
fn irlz_half_match_token() {
    let err = decode_to_vec(&IrLzDecoder, &[0x02, b'a', 0x00], Some(4)).unwrap_err();
    assert!(matches!(err, Error::StreamTooShort { offset: 3 }));
}

#[test]
fn lzss01_half_match_token() {
    let err = decode_to_vec(&Lzss01Decoder, &[0x00, 0x12], None).unwrap_err();
    assert!(matches!(err, Error::StreamTooShort { offset: 2 }));
}

#[test]
fn spike_raw_token_cut_short() {
    let err = decode_to_vec(&SpikeChunsoftDecoder, &[0x05, b'a', b'b'], None).unwrap_err();
    assert!(matches!(err, Error::StreamTooShort { offset: 3 }));
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared readers
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn back_to_back_streams_from_one_reader() {
    let mut input = Cursor::new(vec![0x00, b'a', b'b', b'c', 0x00, b'x', b'y', b'z']);

    let mut first = Vec::new();
    Lz10Decoder.decode(&mut input, &mut first, Some(3)).unwrap();
    assert_eq!(first, b"abc");
    assert_eq!(input.position(), 4);

    let mut second = Vec::new();
    Lz10Decoder.decode(&mut input, &mut second, Some(3)).unwrap();
    assert_eq!(second, b"xyz");
    assert_eq!(input.position(), 8);
}

fn codec<E: Encoder + 'static, D: Decoder + 'static>(
    name: &'static str,
    encoder: E,
    decoder: D,
) -> (&'static str, Box<dyn Encoder>, Box<dyn Decoder>) {
    (name, Box::new(encoder), Box::new(decoder))
}

#[test]
fn every_decoder_stops_at_its_own_stream_end() {
    let first: &[u8] = b"first stream first stream first";
    let second: &[u8] = b"and then a second one";
    let codecs = vec![
        codec("lz10", Lz10Encoder::new(), Lz10Decoder),
        codec("irlz", IrLzEncoder::new(), IrLzDecoder),
        codec("lzss01", Lzss01Encoder::new(), Lzss01Decoder),
        codec("spike", SpikeChunsoftEncoder::new(), SpikeChunsoftDecoder),
        codec("huffman", HuffmanEncoder::default(), HuffmanDecoder::default()),
        codec("rle", RleEncoder, RleDecoder),
    ];
    for (name, encoder, decoder) in codecs {
        let mut joined = encode_to_vec(encoder.as_ref(), first).unwrap();
        let first_len = joined.len() as u64;
        joined.extend(encode_to_vec(encoder.as_ref(), second).unwrap());
        let mut input = Cursor::new(joined);

        let mut out = Vec::new();
        decoder.decode(&mut input, &mut out, Some(first.len())).unwrap();
        assert_eq!(out, first, "{name}");
        assert_eq!(input.position(), first_len, "{name} read past its stream");

        out.clear();
        decoder.decode(&mut input, &mut out, Some(second.len())).unwrap();
        assert_eq!(out, second, "{name}");
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Size hints larger than the input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn huge_size_on_truncated_stream_is_too_short() {
    for (name, decoder) in all_decoders() {
        for size in [usize::MAX / 4, usize::MAX / 2, usize::MAX] {
            let err = decode_to_vec(decoder.as_ref(), &[0x00, 0x41], Some(size)).unwrap_err();
            assert!(
                matches!(err, Error::StreamTooShort { .. }),
                "{name} with size {size}: unexpected {err:?}"
            );
        }
    }
}
