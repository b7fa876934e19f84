#![no_main]
use libfuzzer_sys::fuzz_target;
use lzforge::decode::{
    HuffmanDecoder, IrLzDecoder, Lz10Decoder, Lzss01Decoder, NibbleOrder, RleDecoder, SpikeChunsoftDecoder,
    SymbolDepth, WordOrder,
};
use lzforge::{decode_to_vec, Decoder};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes through every decoder. Errors are expected; panics and
    // output beyond a requested size are not.
    let huffman4 = HuffmanDecoder::new(SymbolDepth::Four)
        .with_nibble_order(NibbleOrder::HighNibbleFirst)
        .with_word_order(WordOrder::BigEndian);
    let huffman8 = HuffmanDecoder::new(SymbolDepth::Eight);
    let decoders: [&dyn Decoder; 7] = [
        &Lz10Decoder,
        &IrLzDecoder,
        &Lzss01Decoder,
        &SpikeChunsoftDecoder,
        &RleDecoder,
        &huffman4,
        &huffman8,
    ];

    let sizes = [Some(0), Some(1), Some(data.len()), Some(data.len().saturating_mul(8).min(1 << 16)), None];
    for decoder in decoders {
        for size in sizes {
            if let Ok(out) = decode_to_vec(decoder, data, size) {
                if let Some(n) = size {
                    assert_eq!(out.len(), n);
                }
            }
        }
    }
});
