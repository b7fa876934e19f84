#![no_main]
use libfuzzer_sys::fuzz_target;
use lzforge::decode::{HuffmanDecoder, NibbleOrder, SymbolDepth, WordOrder};
use lzforge::encode::HuffmanEncoder;
use lzforge::{decode_to_vec, encode_to_vec};

fuzz_target!(|data: &[u8]| {
    for word_order in [WordOrder::LittleEndian, WordOrder::BigEndian] {
        for nibble_order in [NibbleOrder::LowNibbleFirst, NibbleOrder::HighNibbleFirst] {
            let encoder = HuffmanEncoder::new(SymbolDepth::Four)
                .with_nibble_order(nibble_order)
                .with_word_order(word_order);
            let decoder = HuffmanDecoder::new(SymbolDepth::Four)
                .with_nibble_order(nibble_order)
                .with_word_order(word_order);
            let packed = encode_to_vec(&encoder, data).expect("4-bit trees always fit");
            assert_eq!(decode_to_vec(&decoder, &packed, Some(data.len())).unwrap(), data);
        }

        let encoder = HuffmanEncoder::new(SymbolDepth::Eight).with_word_order(word_order);
        let decoder = HuffmanDecoder::new(SymbolDepth::Eight).with_word_order(word_order);
        let packed = encode_to_vec(&encoder, data).expect("every byte alphabet lays out");
        assert_eq!(decode_to_vec(&decoder, &packed, Some(data.len())).unwrap(), data);
    }
});
