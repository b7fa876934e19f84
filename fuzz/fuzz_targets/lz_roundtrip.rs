#![no_main]
use libfuzzer_sys::fuzz_target;
use lzforge::decode::{IrLzDecoder, Lz10Decoder, Lzss01Decoder, RleDecoder, SpikeChunsoftDecoder};
use lzforge::encode::{IrLzEncoder, Lz10Encoder, Lzss01Encoder, RleEncoder, SpikeChunsoftEncoder};
use lzforge::{decode_to_vec, encode_to_vec, Decoder, Encoder, LzSettings, ParseStrategy};

fuzz_target!(|data: &[u8]| {
    // First byte picks the parse strategy, the rest is the payload.
    let Some((&selector, payload)) = data.split_first() else {
        return;
    };
    let strategy = if selector & 1 == 0 { ParseStrategy::Greedy } else { ParseStrategy::Optimal };
    let settings = LzSettings::new().with_strategy(strategy).with_task_count(1 + (selector as usize >> 6));

    let lz10 = Lz10Encoder::new().with_settings(settings);
    let irlz = IrLzEncoder::new().with_settings(settings);
    let lzss01 = Lzss01Encoder::new().with_settings(settings);
    let spike = SpikeChunsoftEncoder::new().with_settings(settings);
    let pairs: [(&dyn Encoder, &dyn Decoder); 5] = [
        (&lz10, &Lz10Decoder),
        (&irlz, &IrLzDecoder),
        (&lzss01, &Lzss01Decoder),
        (&spike, &SpikeChunsoftDecoder),
        (&RleEncoder, &RleDecoder),
    ];

    for (encoder, decoder) in pairs {
        let packed = encode_to_vec(encoder, payload).expect("encoding in-memory data cannot fail");
        let sized = decode_to_vec(decoder, &packed, Some(payload.len())).expect("sized decode of own output");
        assert_eq!(sized, payload);
        let unsized_ = decode_to_vec(decoder, &packed, None).expect("unsized decode of own output");
        assert_eq!(unsized_, payload);
    }
});
