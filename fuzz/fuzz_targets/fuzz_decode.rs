#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = zentex::Limits {
        max_pixels: Some(1 << 24),
        max_memory_bytes: Some(256 << 20),
        ..Default::default()
    };

    // Header only, slice decode and reader decode must never panic
    let _ = zentex::probe(data);
    let _ = zentex::DecodeRequest::new(data)
        .with_limits(&limits)
        .with_block_codec(&zentex::Texture2dCodec)
        .decode(enough::Unstoppable);
    let _ = zentex::DecodeRequest::from_reader(data)
        .with_limits(&limits)
        .with_nibble_unpack(zentex::NibbleUnpack::Channels)
        .decode(enough::Unstoppable);
});
