mod common;

use common::{Ztex, halving_chain, red_ramp_palette};
use enough::Unstoppable;
use zentex::*;

#[test]
fn argb_2x1_end_to_end() {
    let payload = [0, 0, 255, 255, 0, 255, 0, 255];
    let file = Ztex::new(ZtexFormat::A8R8G8B8, 2, 1).with_payload(&payload);

    let decoded = decode(&file, Unstoppable).unwrap();
    assert_eq!(decoded.width, 2);
    assert_eq!(decoded.height, 1);
    assert_eq!(decoded.layout, PixelLayout::Argb8);
    assert_eq!(decoded.format, ZtexFormat::A8R8G8B8);
    assert_eq!(decoded.pixels(), &payload[..]);
    // Identity format from a slice should be zero-copy
    assert!(decoded.is_borrowed(), "A8R8G8B8 decode should be zero-copy");
}

#[test]
fn bgra_single_block_reverses() {
    let file = Ztex::new(ZtexFormat::B8G8R8A8, 1, 1).with_payload(&[0x10, 0x20, 0x30, 0x40]);
    let decoded = decode(&file, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Argb8);
    assert_eq!(decoded.pixels(), &[0x40, 0x30, 0x20, 0x10]);
    assert!(!decoded.is_borrowed());
}

#[test]
fn bgra_multi_block_reverses_each_pixel() {
    let payload: Vec<u8> = (0..3 * 2 * 4).map(|i| i as u8).collect();
    let file = Ztex::new(ZtexFormat::B8G8R8A8, 3, 2).with_payload(&payload);
    let decoded = decode(&file, Unstoppable).unwrap();
    for (i, (src, dst)) in payload
        .chunks_exact(4)
        .zip(decoded.pixels().chunks_exact(4))
        .enumerate()
    {
        assert_eq!(dst, &[src[3], src[2], src[1], src[0]], "pixel {i}");
    }
}

#[test]
fn rgba_rotates_alpha_to_front() {
    let file = Ztex::new(ZtexFormat::R8G8B8A8, 2, 1).with_payload(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let decoded = decode(&file, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &[4, 1, 2, 3, 8, 5, 6, 7]);
}

#[test]
fn abgr_swaps_red_and_blue() {
    let file = Ztex::new(ZtexFormat::A8B8G8R8, 1, 1).with_payload(&[0xAA, 0xBB, 0x66, 0x11]);
    let decoded = decode(&file, Unstoppable).unwrap();
    assert_eq!(decoded.pixels(), &[0xAA, 0x11, 0x66, 0xBB]);
}

#[test]
fn bgr_and_rgb_24_bit() {
    let bgr = Ztex::new(ZtexFormat::B8G8R8, 2, 1).with_payload(&[1, 2, 3, 4, 5, 6]);
    let decoded = decode(&bgr, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &[3, 2, 1, 6, 5, 4]);

    let rgb = Ztex::new(ZtexFormat::R8G8B8, 2, 1).with_payload(&[1, 2, 3, 4, 5, 6]);
    let decoded = decode(&rgb, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &[1, 2, 3, 4, 5, 6]);
    assert!(decoded.is_borrowed());
}

#[test]
fn sixteen_bit_layouts_are_tagged_not_converted() {
    let payload = [0x1f, 0x80, 0xe0, 0x07];
    let argb1555 = Ztex::new(ZtexFormat::A1R5G5B5, 2, 1).with_payload(&payload);
    let decoded = decode(&argb1555, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Argb1555);
    assert_eq!(decoded.pixels(), &payload[..]);

    let rgb565 = Ztex::new(ZtexFormat::R5G6B5, 2, 1).with_payload(&payload);
    let decoded = decode(&rgb565, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb565);
    assert_eq!(decoded.pixels(), &payload[..]);
}

#[test]
fn argb4444_legacy_and_channel_unpack() {
    // 0xF1A5 little-endian: A=F R=1 G=A B=5
    let file = Ztex::new(ZtexFormat::A4R4G4B4, 1, 1).with_payload(&[0xA5, 0xF1]);

    let legacy = decode(&file, Unstoppable).unwrap();
    assert_eq!(legacy.layout, PixelLayout::Argb8);
    assert_eq!(legacy.pixels(), &[0xAA, 0x55, 0xFF, 0x11]);

    let full = DecodeRequest::new(&file)
        .with_nibble_unpack(NibbleUnpack::Channels)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(full.pixels(), &[0xFF, 0x11, 0xAA, 0x55]);
}

#[test]
fn p8_looks_up_palette() {
    let mut payload = red_ramp_palette();
    payload.extend_from_slice(&[0x05, 0xff, 0x00]);
    let file = Ztex::new(ZtexFormat::P8, 3, 1).with_payload(&payload);

    let decoded = decode(&file, Unstoppable).unwrap();
    assert_eq!(decoded.layout, PixelLayout::Rgb8);
    assert_eq!(decoded.pixels(), &[5, 0, 0, 255, 0, 0, 0, 0, 0]);
}

#[test]
fn p8_without_full_palette_is_eof() {
    let file = Ztex::new(ZtexFormat::P8, 1, 1).with_payload(&[0u8; 700]);
    let err = decode(&file, Unstoppable).unwrap_err();
    assert!(err.is_io(), "{err:?}");
}

#[test]
fn single_mip_skips_nothing() {
    for (w, h) in [(1, 1), (3, 5), (640, 480)] {
        assert_eq!(smaller_mips_pixel_count(w, h, 1).unwrap(), 0);
    }
    let payload = [1, 2, 3, 4];
    let file = Ztex::new(ZtexFormat::A8R8G8B8, 1, 1).mips(1).with_payload(&payload);
    assert_eq!(decode(&file, Unstoppable).unwrap().pixels(), &payload);
}

#[test]
fn mip_skip_matches_halving_chain() {
    for (edge, mips) in [(4u32, 2u32), (8, 3), (16, 4), (64, 6)] {
        let bpp = ZtexFormat::R8G8B8.bytes_per_pixel();
        let level0 = common::noise((edge * edge) as usize * bpp, edge);
        let payload = halving_chain(edge, mips, bpp, &level0);
        let file = Ztex::new(ZtexFormat::R8G8B8, edge, edge)
            .mips(mips)
            .with_payload(&payload);

        let info = probe(&file).unwrap();
        let expected: usize = (1..mips)
            .map(|i| ((edge >> i) * (edge >> i)) as usize * bpp)
            .sum();
        assert_eq!(smaller_mips_len(&info).unwrap(), expected);

        let decoded = decode(&file, Unstoppable).unwrap();
        assert_eq!(decoded.pixels(), &level0[..], "edge={edge} mips={mips}");
    }
}

#[test]
fn palette_precedes_mip_chain() {
    let edge = 8;
    let level0: Vec<u8> = (0..64).collect();
    let mut payload = red_ramp_palette();
    payload.extend_from_slice(&halving_chain(edge, 3, 1, &level0));
    let file = Ztex::new(ZtexFormat::P8, edge, edge).mips(3).with_payload(&payload);

    let decoded = decode(&file, Unstoppable).unwrap();
    let reds: Vec<u8> = decoded.pixels().chunks_exact(3).map(|px| px[0]).collect();
    assert_eq!(reds, level0);
}

#[test]
fn zero_mip_count_is_malformed() {
    let file = Ztex::new(ZtexFormat::A8R8G8B8, 1, 1).mips(0).with_payload(&[0; 4]);
    assert!(matches!(
        decode(&file, Unstoppable),
        Err(ZtexError::MalformedPayload(_))
    ));
}

#[test]
fn zero_dimensions_are_malformed() {
    let file = Ztex::new(ZtexFormat::A8R8G8B8, 0, 4).header();
    // The header alone is accepted
    assert_eq!(probe(&file).unwrap().width, 0);
    assert!(matches!(
        decode(&file, Unstoppable),
        Err(ZtexError::MalformedPayload(_))
    ));
}

#[test]
fn bad_signature_fails_first() {
    let mut file = Ztex::new(ZtexFormat::A8R8G8B8, 1, 1).with_payload(&[0; 4]);
    file[..4].copy_from_slice(b"ZTXE");
    assert!(matches!(
        decode(&file, Unstoppable),
        Err(ZtexError::InvalidSignature(sig)) if &sig == b"ZTXE"
    ));

    let mut source = SliceSource::new(&file);
    assert!(ZtexHeader::read(&mut source).is_err());
    assert_eq!(source.position(), 4, "nothing past the signature is read");
}

#[test]
fn bad_version_and_format() {
    let mut v1 = Ztex::new(ZtexFormat::A8R8G8B8, 1, 1);
    v1.version = 1;
    assert!(matches!(
        decode(&v1.with_payload(&[0; 4]), Unstoppable),
        Err(ZtexError::UnsupportedVersion(1))
    ));

    let mut bad = Ztex::new(ZtexFormat::A8R8G8B8, 1, 1);
    bad.format = ZtexFormat::COUNT;
    assert!(matches!(
        decode(&bad.with_payload(&[0; 4]), Unstoppable),
        Err(ZtexError::InvalidFormat(15))
    ));
}

#[test]
fn truncated_payload_is_not_short_buffer() {
    let file = Ztex::new(ZtexFormat::B8G8R8A8, 4, 4).with_payload(&[0u8; 4 * 4 * 4 - 1]);
    let err = decode(&file, Unstoppable).unwrap_err();
    assert!(matches!(err, ZtexError::UnexpectedEof));
    assert!(err.is_io());
}

#[test]
fn truncated_mip_chain_is_eof() {
    let file = Ztex::new(ZtexFormat::R8G8B8, 16, 16).mips(4).with_payload(&[0u8; 100]);
    assert!(decode(&file, Unstoppable).unwrap_err().is_io());
}

#[test]
fn truncated_header_is_eof() {
    let file = Ztex::new(ZtexFormat::R8G8B8, 1, 1).header();
    assert!(matches!(
        decode(&file[..20], Unstoppable),
        Err(ZtexError::UnexpectedEof)
    ));
}

#[test]
fn big_endian_header_matches_little_endian() {
    let payload = common::noise(4 * 3 * 4, 7);
    let le = Ztex::new(ZtexFormat::B8G8R8A8, 4, 3).with_payload(&payload);
    let be = Ztex::new(ZtexFormat::B8G8R8A8, 4, 3)
        .big_endian()
        .with_payload(&payload);

    assert_eq!(ZtexHeader::from_bytes(&be).unwrap().byte_order, ByteOrder::Big);
    let a = decode(&le, Unstoppable).unwrap();
    let b = decode(&be, Unstoppable).unwrap();
    assert_eq!(a.pixels(), b.pixels());
    assert_eq!((a.width, a.height), (b.width, b.height));
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut payload = vec![9, 9, 9];
    payload.extend_from_slice(&[0xde, 0xad]);
    let file = Ztex::new(ZtexFormat::R8G8B8, 1, 1).with_payload(&payload);
    assert_eq!(decode(&file, Unstoppable).unwrap().pixels(), &[9, 9, 9]);
}
