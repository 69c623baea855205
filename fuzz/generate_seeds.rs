#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn ztex(format: u32, width: u32, height: u32, mips: u32, payload: &[u8]) -> Vec<u8> {
    let mut out = b"ZTEX".to_vec();
    for field in [0, format, width, height, mips, width, height, 0xff80_8080u32] {
        out.extend_from_slice(&field.to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // A8R8G8B8 2x1: red, green
    fs::write(
        format!("{dir}/argb_2x1.tex"),
        ztex(3, 2, 1, 1, &[0xff, 0xff, 0, 0, 0xff, 0, 0xff, 0]),
    )
    .unwrap();

    // B8G8R8A8 4x4 with a 2x2 mip in front
    let mut chain = vec![0x40u8; 4 * 4];
    chain.extend(std::iter::repeat_n(0x80u8, 16 * 4));
    fs::write(format!("{dir}/bgra_4x4_mips.tex"), ztex(0, 4, 4, 2, &chain)).unwrap();

    // A4R4G4B4 and R5G6B5 2x2
    fs::write(format!("{dir}/argb4444_2x2.tex"), ztex(6, 2, 2, 1, &[0xa5, 0xf1, 0, 0, 0xff, 0xff, 0x12, 0x34])).unwrap();
    fs::write(format!("{dir}/rgb565_2x2.tex"), ztex(8, 2, 2, 1, &[0x00, 0xf8, 0xe0, 0x07, 0x1f, 0x00, 0, 0])).unwrap();

    // P8 2x2 with a grey ramp palette
    let mut p8: Vec<u8> = (0..=255u8).flat_map(|i| [i, i, i]).collect();
    p8.extend_from_slice(&[0, 85, 170, 255]);
    fs::write(format!("{dir}/p8_2x2.tex"), ztex(9, 2, 2, 1, &p8)).unwrap();

    // DXT1 4x4, one white block
    fs::write(
        format!("{dir}/dxt1_4x4.tex"),
        ztex(10, 4, 4, 1, &[0xff, 0xff, 0xff, 0xff, 0, 0, 0, 0]),
    )
    .unwrap();

    // Big-endian header, R8G8B8 1x1
    let mut be = b"XETZ".to_vec();
    for field in [0u32, 5, 1, 1, 1, 1, 1, 0] {
        be.extend_from_slice(&field.to_be_bytes());
    }
    be.extend_from_slice(&[1, 2, 3]);
    fs::write(format!("{dir}/rgb_be_1x1.tex"), be).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"ZTEX").unwrap();
    fs::write(format!("{dir}/bad_format.tex"), ztex(15, 1, 1, 1, &[0; 4])).unwrap();
    fs::write(format!("{dir}/huge_mips.tex"), ztex(5, 3, 3, 40, &[0; 27])).unwrap();

    println!("Generated seed corpus in {dir}/");
}
