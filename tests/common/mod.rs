//! Synthetic ZTEX files for tests.

#![allow(dead_code)]

use zentex::ZtexFormat;

/// Builder for a ZTEX file; payload bytes are appended verbatim.
pub struct Ztex {
    pub big_endian: bool,
    pub magic: [u8; 4],
    pub version: u32,
    pub format: u32,
    pub width: u32,
    pub height: u32,
    pub mip_count: u32,
    pub average_color: u32,
}

impl Ztex {
    pub fn new(format: ZtexFormat, width: u32, height: u32) -> Self {
        Self {
            big_endian: false,
            magic: *b"ZTEX",
            version: 0,
            format: format.code(),
            width,
            height,
            mip_count: 1,
            average_color: 0xff80_8080,
        }
    }

    pub fn mips(mut self, mip_count: u32) -> Self {
        self.mip_count = mip_count;
        self
    }

    pub fn big_endian(mut self) -> Self {
        self.big_endian = true;
        self.magic = *b"XETZ";
        self
    }

    pub fn header(&self) -> Vec<u8> {
        let mut out = self.magic.to_vec();
        let fields = [
            self.version,
            self.format,
            self.width,
            self.height,
            self.mip_count,
            self.width,
            self.height,
            self.average_color,
        ];
        for f in fields {
            if self.big_endian {
                out.extend_from_slice(&f.to_be_bytes());
            } else {
                out.extend_from_slice(&f.to_le_bytes());
            }
        }
        out
    }

    pub fn with_payload(&self, payload: &[u8]) -> Vec<u8> {
        let mut out = self.header();
        out.extend_from_slice(payload);
        out
    }
}

/// Palette where index `i` maps to `(i, 0, 0)`.
pub fn red_ramp_palette() -> Vec<u8> {
    (0..=255u8).flat_map(|i| [i, 0, 0]).collect()
}

/// Deterministic xorshift bytes.
pub fn noise(len: usize, seed: u32) -> Vec<u8> {
    let mut state = seed | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

/// Stored bytes of a `2^n` square halving chain, smallest level first,
/// with level 0 filled from `level0`.
pub fn halving_chain(edge: u32, mip_count: u32, bpp: usize, level0: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for level in (1..mip_count).rev() {
        let e = (edge >> level) as usize;
        out.extend(std::iter::repeat_n(0xEE, e * e * bpp));
    }
    out.extend_from_slice(level0);
    out
}
