//! Minimal DDS container framing for block-compressed payloads.
//!
//! Block codecs are handed a `"DDS "` magic, a 124-byte `DDS_HEADER` and the
//! compressed bytes exactly as ZTEX stored them (smallest mip first). Field
//! layout per <https://learn.microsoft.com/en-us/windows/win32/direct3ddds/dds-header>.

use bitflags::bitflags;

use crate::error::ZtexError;
use crate::header::TextureInfo;

pub const MAGIC: [u8; 4] = *b"DDS ";
/// `DDS_HEADER` size, excluding the magic.
pub const HEADER_SIZE: usize = 124;
/// Magic plus header.
pub const CONTAINER_HEADER_SIZE: usize = 4 + HEADER_SIZE;

const PIXEL_FORMAT_SIZE: u32 = 32;
const INTS: usize = HEADER_SIZE / 4;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PIXEL_FORMAT = 0x1000;
        const MIPMAP_COUNT = 0x20000;
        const LINEAR_SIZE = 0x80000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsCaps: u32 {
        const COMPLEX = 0x8;
        const MIPMAP = 0x400000;
        const TEXTURE = 0x1000;
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DdsPixelFormatFlags: u32 {
        const FOURCC = 0x4;
    }
}

/// Build the container header for a block-compressed texture.
///
/// Returns `None` for formats that are not block-compressed.
pub fn container_header(info: &TextureInfo) -> Option<[u8; CONTAINER_HEADER_SIZE]> {
    let four_cc = info.format.four_cc()?;
    let block_bytes = info.format.block_bytes()? as u32;

    let mut flags = DdsFlags::CAPS
        | DdsFlags::HEIGHT
        | DdsFlags::WIDTH
        | DdsFlags::PIXEL_FORMAT
        | DdsFlags::LINEAR_SIZE;
    let mut caps = DdsCaps::TEXTURE;
    if info.mip_count > 1 {
        flags |= DdsFlags::MIPMAP_COUNT;
        caps |= DdsCaps::COMPLEX | DdsCaps::MIPMAP;
    }
    let linear_size = info
        .width
        .div_ceil(4)
        .max(1)
        .saturating_mul(info.height.div_ceil(4).max(1))
        .saturating_mul(block_bytes);

    let mut ints = [0u32; INTS];
    ints[0] = HEADER_SIZE as u32;
    ints[1] = flags.bits();
    ints[2] = info.height;
    ints[3] = info.width;
    ints[4] = linear_size;
    ints[6] = info.mip_count;
    // ints[7..18] reserved
    ints[18] = PIXEL_FORMAT_SIZE;
    ints[19] = DdsPixelFormatFlags::FOURCC.bits();
    ints[20] = u32::from_le_bytes(four_cc);
    ints[26] = caps.bits();

    let mut out = [0u8; CONTAINER_HEADER_SIZE];
    out[..4].copy_from_slice(&MAGIC);
    for (chunk, v) in out[4..].chunks_exact_mut(4).zip(ints) {
        chunk.copy_from_slice(&v.to_le_bytes());
    }
    Some(out)
}

/// The fields of a container header a block codec needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DdsSummary {
    pub width: u32,
    pub height: u32,
    pub mip_count: u32,
    pub four_cc: [u8; 4],
}

impl DdsSummary {
    /// Parse a container produced by [`container_header`], returning the
    /// summary and the compressed payload after it.
    pub fn parse(container: &[u8]) -> Result<(Self, &[u8]), ZtexError> {
        let header = container
            .get(..CONTAINER_HEADER_SIZE)
            .ok_or(ZtexError::UnexpectedEof)?;
        if header[..4] != MAGIC {
            return Err(ZtexError::Codec("missing DDS magic".into()));
        }
        let int = |i: usize| {
            let at = 4 + i * 4;
            u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]])
        };
        if int(0) as usize != HEADER_SIZE || int(18) != PIXEL_FORMAT_SIZE {
            return Err(ZtexError::Codec("bad DDS header size".into()));
        }
        if !DdsPixelFormatFlags::from_bits_retain(int(19)).contains(DdsPixelFormatFlags::FOURCC) {
            return Err(ZtexError::Codec("DDS pixel format is not FourCC".into()));
        }
        let flags = DdsFlags::from_bits_retain(int(1));
        let mip_count = if flags.contains(DdsFlags::MIPMAP_COUNT) {
            int(6).max(1)
        } else {
            1
        };
        Ok((
            Self {
                width: int(3),
                height: int(2),
                mip_count,
                four_cc: int(20).to_le_bytes(),
            },
            &container[CONTAINER_HEADER_SIZE..],
        ))
    }
}
