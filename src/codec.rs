//! Hand-off of block-compressed (DXT) payloads to a decompressor.

use alloc::vec::Vec;

use enough::Stop;

use crate::error::ZtexError;
use crate::pixel::PixelLayout;

/// Pixels produced by a [`BlockCodec`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodecOutput {
    pub pixels: Vec<u8>,
    pub layout: PixelLayout,
}

/// Decompressor for block-compressed ZTEX payloads.
///
/// `container` is a DDS container (see [`crate::dds`]) whose header carries
/// width, height, mip count and FourCC, followed by every remaining byte of
/// the ZTEX file. Mips are stored smallest first, so level 0 is the trailing
/// block run. The returned pixels must describe mip level 0.
pub trait BlockCodec {
    fn decompress(&self, container: &[u8], stop: &dyn Stop) -> Result<CodecOutput, ZtexError>;
}

/// [`BlockCodec`] backed by the `texture2ddecoder` crate.
///
/// Decodes DXT1 as BC1, DXT2/DXT3 as BC2 and DXT4/DXT5 as BC3 into
/// [`PixelLayout::Argb8`]. Premultiplied alpha of DXT2/DXT4 is passed through.
#[cfg(feature = "bcn")]
#[derive(Clone, Copy, Debug, Default)]
pub struct Texture2dCodec;

/// `texture2ddecoder` block decoder: data, width, height, packed output.
#[cfg(feature = "bcn")]
type BlockDecodeFn = fn(&[u8], usize, usize, &mut [u32]) -> Result<(), &'static str>;

#[cfg(feature = "bcn")]
impl BlockCodec for Texture2dCodec {
    fn decompress(&self, container: &[u8], stop: &dyn Stop) -> Result<CodecOutput, ZtexError> {
        use alloc::format;
        use alloc::vec;

        let (summary, payload) = crate::dds::DdsSummary::parse(container)?;
        let (block_bytes, decode): (usize, BlockDecodeFn) =
            match &summary.four_cc {
                b"DXT1" => (8, texture2ddecoder::decode_bc1),
                b"DXT2" | b"DXT3" => (16, texture2ddecoder::decode_bc2),
                b"DXT4" | b"DXT5" => (16, texture2ddecoder::decode_bc3),
                other => {
                    return Err(ZtexError::Codec(format!(
                        "unsupported FourCC {:?}",
                        alloc::string::String::from_utf8_lossy(other)
                    )));
                }
            };

        let width = summary.width as usize;
        let height = summary.height as usize;
        let level0_len = width
            .div_ceil(4)
            .checked_mul(height.div_ceil(4))
            .and_then(|blocks| blocks.checked_mul(block_bytes))
            .ok_or(ZtexError::DimensionsTooLarge {
                width: summary.width,
                height: summary.height,
            })?;
        if payload.len() < level0_len {
            return Err(ZtexError::UnexpectedEof);
        }
        let level0 = &payload[payload.len() - level0_len..];

        stop.check()?;
        let mut packed = vec![0u32; width * height];
        decode(level0, width, height, &mut packed)
            .map_err(|e| ZtexError::Codec(format!("{e}")))?;

        // Packed as 0xAARRGGBB.
        let mut pixels = Vec::with_capacity(packed.len() * 4);
        for (i, px) in packed.iter().enumerate() {
            if i % (width.max(1) * 16) == 0 {
                stop.check()?;
            }
            pixels.extend_from_slice(&px.to_be_bytes());
        }
        Ok(CodecOutput {
            pixels,
            layout: PixelLayout::Argb8,
        })
    }
}
