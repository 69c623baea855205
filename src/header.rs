//! ZTEX header parsing.
//!
//! The header is nine 4-byte fields (36 bytes). The signature is compared as
//! raw bytes and decides the byte order of the eight integer fields after it.

use crate::error::ZtexError;
use crate::format::ZtexFormat;
use crate::source::{ByteSource, SliceSource};

/// Signature of a file whose integer fields are little-endian.
pub const MAGIC_LE: [u8; 4] = *b"ZTEX";
/// Signature of a file whose integer fields are big-endian.
pub const MAGIC_BE: [u8; 4] = *b"XETZ";
/// The only header version in existence.
pub const SUPPORTED_VERSION: u32 = 0;
/// Size of the fixed header in bytes.
pub const HEADER_SIZE: usize = 36;

/// Byte order of the header's integer fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn from_signature(signature: [u8; 4]) -> Result<Self, ZtexError> {
        match signature {
            MAGIC_LE => Ok(Self::Little),
            MAGIC_BE => Ok(Self::Big),
            other => Err(ZtexError::InvalidSignature(other)),
        }
    }

    fn u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }
}

/// Texture description following the signature and version.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TextureInfo {
    pub format: ZtexFormat,
    /// Width of mip level 0.
    pub width: u32,
    /// Height of mip level 0.
    pub height: u32,
    /// Number of stored mip levels, level 0 included.
    pub mip_count: u32,
    /// Logical in-game width. Not used for decoding.
    pub ref_width: u32,
    /// Logical in-game height. Not used for decoding.
    pub ref_height: u32,
    /// Packed A8R8G8B8 average colour. Not used for decoding.
    pub average_color: u32,
}

impl TextureInfo {
    /// Average colour as `[a, r, g, b]`.
    pub fn average_color_argb(&self) -> [u8; 4] {
        self.average_color.to_be_bytes()
    }

    /// Stored size of mip level 0 for uncompressed formats.
    pub(crate) fn level0_len(&self) -> Result<usize, ZtexError> {
        (self.width as usize)
            .checked_mul(self.height as usize)
            .and_then(|px| px.checked_mul(self.format.bytes_per_pixel()))
            .ok_or(ZtexError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            })
    }
}

/// Parsed and validated ZTEX file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZtexHeader {
    pub byte_order: ByteOrder,
    pub version: u32,
    pub info: TextureInfo,
}

impl ZtexHeader {
    /// Read the header from the start of `source`.
    ///
    /// Consumes exactly [`HEADER_SIZE`] bytes on success. A bad signature
    /// fails after the first 4 bytes.
    pub fn read<'a, S: ByteSource<'a>>(source: &mut S) -> Result<Self, ZtexError> {
        let byte_order = ByteOrder::from_signature(source.read_fixed_bytes::<4>()?)?;

        let rest = source.read_fixed_bytes::<32>()?;
        let mut fields = [0u32; 8];
        for (field, chunk) in fields.iter_mut().zip(rest.chunks_exact(4)) {
            *field = byte_order.u32([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        let [
            version,
            format,
            width,
            height,
            mip_count,
            ref_width,
            ref_height,
            average_color,
        ] = fields;

        if version != SUPPORTED_VERSION {
            return Err(ZtexError::UnsupportedVersion(version));
        }
        let format = ZtexFormat::from_code(format)?;

        Ok(Self {
            byte_order,
            version,
            info: TextureInfo {
                format,
                width,
                height,
                mip_count,
                ref_width,
                ref_height,
                average_color,
            },
        })
    }

    /// Parse only the header of in-memory ZTEX data.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ZtexError> {
        Self::read(&mut SliceSource::new(data))
    }
}
