//! Pixel-format catalog.
//!
//! Wire codes are fixed by the container. Every block-compressed format sits at
//! or above [`ZtexFormat::FIRST_COMPRESSED`], and classification relies on that
//! ordering.

use crate::error::ZtexError;

/// ZTEX pixel format, as stored in the header's format field.
///
/// Channel names list components from the most significant byte of a
/// little-endian word down, which for the 8-bit-per-channel formats is the
/// reverse of their order in memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum ZtexFormat {
    /// 32-bit, stored bytes B, G, R, A.
    B8G8R8A8 = 0,
    /// 32-bit, stored bytes R, G, B, A.
    R8G8B8A8 = 1,
    /// 32-bit, stored bytes A, B, G, R.
    A8B8G8R8 = 2,
    /// 32-bit, stored bytes A, R, G, B.
    A8R8G8B8 = 3,
    /// 24-bit, stored bytes B, G, R.
    B8G8R8 = 4,
    /// 24-bit, stored bytes R, G, B.
    R8G8B8 = 5,
    /// 16-bit word, 4 bits per channel.
    A4R4G4B4 = 6,
    /// 16-bit word, 1-bit alpha and 5 bits per colour channel.
    A1R5G5B5 = 7,
    /// 16-bit word, 5-bit red and blue, 6-bit green.
    R5G6B5 = 8,
    /// 8-bit palette indices into a 256-entry RGB table.
    P8 = 9,
    /// BC1, 8 bytes per 4x4 block.
    Dxt1 = 10,
    /// BC2 with premultiplied alpha.
    Dxt2 = 11,
    /// BC2, explicit 4-bit alpha.
    Dxt3 = 12,
    /// BC3 with premultiplied alpha.
    Dxt4 = 13,
    /// BC3, interpolated alpha.
    Dxt5 = 14,
}

/// Static per-format metadata.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatDescriptor {
    /// Stored bytes per pixel; 0 for block-compressed formats.
    pub bytes_per_pixel: usize,
    pub is_indexed: bool,
    pub is_compressed: bool,
}

impl ZtexFormat {
    /// Number of defined formats; any code at or above this is invalid.
    pub const COUNT: u32 = 15;

    /// Lowest wire code of the block-compressed group.
    pub const FIRST_COMPRESSED: u32 = ZtexFormat::Dxt1 as u32;

    /// Map a wire code to a format.
    pub fn from_code(code: u32) -> Result<Self, ZtexError> {
        Ok(match code {
            0 => Self::B8G8R8A8,
            1 => Self::R8G8B8A8,
            2 => Self::A8B8G8R8,
            3 => Self::A8R8G8B8,
            4 => Self::B8G8R8,
            5 => Self::R8G8B8,
            6 => Self::A4R4G4B4,
            7 => Self::A1R5G5B5,
            8 => Self::R5G6B5,
            9 => Self::P8,
            10 => Self::Dxt1,
            11 => Self::Dxt2,
            12 => Self::Dxt3,
            13 => Self::Dxt4,
            14 => Self::Dxt5,
            other => return Err(ZtexError::InvalidFormat(other)),
        })
    }

    /// Wire code of this format.
    pub const fn code(self) -> u32 {
        self as u32
    }

    pub const fn descriptor(self) -> FormatDescriptor {
        let bytes_per_pixel = match self {
            Self::B8G8R8A8 | Self::R8G8B8A8 | Self::A8B8G8R8 | Self::A8R8G8B8 => 4,
            Self::B8G8R8 | Self::R8G8B8 => 3,
            Self::A4R4G4B4 | Self::A1R5G5B5 | Self::R5G6B5 => 2,
            Self::P8 => 1,
            Self::Dxt1 | Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5 => 0,
        };
        FormatDescriptor {
            bytes_per_pixel,
            is_indexed: matches!(self, Self::P8),
            is_compressed: self.code() >= Self::FIRST_COMPRESSED,
        }
    }

    pub const fn bytes_per_pixel(self) -> usize {
        self.descriptor().bytes_per_pixel
    }

    pub const fn is_indexed(self) -> bool {
        self.descriptor().is_indexed
    }

    pub const fn is_compressed(self) -> bool {
        self.descriptor().is_compressed
    }

    /// DDS FourCC used when handing block-compressed data to a codec.
    pub(crate) const fn four_cc(self) -> Option<[u8; 4]> {
        match self {
            Self::Dxt1 => Some(*b"DXT1"),
            Self::Dxt2 => Some(*b"DXT2"),
            Self::Dxt3 => Some(*b"DXT3"),
            Self::Dxt4 => Some(*b"DXT4"),
            Self::Dxt5 => Some(*b"DXT5"),
            _ => None,
        }
    }

    /// Bytes per 4x4 block for block-compressed formats.
    pub(crate) const fn block_bytes(self) -> Option<usize> {
        match self {
            Self::Dxt1 => Some(8),
            Self::Dxt2 | Self::Dxt3 | Self::Dxt4 | Self::Dxt5 => Some(16),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_and_sentinel_rejected() {
        for code in 0..ZtexFormat::COUNT {
            assert_eq!(ZtexFormat::from_code(code).unwrap().code(), code);
        }
        assert!(matches!(
            ZtexFormat::from_code(ZtexFormat::COUNT),
            Err(ZtexError::InvalidFormat(15))
        ));
    }

    #[test]
    fn compression_follows_code_ordering() {
        for code in 0..ZtexFormat::COUNT {
            let format = ZtexFormat::from_code(code).unwrap();
            assert_eq!(format.is_compressed(), code >= ZtexFormat::FIRST_COMPRESSED);
            assert_eq!(format.is_compressed(), format.four_cc().is_some());
            assert_eq!(format.is_compressed(), format.bytes_per_pixel() == 0);
        }
    }

    #[test]
    fn only_p8_is_indexed() {
        assert!(ZtexFormat::P8.is_indexed());
        assert_eq!(ZtexFormat::P8.bytes_per_pixel(), 1);
        assert!(!ZtexFormat::R8G8B8.is_indexed());
        assert!(!ZtexFormat::Dxt1.is_indexed());
    }
}
