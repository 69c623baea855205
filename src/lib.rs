//! # zentex
//!
//! Decoder for ZTEX, the texture container of the ZenGin game engine.
//!
//! A ZTEX file is a 36-byte header, an optional 256-colour palette, every mip
//! level smaller than the full image (smallest first) and finally mip level 0.
//! Decoding reads level 0 and converts it into one of a few canonical pixel
//! layouts ([`PixelLayout`]) that image surfaces accept directly.
//!
//! ## Zero-Copy Decoding
//!
//! When the input is a byte slice and the stored format already matches its
//! canonical layout (A8R8G8B8, R8G8B8, A1R5G5B5, R5G6B5), the decoded pixels
//! borrow from the input. Swizzled, palettized and 4-bit formats allocate.
//!
//! ## Supported Formats
//!
//! - 32-bit: B8G8R8A8, R8G8B8A8, A8B8G8R8, A8R8G8B8 → [`PixelLayout::Argb8`]
//! - 24-bit: B8G8R8, R8G8B8 → [`PixelLayout::Rgb8`]
//! - 16-bit: A1R5G5B5 → [`PixelLayout::Argb1555`], R5G6B5 → [`PixelLayout::Rgb565`],
//!   A4R4G4B4 → [`PixelLayout::Argb8`] (see [`NibbleUnpack`])
//! - 8-bit palettized P8 → [`PixelLayout::Rgb8`]
//! - DXT1-DXT5 through a [`BlockCodec`] (`bcn` feature provides one)
//!
//! ## Non-Goals
//!
//! - Encoding ZTEX files
//! - Byte-swapping big-endian pixel payloads (big-endian headers are read)
//! - Decoding mip levels other than level 0
//!
//! ## Usage
//!
//! ```no_run
//! use zentex::{DecodeRequest, Unstoppable, ZtexHeader};
//!
//! let data: &[u8] = &[]; // your .TEX bytes
//!
//! // Probe without decoding
//! let header = ZtexHeader::from_bytes(data)?;
//! println!("{}x{} {:?}", header.info.width, header.info.height, header.info.format);
//!
//! // Decode (zero-copy when possible)
//! let decoded = DecodeRequest::new(data).decode(Unstoppable)?;
//! let rgba = decoded.to_rgba8()?;
//! # let _ = rgba;
//! # Ok::<(), zentex::ZtexError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod bits;
mod codec;
mod convert;
pub mod dds;
mod decode;
mod diag;
mod error;
mod format;
mod header;
mod limits;
mod mips;
mod palette;
mod pixel;
mod source;
mod transcode;

// Re-exports
#[cfg(feature = "bcn")]
pub use codec::Texture2dCodec;
pub use codec::{BlockCodec, CodecOutput};
pub use convert::to_rgba8;
pub use decode::{DecodeOutput, DecodeRequest};
#[cfg(feature = "log")]
pub use diag::LogDiagnostics;
pub use diag::{Diagnostics, FnDiagnostics, Level, NoDiagnostics};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::ZtexError;
pub use format::{FormatDescriptor, ZtexFormat};
pub use header::{ByteOrder, HEADER_SIZE, MAGIC_BE, MAGIC_LE, TextureInfo, ZtexHeader};
pub use limits::Limits;
pub use mips::{smaller_mips_len, smaller_mips_pixel_count};
pub use palette::Palette;
#[cfg(feature = "rgb")]
pub use pixel::DecodePixel;
pub use pixel::PixelLayout;
#[cfg(feature = "std")]
pub use source::ReaderSource;
pub use source::{ByteSource, SliceSource};
pub use transcode::{NibbleUnpack, transcode};

/// Read only the header of in-memory ZTEX data.
pub fn probe(data: &[u8]) -> Result<TextureInfo, ZtexError> {
    ZtexHeader::from_bytes(data).map(|header| header.info)
}

/// Decode in-memory ZTEX data with default options.
pub fn decode(data: &[u8], stop: impl Stop) -> Result<DecodeOutput<'_>, ZtexError> {
    DecodeRequest::new(data).decode(stop)
}

/// Decode a ZTEX file from a blocking reader with default options.
#[cfg(feature = "std")]
pub fn decode_reader<R: std::io::Read>(
    reader: R,
    stop: impl Stop,
) -> Result<DecodeOutput<'static>, ZtexError> {
    DecodeRequest::from_reader(reader).decode(stop)
}
