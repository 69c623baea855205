//! Canonical layouts to packed RGBA8.
//!
//! Many surfaces only accept 8-bit RGBA. 16-bit layouts are widened with
//! bit replication so full-scale channels map to 255.

use alloc::vec::Vec;

use crate::bits::widen;
use crate::decode::DecodeOutput;
use crate::error::ZtexError;
use crate::pixel::PixelLayout;

/// Expand `pixels` in `layout` to R, G, B, A bytes.
pub fn to_rgba8(pixels: &[u8], layout: PixelLayout) -> Result<Vec<u8>, ZtexError> {
    let bpp = layout.bytes_per_pixel();
    if !pixels.len().is_multiple_of(bpp) {
        return Err(ZtexError::MalformedPayload(alloc::format!(
            "{} bytes is not a whole number of {layout:?} pixels",
            pixels.len()
        )));
    }
    let mut out = Vec::with_capacity(pixels.len() / bpp * 4);
    match layout {
        PixelLayout::Argb8 => {
            for px in pixels.chunks_exact(4) {
                out.extend_from_slice(&[px[1], px[2], px[3], px[0]]);
            }
        }
        PixelLayout::Rgb8 => {
            for px in pixels.chunks_exact(3) {
                out.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
        }
        PixelLayout::Argb1555 => {
            for px in pixels.chunks_exact(2) {
                let v = u16::from_le_bytes([px[0], px[1]]);
                out.extend_from_slice(&[
                    widen(v, 10, 5),
                    widen(v, 5, 5),
                    widen(v, 0, 5),
                    widen(v, 15, 1),
                ]);
            }
        }
        PixelLayout::Rgb565 => {
            for px in pixels.chunks_exact(2) {
                let v = u16::from_le_bytes([px[0], px[1]]);
                out.extend_from_slice(&[widen(v, 11, 5), widen(v, 5, 6), widen(v, 0, 5), 255]);
            }
        }
    }
    Ok(out)
}

impl DecodeOutput<'_> {
    /// Pixels expanded to packed RGBA8, whatever the canonical layout.
    pub fn to_rgba8(&self) -> Result<Vec<u8>, ZtexError> {
        to_rgba8(self.pixels(), self.layout)
    }

    /// Pixels expanded to typed [`rgb::RGBA8`].
    #[cfg(feature = "rgb")]
    pub fn to_rgba8_pixels(&self) -> Result<Vec<rgb::RGBA8>, ZtexError> {
        Ok(self
            .to_rgba8()?
            .chunks_exact(4)
            .map(|c| rgb::RGBA8::new(c[0], c[1], c[2], c[3]))
            .collect())
    }

    /// Pixels expanded to an RGBA8 [`imgref::ImgVec`].
    #[cfg(feature = "imgref")]
    pub fn to_rgba8_imgvec(&self) -> Result<imgref::ImgVec<rgb::RGBA8>, ZtexError> {
        Ok(imgref::ImgVec::new(
            self.to_rgba8_pixels()?,
            self.width as usize,
            self.height as usize,
        ))
    }
}
