//! Level-0 payload to canonical layout.
//!
//! 32- and 24-bit formats are reordered in place, so a borrowed payload is
//! copied once at most and identity formats stay borrowed. Palette and nibble
//! expansion grow the data and always allocate.

use alloc::borrow::Cow;
use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::bits::expand_nibbles;
use crate::error::ZtexError;
use crate::format::ZtexFormat;
use crate::palette::Palette;
use crate::pixel::PixelLayout;

/// How `A4R4G4B4` payloads are widened to [`PixelLayout::Argb8`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NibbleUnpack {
    /// Split every stored byte into high then low nibble, in storage order.
    ///
    /// Matches the behaviour of existing ZTEX tooling. Channels are not
    /// reordered: a little-endian `0xARGB` word comes out as G, B, A, R.
    #[default]
    Legacy,
    /// Decode each little-endian word into A, R, G, B bytes.
    Channels,
}

/// Convert a level-0 payload of `format` into its canonical layout.
///
/// `raw` must be whole rows of `width` pixels. `palette` is required for
/// [`ZtexFormat::P8`] and ignored otherwise.
pub fn transcode<'a>(
    format: ZtexFormat,
    raw: Cow<'a, [u8]>,
    width: u32,
    palette: Option<&Palette>,
    nibbles: NibbleUnpack,
    stop: &dyn Stop,
) -> Result<(Cow<'a, [u8]>, PixelLayout), ZtexError> {
    if format.is_compressed() {
        return Err(ZtexError::CodecRequired(format));
    }

    let bpp = format.bytes_per_pixel();
    if !raw.len().is_multiple_of(bpp) {
        return Err(ZtexError::MalformedPayload(alloc::format!(
            "{} payload bytes is not a multiple of the {bpp}-byte {format:?} pixel",
            raw.len()
        )));
    }
    let row_pixels = (width as usize).max(1);
    // Row strides below are at most 4 bytes per pixel.
    if row_pixels.checked_mul(4).is_none() {
        return Err(ZtexError::MalformedPayload(alloc::format!(
            "row of {width} pixels overflows"
        )));
    }

    let converted = match format {
        ZtexFormat::B8G8R8A8 => (
            permute::<4>(raw, row_pixels, stop, |px| px.reverse())?,
            PixelLayout::Argb8,
        ),
        ZtexFormat::R8G8B8A8 => (
            permute::<4>(raw, row_pixels, stop, |px| px.rotate_right(1))?,
            PixelLayout::Argb8,
        ),
        ZtexFormat::A8B8G8R8 => (
            permute::<4>(raw, row_pixels, stop, |px| px.swap(1, 3))?,
            PixelLayout::Argb8,
        ),
        ZtexFormat::A8R8G8B8 => (raw, PixelLayout::Argb8),
        ZtexFormat::B8G8R8 => (
            permute::<3>(raw, row_pixels, stop, |px| px.reverse())?,
            PixelLayout::Rgb8,
        ),
        ZtexFormat::R8G8B8 => (raw, PixelLayout::Rgb8),
        ZtexFormat::A4R4G4B4 => (
            Cow::Owned(unpack_argb4444(&raw, row_pixels, nibbles, stop)?),
            PixelLayout::Argb8,
        ),
        ZtexFormat::A1R5G5B5 => (raw, PixelLayout::Argb1555),
        ZtexFormat::R5G6B5 => (raw, PixelLayout::Rgb565),
        ZtexFormat::P8 => {
            let palette = palette.ok_or_else(|| {
                ZtexError::MalformedPayload("P8 payload without a palette".into())
            })?;
            (
                Cow::Owned(expand_palette(&raw, row_pixels, palette, stop)?),
                PixelLayout::Rgb8,
            )
        }
        ZtexFormat::Dxt1
        | ZtexFormat::Dxt2
        | ZtexFormat::Dxt3
        | ZtexFormat::Dxt4
        | ZtexFormat::Dxt5 => return Err(ZtexError::CodecRequired(format)),
    };
    Ok(converted)
}

/// Apply `f` to every `N`-byte pixel, checking `stop` every 16 rows.
fn permute<'a, const N: usize>(
    mut raw: Cow<'a, [u8]>,
    row_pixels: usize,
    stop: &dyn Stop,
    f: impl Fn(&mut [u8]),
) -> Result<Cow<'a, [u8]>, ZtexError> {
    let buf = raw.to_mut();
    for (row_idx, row) in buf.chunks_mut(row_pixels * N).enumerate() {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        row.chunks_exact_mut(N).for_each(&f);
    }
    Ok(raw)
}

fn unpack_argb4444(
    raw: &[u8],
    row_pixels: usize,
    nibbles: NibbleUnpack,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ZtexError> {
    let mut out = vec![0u8; raw.len() * 2];
    for (row_idx, (in_row, out_row)) in raw
        .chunks(row_pixels * 2)
        .zip(out.chunks_mut(row_pixels * 4))
        .enumerate()
    {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        match nibbles {
            NibbleUnpack::Legacy => expand_nibbles(in_row, out_row),
            NibbleUnpack::Channels => {
                for (px, argb) in in_row.chunks_exact(2).zip(out_row.chunks_exact_mut(4)) {
                    let v = u16::from_le_bytes([px[0], px[1]]);
                    argb[0] = 0x11 * ((v >> 12) & 0xf) as u8;
                    argb[1] = 0x11 * ((v >> 8) & 0xf) as u8;
                    argb[2] = 0x11 * ((v >> 4) & 0xf) as u8;
                    argb[3] = 0x11 * (v & 0xf) as u8;
                }
            }
        }
    }
    Ok(out)
}

fn expand_palette(
    raw: &[u8],
    row_pixels: usize,
    palette: &Palette,
    stop: &dyn Stop,
) -> Result<Vec<u8>, ZtexError> {
    let mut out = vec![0u8; raw.len() * 3];
    for (row_idx, (in_row, out_row)) in raw
        .chunks(row_pixels)
        .zip(out.chunks_mut(row_pixels * 3))
        .enumerate()
    {
        if row_idx % 16 == 0 {
            stop.check()?;
        }
        for (&idx, rgb) in in_row.iter().zip(out_row.chunks_exact_mut(3)) {
            rgb.copy_from_slice(&palette.lookup(idx));
        }
    }
    Ok(out)
}
