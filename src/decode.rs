use alloc::borrow::Cow;
use alloc::vec::Vec;

#[cfg(feature = "rgb")]
use rgb::AsPixels as _;

use enough::Stop;

use crate::codec::BlockCodec;
use crate::diag::{Diagnostics, Level, NoDiagnostics};
use crate::error::ZtexError;
use crate::format::ZtexFormat;
use crate::header::{ByteOrder, TextureInfo, ZtexHeader};
use crate::limits::Limits;
use crate::palette::Palette;
use crate::pixel::PixelLayout;
use crate::source::{ByteSource, SliceSource};
use crate::transcode::{NibbleUnpack, transcode};
use crate::{dds, mips};

/// Decoded mip level 0. Pixels may be borrowed (zero-copy) or owned.
#[derive(Clone, Debug)]
pub struct DecodeOutput<'a> {
    pixels: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    /// Stored format the pixels were decoded from.
    pub format: ZtexFormat,
}

impl<'a> DecodeOutput<'a> {
    /// Access the pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the pixel data (copies if borrowed).
    pub fn into_owned(self) -> DecodeOutput<'static> {
        DecodeOutput {
            pixels: Cow::Owned(self.pixels.into_owned()),
            width: self.width,
            height: self.height,
            layout: self.layout,
            format: self.format,
        }
    }

    /// Move the pixel data out (copies if borrowed).
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels.into_owned()
    }

    /// Whether the pixel data is borrowed (zero-copy from input).
    pub fn is_borrowed(&self) -> bool {
        matches!(self.pixels, Cow::Borrowed(_))
    }

    pub(crate) fn new(
        pixels: Cow<'a, [u8]>,
        info: &TextureInfo,
        layout: PixelLayout,
    ) -> Self {
        Self {
            pixels,
            width: info.width,
            height: info.height,
            layout,
            format: info.format,
        }
    }

    /// Reinterpret pixel data as typed pixel slice.
    ///
    /// Returns [`ZtexError::MalformedPayload`] if the pixel layout doesn't match `P`.
    #[cfg(feature = "rgb")]
    pub fn as_pixels<P: crate::DecodePixel>(&self) -> Result<&[P], ZtexError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        if self.layout != P::layout() {
            return Err(ZtexError::MalformedPayload(alloc::format!(
                "pixel layout is {:?}, requested {:?}",
                self.layout,
                P::layout()
            )));
        }
        Ok(self.pixels().as_pixels())
    }

    /// Zero-copy view as an [`imgref::ImgRef`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn as_imgref<P: crate::DecodePixel>(
        &self,
    ) -> Result<imgref::ImgRef<'_, P>, ZtexError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgRef::new(
            pixels,
            self.width as usize,
            self.height as usize,
        ))
    }

    /// Convert to an [`imgref::ImgVec`] of typed pixels.
    #[cfg(feature = "imgref")]
    pub fn to_imgvec<P: crate::DecodePixel>(&self) -> Result<imgref::ImgVec<P>, ZtexError>
    where
        [u8]: rgb::AsPixels<P>,
    {
        let pixels: &[P] = self.as_pixels()?;
        Ok(imgref::ImgVec::new(
            pixels.to_vec(),
            self.width as usize,
            self.height as usize,
        ))
    }
}

/// Builder for a single ZTEX decode.
///
/// ```no_run
/// use zentex::{DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // ZTEX file bytes
/// let limits = Limits {
///     max_pixels: Some(4096 * 4096),
///     ..Limits::default()
/// };
/// let decoded = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .decode(Unstoppable)?;
/// println!("{}x{} {:?}", decoded.width, decoded.height, decoded.layout);
/// # Ok::<(), zentex::ZtexError>(())
/// ```
pub struct DecodeRequest<'a, S> {
    source: S,
    limits: Option<&'a Limits>,
    codec: Option<&'a dyn BlockCodec>,
    diagnostics: &'a dyn Diagnostics,
    nibbles: NibbleUnpack,
}

impl<'a> DecodeRequest<'a, SliceSource<'a>> {
    /// Decode from in-memory ZTEX data.
    pub fn new(data: &'a [u8]) -> Self {
        Self::from_source(SliceSource::new(data))
    }
}

#[cfg(feature = "std")]
impl<'a, R: std::io::Read> DecodeRequest<'a, crate::source::ReaderSource<R>> {
    /// Decode from a blocking reader positioned at the start of a ZTEX file.
    pub fn from_reader(reader: R) -> Self {
        Self::from_source(crate::source::ReaderSource::new(reader))
    }
}

impl<'a, S: ByteSource<'a>> DecodeRequest<'a, S> {
    /// Decode from any [`ByteSource`].
    pub fn from_source(source: S) -> Self {
        Self {
            source,
            limits: None,
            codec: None,
            diagnostics: &NoDiagnostics,
            nibbles: NibbleUnpack::default(),
        }
    }

    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Decompressor for DXT1-DXT5 textures. Without one they fail with
    /// [`ZtexError::CodecRequired`].
    pub fn with_block_codec(mut self, codec: &'a dyn BlockCodec) -> Self {
        self.codec = Some(codec);
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: &'a dyn Diagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_nibble_unpack(mut self, nibbles: NibbleUnpack) -> Self {
        self.nibbles = nibbles;
        self
    }

    /// Run the decode, consuming the source up to the end of mip level 0.
    pub fn decode(mut self, stop: impl Stop) -> Result<DecodeOutput<'a>, ZtexError> {
        let stop: &dyn Stop = &stop;
        let diag = self.diagnostics;

        let header = ZtexHeader::read(&mut self.source)?;
        let info = header.info;
        if header.byte_order == ByteOrder::Big {
            diag.emit(
                Level::Warn,
                format_args!("big-endian ZTEX header; payload bytes are used as stored"),
            );
        }
        if info.width == 0 || info.height == 0 {
            return Err(ZtexError::MalformedPayload(alloc::format!(
                "empty texture {}x{}",
                info.width,
                info.height
            )));
        }
        if let Some(limits) = self.limits {
            limits.check(info.width, info.height)?;
        }
        stop.check()?;

        if info.format.is_compressed() {
            return self.decode_compressed(&info, stop);
        }

        let palette = if info.format.is_indexed() {
            Some(Palette::read(&mut self.source)?)
        } else {
            None
        };

        let skip = mips::smaller_mips_len(&info)?;
        if skip > 0 {
            diag.emit(
                Level::Debug,
                format_args!(
                    "skipping {} smaller mip levels ({skip} bytes)",
                    info.mip_count - 1
                ),
            );
            self.source.skip(skip)?;
        }

        let level0_len = info.level0_len()?;
        if let Some(limits) = self.limits {
            let out_len = (info.width as usize)
                .saturating_mul(info.height as usize)
                .saturating_mul(output_layout(info.format).bytes_per_pixel());
            limits.check_memory(level0_len.max(out_len))?;
        }
        let raw = self.source.take(level0_len)?;
        stop.check()?;

        if info.format == ZtexFormat::A4R4G4B4 && self.nibbles == NibbleUnpack::Legacy {
            diag.emit(
                Level::Debug,
                format_args!("A4R4G4B4 unpacked in storage order; channels are not ARGB"),
            );
        }
        let (pixels, layout) = transcode(
            info.format,
            raw,
            info.width,
            palette.as_ref(),
            self.nibbles,
            stop,
        )?;
        Ok(DecodeOutput::new(pixels, &info, layout))
    }

    fn decode_compressed(
        mut self,
        info: &TextureInfo,
        stop: &dyn Stop,
    ) -> Result<DecodeOutput<'a>, ZtexError> {
        let codec = self.codec.ok_or(ZtexError::CodecRequired(info.format))?;
        let header = dds::container_header(info).ok_or(ZtexError::CodecRequired(info.format))?;

        let budget = match self.limits {
            Some(limits) => {
                limits.check_memory(dds::CONTAINER_HEADER_SIZE)?;
                limits.memory_budget(dds::CONTAINER_HEADER_SIZE)
            }
            None => None,
        };
        let mut container = Vec::with_capacity(dds::CONTAINER_HEADER_SIZE);
        container.extend_from_slice(&header);
        let payload_len = self.source.read_remaining(&mut container, budget)?;
        self.diagnostics.emit(
            Level::Debug,
            format_args!(
                "handing {payload_len} {:?} bytes ({} mips) to block codec",
                info.format, info.mip_count
            ),
        );

        let decoded = codec.decompress(&container, stop)?;
        let expected = (info.width as usize)
            .checked_mul(info.height as usize)
            .and_then(|px| px.checked_mul(decoded.layout.bytes_per_pixel()));
        if expected != Some(decoded.pixels.len()) {
            return Err(ZtexError::Codec(alloc::format!(
                "codec returned {} bytes for {}x{} {:?}",
                decoded.pixels.len(),
                info.width,
                info.height,
                decoded.layout
            )));
        }
        Ok(DecodeOutput::new(
            Cow::Owned(decoded.pixels),
            info,
            decoded.layout,
        ))
    }
}

/// Canonical layout produced for an uncompressed format.
pub(crate) fn output_layout(format: ZtexFormat) -> PixelLayout {
    match format {
        ZtexFormat::B8G8R8 | ZtexFormat::R8G8B8 | ZtexFormat::P8 => PixelLayout::Rgb8,
        ZtexFormat::A1R5G5B5 => PixelLayout::Argb1555,
        ZtexFormat::R5G6B5 => PixelLayout::Rgb565,
        _ => PixelLayout::Argb8,
    }
}
