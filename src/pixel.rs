/// Canonical pixel memory layout of decoded output.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 4 channels, 8-bit, bytes in A, R, G, B order.
    Argb8,
    /// 3 channels, 8-bit, bytes in R, G, B order.
    Rgb8,
    /// 16-bit little-endian words: 1 bit alpha, 5 bits each red, green, blue.
    Argb1555,
    /// 16-bit little-endian words: 5 bits red, 6 bits green, 5 bits blue.
    Rgb565,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Argb8 => 4,
            Self::Rgb8 => 3,
            Self::Argb1555 | Self::Rgb565 => 2,
        }
    }
}

/// Typed pixels that a [`crate::DecodeOutput`] can be viewed as without copying.
#[cfg(feature = "rgb")]
pub trait DecodePixel: Copy {
    fn layout() -> PixelLayout;
}

#[cfg(feature = "rgb")]
impl DecodePixel for rgb::RGB8 {
    fn layout() -> PixelLayout {
        PixelLayout::Rgb8
    }
}
