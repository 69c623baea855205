use alloc::string::String;
use enough::StopReason;

use crate::format::ZtexFormat;

/// Errors from ZTEX decoding.
///
/// Every variant is fatal to the decode call that produced it. The position
/// of a streaming source is unspecified afterwards.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ZtexError {
    #[error("invalid ZTEX signature: {0:02x?}")]
    InvalidSignature([u8; 4]),

    #[error("unsupported ZTEX version: {0}")]
    UnsupportedVersion(u32),

    #[error("invalid ZTEX pixel format code: {0}")]
    InvalidFormat(u32),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("palette index {index} out of range (palette has {entries} entries)")]
    PaletteIndexOutOfRange { index: usize, entries: usize },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[cfg(feature = "std")]
    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("block-compressed format {0:?} requires a block codec")]
    CodecRequired(ZtexFormat),

    #[error("block codec failed: {0}")]
    Codec(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl ZtexError {
    /// Whether this error came from the underlying byte source (truncation
    /// or a failed read) rather than from the content of the file.
    pub fn is_io(&self) -> bool {
        match self {
            ZtexError::UnexpectedEof => true,
            #[cfg(feature = "std")]
            ZtexError::Io(_) => true,
            _ => false,
        }
    }
}

impl From<StopReason> for ZtexError {
    fn from(r: StopReason) -> Self {
        ZtexError::Cancelled(r)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for ZtexError {
    fn from(error: std::io::Error) -> Self {
        match error.kind() {
            std::io::ErrorKind::UnexpectedEof => ZtexError::UnexpectedEof,
            _ => ZtexError::Io(error),
        }
    }
}
