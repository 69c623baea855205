use alloc::format;

use crate::error::ZtexError;

/// Resource limits for a decode.
///
/// All fields default to `None` (no limit). Dimensions are checked right after
/// the header, memory before the level-0 payload or codec container is read.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height) of mip level 0.
    pub max_pixels: Option<u64>,
    /// Maximum bytes held for the stored payload or the decoded pixels.
    pub max_memory_bytes: Option<u64>,
}

fn within(what: &str, value: u64, limit: Option<u64>) -> Result<(), ZtexError> {
    match limit {
        Some(max) if value > max => Err(ZtexError::LimitExceeded(format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}

impl Limits {
    /// Check level-0 dimensions.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), ZtexError> {
        within("width", u64::from(width), self.max_width)?;
        within("height", u64::from(height), self.max_height)?;
        within(
            "pixel count",
            u64::from(width) * u64::from(height),
            self.max_pixels,
        )
    }

    /// Check an allocation size.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), ZtexError> {
        within("allocation of bytes", bytes as u64, self.max_memory_bytes)
    }

    /// Bytes left under the memory limit once `reserved` bytes are held.
    pub(crate) fn memory_budget(&self, reserved: usize) -> Option<usize> {
        self.max_memory_bytes.map(|max| {
            usize::try_from(max)
                .unwrap_or(usize::MAX)
                .saturating_sub(reserved)
        })
    }
}
