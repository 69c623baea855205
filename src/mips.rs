//! Size of the mip levels stored ahead of level 0.
//!
//! ZTEX writes mips smallest first, so reaching level 0 means skipping every
//! smaller level. The container does not record their sizes. They are
//! estimated by assuming each level shrinks by one fixed integer ratio per
//! axis, taken as the `n`-th root of the level-0 edge. For a `2^n` square with
//! `n` halving levels this is exact; for other chains it is only an estimate.

use alloc::format;

use crate::error::ZtexError;
use crate::header::TextureInfo;

/// Largest `r` with `r^n <= value`.
pub(crate) fn floor_root(value: u32, n: u32) -> u64 {
    let value = u64::from(value);
    if n <= 1 || value <= 1 {
        return value;
    }
    let (mut lo, mut hi) = (1u64, value);
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if mid.checked_pow(n).is_some_and(|p| p <= value) {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Pixel count of the levels below level 0: `sum(r^i, i = 1..n-1)` with
/// `r = floor(width^(1/n)) * floor(height^(1/n))`.
pub fn smaller_mips_pixel_count(width: u32, height: u32, mip_count: u32) -> Result<u64, ZtexError> {
    if mip_count == 0 {
        return Err(ZtexError::MalformedPayload("mip count is zero".into()));
    }
    if mip_count == 1 {
        return Ok(0);
    }

    let ratio = floor_root(width, mip_count) * floor_root(height, mip_count);
    match ratio {
        0 => Ok(0),
        // (r^n - r) / (r - 1) is 0/0 here; the series itself is n - 1 ones.
        1 => Ok(u64::from(mip_count - 1)),
        r => {
            let overflow = || {
                ZtexError::MalformedPayload(format!(
                    "mip chain for {width}x{height} with {mip_count} levels overflows"
                ))
            };
            let top = r.checked_pow(mip_count).ok_or_else(overflow)?;
            Ok((top - r) / (r - 1))
        }
    }
}

/// Bytes to skip before level 0 of an uncompressed texture.
pub fn smaller_mips_len(info: &TextureInfo) -> Result<usize, ZtexError> {
    let pixels = smaller_mips_pixel_count(info.width, info.height, info.mip_count)?;
    pixels
        .checked_mul(info.format.bytes_per_pixel() as u64)
        .and_then(|bytes| usize::try_from(bytes).ok())
        .ok_or_else(|| {
            ZtexError::MalformedPayload(format!(
                "mip chain of {pixels} pixels does not fit in memory"
            ))
        })
}
