use crate::error::ZtexError;
use crate::source::ByteSource;

/// Colour table of a `P8` texture: 256 entries of R, G, B.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    entries: [[u8; 3]; 256],
}

impl Palette {
    pub const ENTRIES: usize = 256;
    /// Stored size in bytes.
    pub const SIZE: usize = Self::ENTRIES * 3;

    /// Build a palette from exactly [`Palette::SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ZtexError> {
        if bytes.len() != Self::SIZE {
            return Err(ZtexError::MalformedPayload(alloc::format!(
                "palette must be {} bytes, got {}",
                Self::SIZE,
                bytes.len()
            )));
        }
        let mut entries = [[0u8; 3]; Self::ENTRIES];
        for (entry, rgb) in entries.iter_mut().zip(bytes.chunks_exact(3)) {
            entry.copy_from_slice(rgb);
        }
        Ok(Self { entries })
    }

    pub(crate) fn read<'a, S: ByteSource<'a>>(source: &mut S) -> Result<Self, ZtexError> {
        let mut bytes = [0u8; Palette::SIZE];
        source.read_exact_bytes(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    /// Entry at `index` as `[r, g, b]`.
    pub fn entry(&self, index: usize) -> Result<[u8; 3], ZtexError> {
        self.entries
            .get(index)
            .copied()
            .ok_or(ZtexError::PaletteIndexOutOfRange {
                index,
                entries: Self::ENTRIES,
            })
    }

    /// Infallible lookup for stored 8-bit indices.
    #[inline]
    pub(crate) fn lookup(&self, index: u8) -> [u8; 3] {
        self.entries[usize::from(index)]
    }
}
