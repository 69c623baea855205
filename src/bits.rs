//! Sub-byte channel expansion.
//!
//! Bit-replication tables follow zune-bmp 0.5.2 by Caleb Etemesi
//! (MIT/Apache-2.0/Zlib).

/// Split each byte into its high and low nibble, each widened to 8 bits.
///
/// `out` must hold two bytes per input byte.
pub(crate) fn expand_nibbles(input: &[u8], out: &mut [u8]) {
    for (in_val, out_vals) in input.iter().zip(out.chunks_exact_mut(2)) {
        out_vals[0] = 0x11 * (in_val >> 4);
        out_vals[1] = 0x11 * (in_val & 0x0f);
    }
}

/// Multiplier replicating an N-bit value across 8 bits (before the shift).
const MUL_TABLE: [u32; 9] = [
    0,    // 0 bits
    0xff, // 1 bit:  0b11111111
    0x55, // 2 bits: 0b01010101
    0x49, // 3 bits: 0b01001001
    0x11, // 4 bits: 0b00010001
    0x21, // 5 bits: 0b00100001
    0x41, // 6 bits: 0b01000001
    0x81, // 7 bits: 0b10000001
    0x01, // 8 bits: 0b00000001
];

const SHIFT_TABLE: [u32; 9] = [0, 0, 0, 1, 0, 2, 4, 6, 0];

/// Widen the `bits`-wide field of `word` starting at bit `shift` to 0..=255.
#[inline]
pub(crate) fn widen(word: u16, shift: u32, bits: u32) -> u8 {
    let bits = bits.clamp(1, 8);
    let v = (u32::from(word) >> shift) & ((1 << bits) - 1);
    ((v * MUL_TABLE[bits as usize]) >> SHIFT_TABLE[bits as usize]) as u8
}
