//! Word-level GF(2) primitives.
//!
//! Digital nets do all of their arithmetic on 64-bit words interpreted as
//! vectors of 64 binary digits. This module collects the three stateless
//! operations the rest of the crate builds on:
//!
//! - [`trailing_zero_bit`] drives the Gray-code walk (which generating row
//!   changes between consecutive points),
//! - [`bit_reverse32`] / [`bit_reverse64`] convert between the
//!   most-significant-bit-first convention used by interlaced Sobol table
//!   files and the engine's internal bit order,
//! - [`gf2_inner_product`] is the dot product over GF(2) used by linear
//!   scrambling.

/// Returns the index (0-based, from the least-significant bit) of the lowest
/// set bit of `x`.
///
/// The Gray counter that calls this starts at 1 and only counts up, so `x`
/// is never zero in practice. For `x == 0` this returns 64.
///
/// # Example
///
/// ```
/// use digitalnet::bits::trailing_zero_bit;
///
/// assert_eq!(trailing_zero_bit(1), 0);
/// assert_eq!(trailing_zero_bit(0b1000), 3);
/// assert_eq!(trailing_zero_bit(6), 1);
/// ```
#[inline]
pub fn trailing_zero_bit(x: u64) -> u32 {
    x.trailing_zeros()
}

/// Reverses the bit order of a 32-bit word.
#[inline]
pub fn bit_reverse32(x: u32) -> u32 {
    x.reverse_bits()
}

/// Reverses the bit order of a 64-bit word.
///
/// Interlaced Sobol tables store each generating row most-significant-bit
/// first; the loaders reverse every row on ingestion so the engine sees its
/// own convention.
///
/// # Example
///
/// ```
/// use digitalnet::bits::bit_reverse64;
///
/// assert_eq!(bit_reverse64(1), 1 << 63);
/// assert_eq!(bit_reverse64(bit_reverse64(0xDEAD_BEEF)), 0xDEAD_BEEF);
/// ```
#[inline]
pub fn bit_reverse64(x: u64) -> u64 {
    x.reverse_bits()
}

/// Computes the GF(2) inner product of two 64-bit vectors.
///
/// This is the parity of `popcount(a & b)`; the result is 0 or 1. Linear
/// scrambling assembles each output word one bit at a time from these
/// products.
///
/// # Example
///
/// ```
/// use digitalnet::bits::gf2_inner_product;
///
/// assert_eq!(gf2_inner_product(0b1011, 0b1110), 0); // two shared bits
/// assert_eq!(gf2_inner_product(0b1011, 0b0110), 1); // one shared bit
/// ```
#[inline]
pub fn gf2_inner_product(a: u64, b: u64) -> u64 {
    ((a & b).count_ones() & 1) as u64
}
