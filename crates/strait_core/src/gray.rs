//! # Gray Pointer Codec
//!
//! Converts a binary position counter into a reflected-Gray encoding where
//! advancing by one step changes exactly one bit.
//!
//! ## Why
//!
//! The two domains have no common clock, so a position register may be
//! sampled while it is transitioning. In binary, `0b0111 -> 0b1000` has four
//! bits in flight and a sample can yield a value the counter never held. In
//! Gray form at most one bit is in flight, so every possible sample is a
//! position the source held either before or after the step - never garbage.
//!
//! The protocol compares positions directly in encoded space; `decode` exists
//! for diagnostics and tests.

/// Encodes a binary position into reflected-Gray form.
///
/// Consecutive inputs (including the wraparound of any fixed-width space)
/// produce outputs that differ in exactly one bit. Bijective over any
/// `w`-bit space because the top bit is preserved and the fold is
/// invertible.
#[inline]
#[must_use]
pub const fn encode(binary: u64) -> u64 {
    binary ^ (binary >> 1)
}

/// Decodes a reflected-Gray value back to binary.
///
/// Inverse of [`encode`]; implemented as a logarithmic prefix-XOR fold.
/// Not used by the queue protocol itself.
#[inline]
#[must_use]
pub const fn decode(encoded: u64) -> u64 {
    let mut binary = encoded;
    binary ^= binary >> 32;
    binary ^= binary >> 16;
    binary ^= binary >> 8;
    binary ^= binary >> 4;
    binary ^= binary >> 2;
    binary ^= binary >> 1;
    binary
}
