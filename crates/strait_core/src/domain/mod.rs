//! # Per-Domain Position State
//!
//! Each side of the queue is a small state machine owned by exactly one
//! execution domain:
//!
//! - [`ProducerState`] owns the write position, the `full` flag, and the
//!   synchronized copy of the consumer's position.
//! - [`ConsumerState`] owns the read position, the `empty` flag, and the
//!   synchronized copy of the producer's position.
//!
//! Neither side ever reads the other's binary counter - only the Gray-encoded
//! value, and only through its own two-stage synchronizer. The single-writer
//! rule is enforced by construction: each synchronizer is a private field of
//! the receiving side, and the peer's encoded position enters `tick` as a
//! plain by-value sample.

mod consumer;
mod producer;

pub use consumer::ConsumerState;
pub use producer::ProducerState;

use crate::error::{validate_address_bits, ConfigError};

/// Bit masks derived from the address-bit count, shared by both sides.
///
/// Positions are one bit wider than addresses so that a full queue and an
/// empty queue (same address, different lap) stay distinguishable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Geometry {
    /// Number of address bits `A`; capacity is `2^A`.
    pub address_bits: u8,
    /// Mask for the `A+1`-bit position space.
    pub position_mask: u64,
    /// Mask extracting the low `A` storage-address bits.
    pub address_mask: u64,
    /// XOR mask flipping the top two bits of an `A+1`-bit Gray value.
    ///
    /// Bit-level contract: advancing a binary position by exactly one
    /// capacity (`2^A`) flips bit `A`, which in Gray form flips bits `A` and
    /// `A-1`. The fullness comparison therefore inverts the top TWO bits of
    /// the synchronized consumer position - not the top one, as in binary
    /// pointer schemes. Getting this mask wrong produces an off-by-one-
    /// capacity bug that only shows at the exact full boundary.
    pub wrap_invert_mask: u64,
}

impl Geometry {
    /// Derives the masks for `address_bits`, failing fast on malformed
    /// parameters.
    pub fn new(address_bits: u8) -> Result<Self, ConfigError> {
        validate_address_bits(address_bits)?;
        let a = u32::from(address_bits);
        Ok(Self {
            address_bits,
            position_mask: (1u64 << (a + 1)) - 1,
            address_mask: (1u64 << a) - 1,
            wrap_invert_mask: 0b11 << (a - 1),
        })
    }

    /// Queue capacity in slots.
    pub const fn capacity(self) -> usize {
        1 << self.address_bits
    }
}
