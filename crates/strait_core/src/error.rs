//! # Configuration Errors
//!
//! The only fallible surface of the queue is construction and snapshot
//! restore. Rejected pushes and pops are NOT errors - they are the designed
//! backpressure mechanism, signaled through the accepted boolean.

use thiserror::Error;

/// Widest supported address space. Positions are `address_bits + 1` wide and
/// held in `u64`, but capacities beyond `2^32` slots have no realistic use.
pub const MAX_ADDRESS_BITS: u8 = 32;

/// Errors raised when building or restoring a queue with malformed
/// parameters. All of these fail fast at construction; nothing here can
/// occur during steady-state operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The queue needs at least one address bit (capacity 2). With zero bits
    /// the wrap-distinguishing scheme degenerates.
    #[error("address_bits must be at least 1")]
    ZeroAddressBits,

    /// Requested address space exceeds the supported maximum.
    #[error("address_bits {requested} exceeds the supported maximum of {max}")]
    AddressBitsTooLarge {
        /// The address-bit count that was requested.
        requested: u8,
        /// The supported maximum ([`MAX_ADDRESS_BITS`]).
        max: u8,
    },

    /// Capacity requests must be a power of two so that positions wrap
    /// cleanly on an address-bit boundary.
    #[error("capacity {requested} is not a power of two")]
    CapacityNotPowerOfTwo {
        /// The capacity that was requested.
        requested: usize,
    },

    /// A snapshot's storage length disagrees with its declared geometry.
    #[error("snapshot storage holds {actual} slots, geometry requires {expected}")]
    SnapshotStorageMismatch {
        /// Slot count implied by the snapshot's address bits.
        expected: usize,
        /// Slot count actually present in the snapshot.
        actual: usize,
    },
}

/// Validates an address-bit count, shared by every constructor that takes
/// one.
pub(crate) const fn validate_address_bits(address_bits: u8) -> Result<(), ConfigError> {
    if address_bits == 0 {
        return Err(ConfigError::ZeroAddressBits);
    }
    if address_bits > MAX_ADDRESS_BITS {
        return Err(ConfigError::AddressBitsTooLarge {
            requested: address_bits,
            max: MAX_ADDRESS_BITS,
        });
    }
    Ok(())
}
