//! # Consumer-Side State
//!
//! Owns the read position and the `empty` flag. Emptiness is a direct
//! equality in encoded space - same position, same lap - unlike fullness,
//! which compares against a full-capacity offset via the top-two-bit
//! inversion.

use super::Geometry;
use crate::error::ConfigError;
use crate::gray;
use crate::sync::Synchronizer;

/// Read-side state machine, driven once per consumer-domain tick.
#[derive(Clone, Debug)]
pub struct ConsumerState {
    /// Monotonic read position, `A+1` bits, wraps mod `2^(A+1)`.
    binary: u64,
    /// Gray encoding of `binary`; the only form the producer ever sees.
    encoded: u64,
    /// Registered emptiness flag gating pop acceptance this tick.
    empty: bool,
    /// Sampling pipeline for the producer's encoded position.
    producer_sync: Synchronizer,
    /// Derived bit masks.
    geometry: Geometry,
}

impl ConsumerState {
    /// Creates a consumer for a queue of capacity `2^address_bits`.
    pub fn new(address_bits: u8) -> Result<Self, ConfigError> {
        Ok(Self::with_geometry(Geometry::new(address_bits)?))
    }

    pub(crate) const fn with_geometry(geometry: Geometry) -> Self {
        Self {
            binary: 0,
            encoded: 0,
            empty: true,
            producer_sync: Synchronizer::new(),
            geometry,
        }
    }

    /// Returns this side to its reset state: position zero, empty,
    /// synchronizer cleared.
    pub fn reset(&mut self) {
        self.binary = 0;
        self.encoded = 0;
        self.empty = true;
        self.producer_sync.reset();
    }

    /// Advances one consumer-domain tick.
    ///
    /// `producer_encoded` is the producer's encoded position as currently
    /// visible across the boundary; it is sampled into the synchronizer
    /// whether or not a pop was requested.
    ///
    /// Returns `true` iff the pop was accepted. The caller reads the storage
    /// slot at [`address`](Self::address) *before* this call; the content is
    /// only meaningful when the tick accepts.
    pub fn tick(&mut self, pop_request: bool, producer_encoded: u64) -> bool {
        let accepted = pop_request && !self.empty;
        let next_binary = if accepted {
            (self.binary + 1) & self.geometry.position_mask
        } else {
            self.binary
        };
        let next_encoded = gray::encode(next_binary);

        // Same registered-edge ordering as the producer side.
        let synced = self.producer_sync.synced();
        self.producer_sync.capture(producer_encoded);
        self.empty = next_encoded == synced;

        self.binary = next_binary;
        self.encoded = next_encoded;
        accepted
    }

    /// Whether the next pop will be rejected.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty
    }

    /// Current encoded position - the value the producer's synchronizer
    /// samples.
    #[inline]
    #[must_use]
    pub const fn encoded(&self) -> u64 {
        self.encoded
    }

    /// Current binary position (diagnostic; never crosses the boundary).
    #[inline]
    #[must_use]
    pub const fn binary(&self) -> u64 {
        self.binary
    }

    /// Storage slot the next accepted pop reads from.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn address(&self) -> usize {
        (self.binary & self.geometry.address_mask) as usize
    }

    /// Settled synchronizer output (diagnostic).
    #[inline]
    #[must_use]
    pub const fn synced_producer(&self) -> u64 {
        self.producer_sync.synced()
    }

    pub(crate) const fn sync_stages(&self) -> [u64; crate::sync::SYNC_STAGES] {
        self.producer_sync.stages()
    }

    pub(crate) fn restore_parts(
        geometry: Geometry,
        binary: u64,
        empty: bool,
        stages: [u64; crate::sync::SYNC_STAGES],
    ) -> Self {
        Self {
            binary,
            encoded: gray::encode(binary),
            empty,
            producer_sync: Synchronizer::from_stages(stages),
            geometry,
        }
    }
}
