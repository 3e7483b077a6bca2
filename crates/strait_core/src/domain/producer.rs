//! # Producer-Side State
//!
//! Owns the write position and the `full` flag. The flag is a registered
//! comparison: each tick computes fullness for the position *after* any
//! pending push, so an accepted push can never carry occupancy past
//! capacity even though the flag itself lands one tick later.

use super::Geometry;
use crate::error::ConfigError;
use crate::gray;
use crate::sync::Synchronizer;

/// Write-side state machine, driven once per producer-domain tick.
#[derive(Clone, Debug)]
pub struct ProducerState {
    /// Monotonic write position, `A+1` bits, wraps mod `2^(A+1)`.
    binary: u64,
    /// Gray encoding of `binary`; the only form the consumer ever sees.
    encoded: u64,
    /// Registered fullness flag gating push acceptance this tick.
    full: bool,
    /// Sampling pipeline for the consumer's encoded position.
    consumer_sync: Synchronizer,
    /// Derived bit masks.
    geometry: Geometry,
}

impl ProducerState {
    /// Creates a producer for a queue of capacity `2^address_bits`.
    pub fn new(address_bits: u8) -> Result<Self, ConfigError> {
        Ok(Self::with_geometry(Geometry::new(address_bits)?))
    }

    pub(crate) const fn with_geometry(geometry: Geometry) -> Self {
        Self {
            binary: 0,
            encoded: 0,
            full: false,
            consumer_sync: Synchronizer::new(),
            geometry,
        }
    }

    /// Returns this side to its reset state: position zero, not full,
    /// synchronizer cleared.
    pub fn reset(&mut self) {
        self.binary = 0;
        self.encoded = 0;
        self.full = false;
        self.consumer_sync.reset();
    }

    /// Advances one producer-domain tick.
    ///
    /// `consumer_encoded` is the consumer's encoded position as currently
    /// visible across the boundary; it is sampled into the synchronizer
    /// whether or not a push was requested.
    ///
    /// Returns `true` iff the push was accepted. Rejection when full is
    /// backpressure, not an error, and leaves the position untouched.
    pub fn tick(&mut self, push_request: bool, consumer_encoded: u64) -> bool {
        let accepted = push_request && !self.full;
        let next_binary = if accepted {
            (self.binary + 1) & self.geometry.position_mask
        } else {
            self.binary
        };
        let next_encoded = gray::encode(next_binary);

        // Registered-edge ordering: the comparison sees the synchronizer as
        // it was DURING this tick, then the pipeline shifts. The flag lands
        // for the next tick, computed against the post-push position.
        let synced = self.consumer_sync.synced();
        self.consumer_sync.capture(consumer_encoded);
        self.full = next_encoded == (synced ^ self.geometry.wrap_invert_mask);

        self.binary = next_binary;
        self.encoded = next_encoded;
        accepted
    }

    /// Whether the next push will be rejected.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.full
    }

    /// Current encoded position - the value the consumer's synchronizer
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

    /// Storage slot the next accepted push writes to.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn address(&self) -> usize {
        (self.binary & self.geometry.address_mask) as usize
    }

    /// Settled synchronizer output (diagnostic).
    #[inline]
    #[must_use]
    pub const fn synced_consumer(&self) -> u64 {
        self.consumer_sync.synced()
    }

    pub(crate) const fn sync_stages(&self) -> [u64; crate::sync::SYNC_STAGES] {
        self.consumer_sync.stages()
    }

    pub(crate) fn restore_parts(
        geometry: Geometry,
        binary: u64,
        full: bool,
        stages: [u64; crate::sync::SYNC_STAGES],
    ) -> Self {
        Self {
            binary,
            encoded: gray::encode(binary),
            full,
            consumer_sync: Synchronizer::from_stages(stages),
            geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_state() {
        let p = ProducerState::new(4).unwrap();
        assert!(!p.is_full());
        assert_eq!(p.binary(), 0);
        assert_eq!(p.encoded(), 0);
        assert_eq!(p.address(), 0);
    }

    #[test]
    fn test_accepted_push_advances() {
        let mut p = ProducerState::new(4).unwrap();
        assert!(p.tick(true, 0));
        assert_eq!(p.binary(), 1);
        assert_eq!(p.encoded(), gray::encode(1));
        assert_eq!(p.address(), 1);
    }

    #[test]
    fn test_idle_tick_is_noop_on_position() {
        let mut p = ProducerState::new(4).unwrap();
        assert!(!p.tick(false, 0));
        assert_eq!(p.binary(), 0);
    }

    #[test]
    fn test_full_asserts_after_capacity_pushes() {
        let mut p = ProducerState::new(4).unwrap();
        // Consumer never moves: its encoded position stays 0.
        for i in 0..16 {
            assert!(p.tick(true, 0), "push {i} should be accepted");
        }
        assert!(p.is_full());
        assert!(!p.tick(true, 0), "push past capacity must be rejected");
        assert_eq!(p.binary(), 16);
    }

    #[test]
    fn test_rejected_push_is_idempotent() {
        let mut p = ProducerState::new(1).unwrap();
        assert!(p.tick(true, 0));
        assert!(p.tick(true, 0));
        assert!(p.is_full());
        let before = (p.binary(), p.encoded());
        assert!(!p.tick(true, 0));
        assert!(!p.tick(true, 0));
        assert_eq!((p.binary(), p.encoded()), before);
    }

    #[test]
    fn test_address_wraps_within_capacity() {
        let mut p = ProducerState::new(2).unwrap();
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(p.address());
            assert!(p.tick(true, 0));
        }
        assert_eq!(seen, vec![0, 1, 2, 3]);
        assert_eq!(p.address(), 0, "address wraps after a full lap");
    }
}
