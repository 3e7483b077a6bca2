//! # Assembled Dual-Domain FIFO
//!
//! Wires the two per-domain state machines to a fixed storage array:
//!
//! ```text
//!            producer domain          │          consumer domain
//!   ┌───────────────┐                 │                 ┌───────────────┐
//!   │ ProducerState │ ── encoded ──►  sync  ──────────► │ ConsumerState │
//!   │  wbin / full  │ ◄────────────── sync ◄── encoded ─│  rbin / empty │
//!   └──────┬────────┘                 │                 └───────┬───────┘
//!          │ write at wbin[A-1:0]     │       read at rbin[A-1:0]│
//!          ▼                          │                          ▼
//!   ┌──────────────────────── storage: 2^A slots ─────────────────────────┐
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storage array is dual-owned by address range: the producer is the
//! only writer of the slot at its current write address, the consumer the
//! only reader of the slot at its current read address, and the flag
//! protocol guarantees those addresses never collide on a live slot.
//!
//! In this in-process model each tick is an atomic state transition of one
//! side; ticks of the two sides may be interleaved arbitrarily. The
//! synchronizer pipeline still imposes the same bounded-lag visibility the
//! modeled hardware has.

use serde::{Deserialize, Serialize};

use crate::domain::{ConsumerState, Geometry, ProducerState};
use crate::error::ConfigError;
use crate::sync::SYNC_STAGES;

/// Bounded FIFO exchanged between two independently ticking domains.
///
/// `T` is the opaque payload. Storage is allocated once at construction and
/// never grows; `Default` fills the initial slots, `Clone` copies values out
/// on pop.
#[derive(Clone, Debug)]
pub struct StraitFifo<T> {
    /// Write-side state machine.
    producer: ProducerState,
    /// Read-side state machine.
    consumer: ConsumerState,
    /// Fixed payload array, indexed by the low address bits of each side's
    /// binary position. Popped slots keep their stale payload; the protocol
    /// never exposes them.
    storage: Vec<T>,
    /// Derived bit masks (shared with both sides).
    geometry: Geometry,
}

impl<T: Clone + Default> StraitFifo<T> {
    /// Creates a queue of capacity `2^address_bits`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::ZeroAddressBits`] or
    /// [`ConfigError::AddressBitsTooLarge`] for malformed parameters.
    pub fn new(address_bits: u8) -> Result<Self, ConfigError> {
        let geometry = Geometry::new(address_bits)?;
        Ok(Self {
            producer: ProducerState::with_geometry(geometry),
            consumer: ConsumerState::with_geometry(geometry),
            storage: vec![T::default(); geometry.capacity()],
            geometry,
        })
    }

    /// Creates a queue holding exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// [`ConfigError::CapacityNotPowerOfTwo`] unless `capacity` is a power
    /// of two, plus the same range errors as [`new`](Self::new).
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        if !capacity.is_power_of_two() {
            return Err(ConfigError::CapacityNotPowerOfTwo {
                requested: capacity,
            });
        }
        let address_bits = u8::try_from(capacity.trailing_zeros()).unwrap_or(u8::MAX);
        Self::new(address_bits)
    }

    /// Restores a queue from a persisted snapshot.
    ///
    /// # Errors
    ///
    /// Geometry errors as in [`new`](Self::new), plus
    /// [`ConfigError::SnapshotStorageMismatch`] if the storage length does
    /// not match the declared address bits.
    pub fn restore(snapshot: FifoSnapshot<T>) -> Result<Self, ConfigError> {
        let geometry = Geometry::new(snapshot.address_bits)?;
        if snapshot.storage.len() != geometry.capacity() {
            return Err(ConfigError::SnapshotStorageMismatch {
                expected: geometry.capacity(),
                actual: snapshot.storage.len(),
            });
        }
        Ok(Self {
            producer: ProducerState::restore_parts(
                geometry,
                snapshot.producer.binary & geometry.position_mask,
                snapshot.producer.flag,
                snapshot.producer.stages,
            ),
            consumer: ConsumerState::restore_parts(
                geometry,
                snapshot.consumer.binary & geometry.position_mask,
                snapshot.consumer.flag,
                snapshot.consumer.stages,
            ),
            storage: snapshot.storage,
            geometry,
        })
    }

    /// Advances the producer domain by one tick.
    ///
    /// Writes `data` into the current write slot iff the push is accepted;
    /// a rejected push drops `data` and the caller retries on a later tick.
    /// The consumer's position is sampled into the producer-side
    /// synchronizer on every tick, push or not.
    pub fn producer_tick(&mut self, push_request: bool, data: T) -> bool {
        let slot = self.producer.address();
        let accepted = self.producer.tick(push_request, self.consumer.encoded());
        if accepted {
            self.storage[slot] = data;
        }
        accepted
    }

    /// Advances the consumer domain by one tick.
    ///
    /// Returns `Some(value)` iff a pop was accepted; the slot is cloned out
    /// and its stale content stays in the array.
    pub fn consumer_tick(&mut self, pop_request: bool) -> Option<T> {
        let slot = self.consumer.address();
        let accepted = self.consumer.tick(pop_request, self.producer.encoded());
        accepted.then(|| self.storage[slot].clone())
    }

    /// Captures the complete persisted state layout.
    #[must_use]
    pub fn snapshot(&self) -> FifoSnapshot<T> {
        FifoSnapshot {
            address_bits: self.geometry.address_bits,
            producer: DomainSnapshot {
                binary: self.producer.binary(),
                encoded: self.producer.encoded(),
                flag: self.producer.is_full(),
                stages: self.producer.sync_stages(),
            },
            consumer: DomainSnapshot {
                binary: self.consumer.binary(),
                encoded: self.consumer.encoded(),
                flag: self.consumer.is_empty(),
                stages: self.consumer.sync_stages(),
            },
            storage: self.storage.clone(),
        }
    }
}

impl<T> StraitFifo<T> {
    /// Whether the producer's next push will be rejected.
    #[inline]
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.producer.is_full()
    }

    /// Whether the consumer's next pop will be rejected.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.consumer.is_empty()
    }

    /// Queue capacity in slots.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.geometry.capacity()
    }

    /// Address-bit count the queue was built with.
    #[inline]
    #[must_use]
    pub const fn address_bits(&self) -> u8 {
        self.geometry.address_bits
    }

    /// Exact number of accepted-but-not-yet-popped elements.
    ///
    /// Omniscient diagnostic: it reads both binary counters at once, which
    /// neither domain could do in the modeled hardware. For tests and
    /// monitors only - the domains themselves must keep deciding through
    /// their pessimistic flags.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn occupancy(&self) -> usize {
        (self
            .producer
            .binary()
            .wrapping_sub(self.consumer.binary())
            & self.geometry.position_mask) as usize
    }

    /// Read access to the producer-side state machine.
    #[inline]
    #[must_use]
    pub const fn producer(&self) -> &ProducerState {
        &self.producer
    }

    /// Read access to the consumer-side state machine.
    #[inline]
    #[must_use]
    pub const fn consumer(&self) -> &ConsumerState {
        &self.consumer
    }

    /// Resets both domains to their initial state.
    ///
    /// The modeled hardware has one reset line per domain, but releasing
    /// only one side mid-flight violates the protocol, so the model exposes
    /// the only safe composite. Storage is deliberately not cleared: stale
    /// payloads are unreachable through the protocol.
    pub fn reset(&mut self) {
        self.producer.reset();
        self.consumer.reset();
    }
}

/// Persisted state of one domain: its position in both forms, its flag, and
/// its synchronizer stage pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSnapshot {
    /// Binary position.
    pub binary: u64,
    /// Gray-encoded position (redundant with `binary`; kept because it is
    /// the register that actually crosses the boundary).
    pub encoded: u64,
    /// The domain's registered flag: `full` for the producer, `empty` for
    /// the consumer.
    pub flag: bool,
    /// Synchronizer stages, raw capture first.
    pub stages: [u64; SYNC_STAGES],
}

/// Complete persisted state layout of a queue, per the storage contract:
/// both domain states plus the payload array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FifoSnapshot<T> {
    /// Geometry the queue was built with.
    pub address_bits: u8,
    /// Producer-side registers.
    pub producer: DomainSnapshot,
    /// Consumer-side registers.
    pub consumer: DomainSnapshot,
    /// Payload slots, including stale content of popped slots.
    pub storage: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction() {
        let fifo: StraitFifo<u32> = StraitFifo::new(4).unwrap();
        assert_eq!(fifo.capacity(), 16);
        assert_eq!(fifo.address_bits(), 4);
        assert!(fifo.is_empty());
        assert!(!fifo.is_full());
        assert_eq!(fifo.occupancy(), 0);
    }

    #[test]
    fn test_with_capacity() {
        let fifo: StraitFifo<u32> = StraitFifo::with_capacity(8).unwrap();
        assert_eq!(fifo.capacity(), 8);
        assert_eq!(
            StraitFifo::<u32>::with_capacity(12).unwrap_err(),
            ConfigError::CapacityNotPowerOfTwo { requested: 12 }
        );
        assert_eq!(
            StraitFifo::<u32>::with_capacity(1).unwrap_err(),
            ConfigError::ZeroAddressBits
        );
    }

    #[test]
    fn test_push_then_pop_single_value() {
        let mut fifo: StraitFifo<u64> = StraitFifo::new(2).unwrap();
        assert!(fifo.producer_tick(true, 99));
        assert_eq!(fifo.occupancy(), 1);

        // Three consumer ticks of synchronizer+flag latency, then the pop.
        assert_eq!(fifo.consumer_tick(true), None);
        assert_eq!(fifo.consumer_tick(true), None);
        assert_eq!(fifo.consumer_tick(true), None);
        assert_eq!(fifo.consumer_tick(true), Some(99));
        assert_eq!(fifo.occupancy(), 0);
    }

    #[test]
    fn test_idle_ticks_only_move_flags() {
        let mut fifo: StraitFifo<u64> = StraitFifo::new(3).unwrap();
        assert!(fifo.producer_tick(true, 1));
        let occupancy = fifo.occupancy();
        for _ in 0..10 {
            assert!(!fifo.producer_tick(false, 0));
            assert_eq!(fifo.consumer_tick(false), None);
        }
        assert_eq!(fifo.occupancy(), occupancy);
        assert!(!fifo.is_empty(), "idle ticks still propagate positions");
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut fifo: StraitFifo<u64> = StraitFifo::new(2).unwrap();
        for i in 0..4 {
            assert!(fifo.producer_tick(true, i));
        }
        assert!(fifo.is_full());
        fifo.reset();
        assert!(fifo.is_empty());
        assert!(!fifo.is_full());
        assert_eq!(fifo.occupancy(), 0);
        assert!(fifo.producer_tick(true, 7));
    }

    #[test]
    fn test_snapshot_roundtrip_equivalence() {
        let mut fifo: StraitFifo<u64> = StraitFifo::new(3).unwrap();
        for i in 0..5 {
            assert!(fifo.producer_tick(true, i));
        }
        for _ in 0..3 {
            let _ = fifo.consumer_tick(true);
        }

        let snapshot = fifo.snapshot();
        let mut restored = StraitFifo::restore(snapshot.clone()).unwrap();
        assert_eq!(restored.snapshot(), snapshot);

        // Both copies must behave identically from here on.
        for step in 0..64u64 {
            let push = step % 3 != 0;
            let pop = step % 2 == 0;
            assert_eq!(
                fifo.producer_tick(push, step),
                restored.producer_tick(push, step)
            );
            assert_eq!(fifo.consumer_tick(pop), restored.consumer_tick(pop));
            assert_eq!(fifo.occupancy(), restored.occupancy());
        }
    }

    #[test]
    fn test_restore_rejects_bad_storage_length() {
        let fifo: StraitFifo<u64> = StraitFifo::new(3).unwrap();
        let mut snapshot = fifo.snapshot();
        snapshot.storage.truncate(3);
        assert_eq!(
            StraitFifo::restore(snapshot).unwrap_err(),
            ConfigError::SnapshotStorageMismatch {
                expected: 8,
                actual: 3,
            }
        );
    }
}
