//! # Cross-Domain Synchronizer
//!
//! Fixed-depth sampling pipeline that carries one domain's encoded position
//! into the other domain.
//!
//! ## Architecture
//!
//! ```text
//!   source domain                receiving domain
//!  ┌─────────────┐      ┌────────┐      ┌────────┐
//!  │ encoded pos │ ───> │ stage1 │ ───> │ stage2 │ ───> full/empty compare
//!  └─────────────┘      └────────┘      └────────┘
//!                        shifted once per receiving-domain tick
//! ```
//!
//! ## Thread Safety
//!
//! Each `Synchronizer` is owned by exactly one receiving domain; the source
//! value arrives as a by-value sample. Only the owner ever writes the stages,
//! so there is no write race to tolerate - only staleness, which the queue
//! protocol is built to absorb.
//!
//! ## Guarantee
//!
//! `synced()` always returns a bit pattern the source domain actually held at
//! some earlier tick. The sample may be captured mid-transition, but the Gray
//! codec keeps at most one bit in flight, so even then the captured value is
//! either the old or the new position - never a mixture.

/// Number of sequential capture stages per synchronizer.
///
/// Two stages bound the settling window: a sample taken mid-transition is
/// given one full receiving-domain tick to resolve before anything acts on
/// it.
pub const SYNC_STAGES: usize = 2;

/// Two-stage shift register carrying a peer's encoded position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Synchronizer {
    /// `stages[0]` is the raw capture, `stages[SYNC_STAGES - 1]` is the
    /// settled value the receiving domain acts on.
    stages: [u64; SYNC_STAGES],
}

impl Synchronizer {
    /// Creates a synchronizer with all stages at zero (the reset encoding of
    /// position zero).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stages: [0; SYNC_STAGES],
        }
    }

    /// Restores a synchronizer from a persisted stage pair.
    #[inline]
    #[must_use]
    pub const fn from_stages(stages: [u64; SYNC_STAGES]) -> Self {
        Self { stages }
    }

    /// Advances the pipeline by one receiving-domain tick.
    ///
    /// `sample` is the peer's encoded position as currently visible. Each
    /// stage transition copies a complete bit-field in one step.
    #[inline]
    pub fn capture(&mut self, sample: u64) {
        self.stages[1] = self.stages[0];
        self.stages[0] = sample;
    }

    /// Returns the settled value - the only stage the receiving domain may
    /// act on.
    #[inline]
    #[must_use]
    pub const fn synced(&self) -> u64 {
        self.stages[SYNC_STAGES - 1]
    }

    /// Returns both stages for state snapshots.
    #[inline]
    #[must_use]
    pub const fn stages(&self) -> [u64; SYNC_STAGES] {
        self.stages
    }

    /// Clears the pipeline back to the reset state.
    #[inline]
    pub fn reset(&mut self) {
        self.stages = [0; SYNC_STAGES];
    }
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self::new()
    }
}
