//! # Tick Schedules
//!
//! A domain in the real design has its own free-running clock. Here each
//! domain gets a [`TickPattern`]: a seeded, repeatable decision per global
//! step of whether that domain's clock edge lands in it. Two patterns with
//! different seeds and duty cycles give the uncorrelated relative rates the
//! protocol has to survive, without any wall-clock flakiness in tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seeded per-domain tick schedule.
#[derive(Clone, Debug)]
pub struct TickPattern {
    /// Deterministic stream deciding each step.
    rng: ChaCha8Rng,
    /// Probability of ticking per step, in permille (1000 = every step).
    duty_permille: u32,
    /// Steps consumed so far.
    step: u64,
    /// Half-open window of steps during which the domain is stalled.
    stall: Option<(u64, u64)>,
}

impl TickPattern {
    /// A domain that ticks on every step.
    #[must_use]
    pub fn always() -> Self {
        Self::duty(0, 1000)
    }

    /// A domain that ticks with probability `permille / 1000` per step.
    ///
    /// `permille` is clamped to 1000.
    #[must_use]
    pub fn duty(seed: u64, permille: u32) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            duty_permille: permille.min(1000),
            step: 0,
            stall: None,
        }
    }

    /// Stalls the domain completely for steps in `[from, until)`.
    ///
    /// Models a receiving domain that stops ticking for a while: the peer
    /// must keep operating up to its own limits and recover afterwards.
    #[must_use]
    pub fn with_stall(mut self, from: u64, until: u64) -> Self {
        self.stall = Some((from, until));
        self
    }

    /// Decides whether this domain ticks in the next global step.
    pub fn ticks(&mut self) -> bool {
        let step = self.step;
        self.step += 1;

        // The rng must advance even through stalls and full duty, or the
        // post-stall stream would depend on the stall placement.
        let roll = self.rng.gen_range(0..1000u32);

        if let Some((from, until)) = self.stall {
            if step >= from && step < until {
                return false;
            }
        }
        roll < self.duty_permille
    }
}
