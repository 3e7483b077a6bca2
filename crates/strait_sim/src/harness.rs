//! # Flow Harness
//!
//! Runs a [`StraitFifo`] under two seeded tick schedules and checks it
//! against a reference queue at every step. Both sides request work on every
//! tick they get, so the queue spends most of the run pinned against its
//! full/empty boundaries - the only places the protocol can break.

use std::collections::VecDeque;

use thiserror::Error;

use strait_core::{ConfigError, StraitFifo};

use crate::schedule::TickPattern;

/// A run of the harness: the queue geometry and the two domain schedules.
#[derive(Clone, Debug)]
pub struct FlowConfig {
    /// Address bits of the queue under test (capacity `2^A`).
    pub address_bits: u8,
    /// Number of global steps to simulate.
    pub steps: u64,
    /// Producer-domain schedule.
    pub producer: TickPattern,
    /// Consumer-domain schedule.
    pub consumer: TickPattern,
}

/// Counters accumulated over a run.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimStats {
    /// Global steps executed.
    pub steps: u64,
    /// Producer-domain ticks that landed.
    pub producer_ticks: u64,
    /// Consumer-domain ticks that landed.
    pub consumer_ticks: u64,
    /// Pushes accepted.
    pub accepted_pushes: u64,
    /// Pushes rejected by backpressure.
    pub rejected_pushes: u64,
    /// Pops accepted.
    pub accepted_pops: u64,
    /// Pops rejected while the queue read as empty.
    pub rejected_pops: u64,
    /// Highest occupancy observed.
    pub peak_occupancy: usize,
}

/// A property the kernel is required to uphold, observed broken.
///
/// These are reported as values rather than panics so soak tools can log the
/// seed and keep sweeping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelViolation {
    /// A push was accepted while the reference model was at capacity.
    #[error("step {step}: push accepted at occupancy {occupancy} (overflow)")]
    Overflow {
        /// Global step of the violation.
        step: u64,
        /// Model occupancy at that step.
        occupancy: usize,
    },

    /// A pop was accepted while the reference model was empty.
    #[error("step {step}: pop accepted on an empty queue (underflow)")]
    Underflow {
        /// Global step of the violation.
        step: u64,
    },

    /// An accepted pop returned the wrong value.
    #[error("step {step}: expected {expected}, popped {actual} (order violated)")]
    OrderViolation {
        /// Global step of the violation.
        step: u64,
        /// Value the reference model holds at the head.
        expected: u64,
        /// Value the queue actually returned.
        actual: u64,
    },

    /// `is_full()` read false while occupancy equaled capacity.
    #[error("step {step}: full flag deasserted at capacity")]
    FullFlagUnderReported {
        /// Global step of the violation.
        step: u64,
    },

    /// `is_empty()` read false while occupancy was zero.
    #[error("step {step}: empty flag deasserted at occupancy 0")]
    EmptyFlagUnderReported {
        /// Global step of the violation.
        step: u64,
    },
}

/// Drives one queue against one reference model.
#[derive(Debug)]
pub struct FlowHarness {
    config: FlowConfig,
    fifo: StraitFifo<u64>,
    model: VecDeque<u64>,
    next_value: u64,
    stats: SimStats,
}

impl FlowHarness {
    /// Builds a harness for `config`.
    ///
    /// # Errors
    ///
    /// Propagates [`ConfigError`] for malformed queue geometry.
    pub fn new(config: FlowConfig) -> Result<Self, ConfigError> {
        let fifo = StraitFifo::new(config.address_bits)?;
        let capacity = fifo.capacity();
        Ok(Self {
            config,
            fifo,
            model: VecDeque::with_capacity(capacity),
            next_value: 0,
            stats: SimStats::default(),
        })
    }

    /// Runs the configured number of steps, checking every one.
    ///
    /// # Errors
    ///
    /// The first [`ModelViolation`] observed, if any.
    pub fn run(mut self) -> Result<SimStats, ModelViolation> {
        let capacity = self.fifo.capacity();
        let mut producer = self.config.producer.clone();
        let mut consumer = self.config.consumer.clone();

        for step in 0..self.config.steps {
            self.stats.steps = step + 1;

            if producer.ticks() {
                self.stats.producer_ticks += 1;
                let was_full = self.fifo.is_full();
                if self.fifo.producer_tick(true, self.next_value) {
                    if self.model.len() >= capacity {
                        return Err(ModelViolation::Overflow {
                            step,
                            occupancy: self.model.len(),
                        });
                    }
                    tracing::trace!(step, value = self.next_value, "push accepted");
                    self.model.push_back(self.next_value);
                    self.next_value += 1;
                    self.stats.accepted_pushes += 1;
                } else {
                    self.stats.rejected_pushes += 1;
                }
                if was_full != self.fifo.is_full() {
                    tracing::debug!(step, full = self.fifo.is_full(), "full flag edge");
                }
            }

            if consumer.ticks() {
                self.stats.consumer_ticks += 1;
                let was_empty = self.fifo.is_empty();
                if let Some(actual) = self.fifo.consumer_tick(true) {
                    let Some(expected) = self.model.pop_front() else {
                        return Err(ModelViolation::Underflow { step });
                    };
                    if actual != expected {
                        return Err(ModelViolation::OrderViolation {
                            step,
                            expected,
                            actual,
                        });
                    }
                    tracing::trace!(step, value = actual, "pop accepted");
                    self.stats.accepted_pops += 1;
                } else {
                    self.stats.rejected_pops += 1;
                }
                if was_empty != self.fifo.is_empty() {
                    tracing::debug!(step, empty = self.fifo.is_empty(), "empty flag edge");
                }
            }

            let occupancy = self.fifo.occupancy();
            self.stats.peak_occupancy = self.stats.peak_occupancy.max(occupancy);

            if self.model.len() == capacity && !self.fifo.is_full() {
                return Err(ModelViolation::FullFlagUnderReported { step });
            }
            if self.model.is_empty() && !self.fifo.is_empty() {
                return Err(ModelViolation::EmptyFlagUnderReported { step });
            }
        }

        Ok(self.stats)
    }
}
