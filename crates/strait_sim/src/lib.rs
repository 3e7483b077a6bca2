//! # STRAIT Dual-Domain Simulation
//!
//! Deterministic harness that drives the queue kernel with two uncorrelated
//! tick schedules - the software stand-in for two unrelated clocks:
//! - Every schedule derives from a seed and replays bit-for-bit
//! - The kernel is checked against a reference model at every step
//! - Violations are typed errors naming the broken property, never panics
//!
//! ## Example
//!
//! ```rust,ignore
//! use strait_sim::{FlowConfig, FlowHarness, TickPattern};
//!
//! let config = FlowConfig {
//!     address_bits: 4,
//!     steps: 100_000,
//!     producer: TickPattern::duty(7, 900),
//!     consumer: TickPattern::duty(13, 350),
//! };
//! let stats = FlowHarness::new(config)?.run()?;
//! assert!(stats.accepted_pops > 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod harness;
pub mod schedule;

pub use harness::{FlowConfig, FlowHarness, ModelViolation, SimStats};
pub use schedule::TickPattern;
