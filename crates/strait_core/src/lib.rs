//! # STRAIT Core Queue Kernel
//!
//! Bounded FIFO shared between two execution domains that advance at
//! independent, uncorrelated rates with no shared notion of "now":
//! - Zero allocations after construction
//! - Non-blocking push/pop with backpressure-by-rejection
//! - No locks anywhere - every register has exactly one writer
//!
//! ## Architecture Rules
//!
//! 1. **Positions cross the boundary in Gray form** - consecutive values
//!    differ in exactly one bit, so a mid-transition sample is always a
//!    value the source actually held
//! 2. **Two-stage synchronizers** - the receiving domain acts only on
//!    `stage2` of its own sampling pipeline
//! 3. **Pessimistic flags** - `full`/`empty` are registered comparisons
//!    against a lagging peer position; they may over-report, never under
//!
//! ## Example
//!
//! ```rust,ignore
//! use strait_core::StraitFifo;
//!
//! let mut fifo: StraitFifo<u64> = StraitFifo::new(4)?; // capacity 16
//! let accepted = fifo.producer_tick(true, 42);
//! let popped = fifo.consumer_tick(true);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod domain;
pub mod error;
pub mod fifo;
pub mod gray;
pub mod sync;

pub use domain::{ConsumerState, ProducerState};
pub use error::{ConfigError, MAX_ADDRESS_BITS};
pub use fifo::{DomainSnapshot, FifoSnapshot, StraitFifo};
pub use sync::{Synchronizer, SYNC_STAGES};
