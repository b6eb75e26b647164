//! Deterministic simulation harness for the room screen controller.
//!
//! Scripted host, in-memory store and manual wall clock, so the same
//! [`roomscreen_app::Runtime`] that drives a real screen can be run under
//! paused tokio time with reproducible results.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all event sequences,
//! not specific scenarios. Use [`InvariantRegistry::standard()`] for the
//! common screen invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod invariants;
pub mod sim_clock;
pub mod sim_driver;
pub mod sim_store;

pub use invariants::{
    BottomBarVisibility, EditTargetKnown, Invariant, InvariantRegistry, InvariantResult,
    ReadBatchScheduled, ScreenSnapshot, Violation,
};
pub use sim_clock::SimClock;
pub use sim_driver::{SimDriver, SimDriverError};
pub use sim_store::{DEFAULT_PAGE_SIZE, SimStore, row_for};
