//! Screen invariants.
//!
//! A check looks at a [`ScreenSnapshot`] taken from a live
//! [`roomscreen_app::SessionController`] and reports a [`Violation`] when the
//! screen is in a state no event sequence should reach. [`crate::SimDriver`]
//! runs a registry after every render, the property tests after every step.
//!
//! ```ignore
//! let state = ScreenSnapshot::from_session(&session);
//! InvariantRegistry::standard().check_all(&state)?;
//! ```

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{BottomBarVisibility, EditTargetKnown, ReadBatchScheduled};
pub use snapshot::ScreenSnapshot;
use thiserror::Error;

/// Outcome of a single check.
pub type InvariantResult = Result<(), Violation>;

/// A failed check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{invariant}: {message}")]
pub struct Violation {
    /// Check that failed.
    pub invariant: &'static str,
    /// Offending state.
    pub message: String,
}

/// Property of screen state that holds after every event.
pub trait Invariant: Send + Sync {
    /// Short name used in violations.
    fn name(&self) -> &'static str;

    /// Check `state`.
    ///
    /// # Errors
    ///
    /// Returns a [`Violation`] naming the offending state.
    fn check(&self, state: &ScreenSnapshot) -> InvariantResult;
}

/// Ordered set of checks run together.
#[derive(Default)]
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl fmt::Debug for InvariantRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.invariants.iter().map(|check| check.name())).finish()
    }
}

impl InvariantRegistry {
    /// Registry with no checks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every screen check: [`BottomBarVisibility`], [`ReadBatchScheduled`]
    /// and [`EditTargetKnown`].
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(BottomBarVisibility);
        registry.add(ReadBatchScheduled);
        registry.add(EditTargetKnown);
        registry
    }

    /// Register `invariant`.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Run every check against `state`.
    ///
    /// # Errors
    ///
    /// Returns every violation, in registration order.
    pub fn check_all(&self, state: &ScreenSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|check| check.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Number of checks.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Whether no checks are registered.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
