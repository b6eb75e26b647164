//! Driver trait for abstracting host I/O.
//!
//! The [`Driver`] trait decouples the screen runtime from a specific UI
//! toolkit and store. Each host implements the trait, while the generic
//! [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{Clock, ScreenEvent, SessionController, StoreCommand, StoreSnapshot, UiEffect};

/// Abstracts host operations for the screen runtime.
///
/// Implementations provide the UI and store plumbing while the generic
/// [`Runtime`](crate::Runtime) handles orchestration logic. This ensures the
/// same orchestration code runs against a real host and in simulation.
///
/// # Implementations
///
/// - **Simulation**: scripted events against an in-memory store
///   (`roomscreen-harness`)
/// - **Host UI**: widget callbacks as events, a store client for commands
pub trait Driver: Send {
    /// Host-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next host event.
    ///
    /// Returns `None` once the screen is gone. Must be cancel-safe: the
    /// runtime races this future against the read-flush timer and drops it
    /// when the timer wins.
    fn poll_event(&mut self) -> impl Future<Output = Result<Option<ScreenEvent>, Self::Error>> + Send;

    /// Current store state for the screen's room.
    ///
    /// Read once on mount. Later changes arrive as
    /// [`ScreenEvent::StoreUpdated`].
    fn store_snapshot(&self) -> StoreSnapshot;

    /// Submit a command to the store.
    ///
    /// Fire-and-forget: results come back later as
    /// [`ScreenEvent::StoreUpdated`].
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    fn dispatch(&mut self, command: StoreCommand) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Resolve once the host's current transition or animation settles.
    fn interactions_settled(&mut self) -> impl Future<Output = ()> + Send;

    /// Perform a presentational side-effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot show the effect.
    fn present(&mut self, effect: UiEffect) -> Result<(), Self::Error>;

    /// Render the screen state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render<C: Clock>(&mut self, session: &SessionController<C>) -> Result<(), Self::Error>;

    /// Release host resources.
    fn stop(&mut self);
}
