//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` plays a scripted sequence of host events against a
//! [`SimStore`]. It implements [`Driver`] so the same
//! [`roomscreen_app::Runtime`] orchestration code runs in both a real host
//! and simulation.

use std::{collections::VecDeque, time::Duration};

use roomscreen_app::{
    Clock, Driver, ScreenEvent, SessionController, StoreCommand, StoreSnapshot, UiEffect,
};
use thiserror::Error;
use tokio::time::Instant;

use crate::{
    SimStore,
    invariants::{InvariantRegistry, ScreenSnapshot, Violation},
};

/// Error type for simulation driver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimDriverError {
    /// A registered invariant failed after a render.
    #[error("invariant violation after render {render}: {}", format_violations(.violations))]
    Invariant {
        /// Render count at the time of the check.
        render: usize,
        /// Every failed check.
        violations: Vec<Violation>,
    },
}

fn format_violations(violations: &[Violation]) -> String {
    violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// One step of a host script.
#[derive(Debug, Clone)]
pub(crate) enum SimStep {
    /// Deliver an event to the screen.
    Event(ScreenEvent),
    /// Let runtime time pass with no host input.
    Idle(Duration),
    /// Move the wall clock without runtime time passing.
    AdvanceClock(Duration),
}

/// Simulation driver for deterministic testing.
///
/// Store commands are applied to the [`SimStore`] immediately. Whenever the
/// store snapshot changes, a [`ScreenEvent::StoreUpdated`] is delivered
/// before the next scripted step.
#[derive(Debug)]
pub struct SimDriver {
    store: SimStore,
    script: VecDeque<SimStep>,
    /// Deadline of the idle step in progress. Kept across cancelled polls.
    idle_until: Option<Instant>,
    store_changed: bool,
    settle_delay: Duration,
    dispatched: Vec<StoreCommand>,
    effects: Vec<UiEffect>,
    renders: usize,
    stopped: bool,
    invariants: Option<InvariantRegistry>,
}

impl SimDriver {
    /// Create a driver over `store` with an empty script.
    pub fn new(store: SimStore) -> Self {
        Self {
            store,
            script: VecDeque::new(),
            idle_until: None,
            store_changed: false,
            settle_delay: Duration::ZERO,
            dispatched: Vec::new(),
            effects: Vec::new(),
            renders: 0,
            stopped: false,
            invariants: None,
        }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Delay before host interactions settle after mount.
    #[must_use]
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Append an event to the script.
    #[must_use]
    pub fn then(mut self, event: ScreenEvent) -> Self {
        self.script.push_back(SimStep::Event(event));
        self
    }

    /// Append an idle period to the script.
    #[must_use]
    pub fn idle(mut self, duration: Duration) -> Self {
        self.script.push_back(SimStep::Idle(duration));
        self
    }

    /// Append a wall-clock jump to the script.
    #[must_use]
    pub fn advance_clock(mut self, by: Duration) -> Self {
        self.script.push_back(SimStep::AdvanceClock(by));
        self
    }

    /// Commands dispatched so far, in order.
    pub fn dispatched(&self) -> &[StoreCommand] {
        &self.dispatched
    }

    /// UI effects presented so far, in order.
    pub fn effects(&self) -> &[UiEffect] {
        &self.effects
    }

    /// Number of renders.
    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Whether the runtime stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Simulated store.
    pub fn store(&self) -> &SimStore {
        &self.store
    }

    /// Check invariants against session state.
    fn check_invariants<C: Clock>(&self, session: &SessionController<C>) -> Result<(), SimDriverError> {
        let Some(registry) = &self.invariants else {
            return Ok(());
        };
        registry
            .check_all(&ScreenSnapshot::from_session(session))
            .map_err(|violations| SimDriverError::Invariant { render: self.renders, violations })
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<ScreenEvent>, Self::Error> {
        loop {
            if self.store_changed {
                self.store_changed = false;
                let snapshot = self.store.snapshot().clone();
                return Ok(Some(ScreenEvent::StoreUpdated(Box::new(snapshot))));
            }

            match self.script.pop_front() {
                None => return Ok(None),
                Some(SimStep::Event(event)) => return Ok(Some(event)),
                Some(SimStep::AdvanceClock(by)) => self.store.clock().advance(by),
                Some(SimStep::Idle(duration)) => {
                    let deadline = *self.idle_until.get_or_insert_with(|| Instant::now() + duration);
                    // Keep the step until the deadline passes, the runtime
                    // may drop this future first.
                    self.script.push_front(SimStep::Idle(duration));
                    tokio::time::sleep_until(deadline).await;
                    self.script.pop_front();
                    self.idle_until = None;
                },
            }
        }
    }

    fn store_snapshot(&self) -> StoreSnapshot {
        self.store.snapshot().clone()
    }

    async fn dispatch(&mut self, command: StoreCommand) -> Result<(), Self::Error> {
        tracing::trace!(command = command.name(), "sim store applying command");
        if self.store.apply(&command) {
            self.store_changed = true;
        }
        self.dispatched.push(command);
        Ok(())
    }

    async fn interactions_settled(&mut self) {
        if !self.settle_delay.is_zero() {
            tokio::time::sleep(self.settle_delay).await;
        }
    }

    fn present(&mut self, effect: UiEffect) -> Result<(), Self::Error> {
        match &effect {
            UiEffect::Notice(notice) => tracing::debug!(%notice, "sim host showing notice"),
            UiEffect::Confirm(prompt) => {
                tracing::debug!(title = prompt.title(), message = prompt.message(), "sim host asking");
            },
            _ => tracing::trace!(?effect, "sim host presenting"),
        }
        self.effects.push(effect);
        Ok(())
    }

    fn render<C: Clock>(&mut self, session: &SessionController<C>) -> Result<(), Self::Error> {
        self.renders += 1;
        self.check_invariants(session)
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use roomscreen_app::{DrawerState, Notice, Prompt, RoomId};

    use super::*;
    use crate::SimClock;

    fn driver() -> SimDriver {
        SimDriver::new(SimStore::new("rust", SimClock::default()))
    }

    #[tokio::test]
    async fn exhausted_script_ends_events() {
        let mut driver = driver();
        assert_eq!(driver.poll_event().await, Ok(None));
    }

    #[tokio::test]
    async fn store_change_is_delivered_before_next_step() {
        let mut driver = driver().then(ScreenEvent::SendPressed);
        driver
            .dispatch(StoreCommand::SelectRoom { room_id: RoomId::new("rust") })
            .await
            .unwrap();

        let event = driver.poll_event().await.unwrap();
        assert!(matches!(event, Some(ScreenEvent::StoreUpdated(_))));
        assert_eq!(driver.poll_event().await, Ok(Some(ScreenEvent::SendPressed)));
    }

    #[tokio::test]
    async fn unchanged_store_emits_nothing() {
        let mut driver = driver();
        driver.dispatch(StoreCommand::SetRoomInfoDrawer(DrawerState::Closed)).await.unwrap();

        assert_eq!(driver.poll_event().await, Ok(None));
        assert_eq!(driver.store().drawer(), Some(DrawerState::Closed));
    }

    #[tokio::test(start_paused = true)]
    async fn idle_step_survives_cancellation() {
        let mut driver = driver().idle(Duration::from_secs(1)).then(ScreenEvent::SendPressed);
        let started = Instant::now();

        let early = tokio::time::timeout(Duration::from_millis(400), driver.poll_event()).await;
        assert!(early.is_err());

        assert_eq!(driver.poll_event().await, Ok(Some(ScreenEvent::SendPressed)));
        let elapsed = started.elapsed();
        assert!(elapsed >= Duration::from_secs(1) && elapsed < Duration::from_millis(1400));
    }

    #[tokio::test]
    async fn clock_step_moves_store_clock() {
        let mut driver = driver().advance_clock(Duration::from_secs(60));
        let before = driver.store().clock().now();

        assert_eq!(driver.poll_event().await, Ok(None));
        assert_eq!((driver.store().clock().now() - before).num_seconds(), 60);
    }

    #[tokio::test]
    async fn store_snapshot_tracks_applied_commands() {
        let mut driver = driver();
        assert_eq!(driver.store_snapshot().active_room, None);

        driver.dispatch(StoreCommand::SelectRoom { room_id: RoomId::new("rust") }).await.unwrap();
        assert_eq!(driver.store_snapshot().active_room, Some(RoomId::new("rust")));
    }

    #[test]
    fn effects_are_recorded() {
        let mut driver = driver();
        driver.present(UiEffect::Notice(Notice::Copied)).unwrap();
        driver.present(UiEffect::Confirm(Prompt::LeaveRoom)).unwrap();
        assert_eq!(driver.effects(), [
            UiEffect::Notice(Notice::Copied),
            UiEffect::Confirm(Prompt::LeaveRoom),
        ]);
    }
}
