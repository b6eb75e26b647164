//! Generic runtime for screen orchestration.
//!
//! The Runtime drives the screen event loop, coordinating between:
//! - [`SessionController`]: screen state machine
//! - [`Driver`]: host UI and store I/O
//! - the read-receipt flush timer, the only timed work on the screen

use tokio::time::Instant;

use crate::{Clock, Driver, FlushToken, ScreenAction, ScreenEvent, SessionController, SystemClock};

/// Generic runtime that orchestrates a [`SessionController`] and a [`Driver`].
///
/// # Type Parameters
///
/// - `D`: host I/O driver
/// - `C`: wall clock used for edit-window checks
pub struct Runtime<D, C = SystemClock>
where
    D: Driver,
    C: Clock,
{
    driver: D,
    session: SessionController<C>,
    /// Pending read flush. Rescheduling replaces it, so at most one exists.
    read_flush: Option<(FlushToken, Instant)>,
}

impl<D, C> Runtime<D, C>
where
    D: Driver,
    C: Clock,
{
    /// Create a runtime for `session` on top of `driver`.
    pub fn new(driver: D, session: SessionController<C>) -> Self {
        Self { driver, session, read_flush: None }
    }

    /// Run the screen until the driver reports no more events.
    ///
    /// This is the core orchestration loop that:
    /// 1. Mounts the screen over the driver's current store state and waits
    ///    for host interactions to settle
    /// 2. Races the next driver event against the read-flush timer
    /// 3. Feeds the winner to the session and executes the resulting actions
    /// 4. Unmounts the screen once the driver is exhausted
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        let mounted = ScreenEvent::Mounted(Box::new(self.driver.store_snapshot()));
        let actions = self.session.handle(mounted);
        self.process_actions(actions).await?;

        while let Some(event) = self.next_event().await? {
            let actions = self.session.handle(event);
            self.process_actions(actions).await?;
        }

        let actions = self.session.handle(ScreenEvent::Unmounted);
        self.process_actions(actions).await?;
        self.driver.stop();
        Ok(())
    }

    /// Next event from either the driver or the read-flush timer.
    async fn next_event(&mut self) -> Result<Option<ScreenEvent>, D::Error> {
        let read_flush = self.read_flush;
        let flush_fired = tokio::select! {
            event = self.driver.poll_event() => return event,
            token = wait_for_flush(read_flush) => token,
        };

        self.read_flush = None;
        Ok(Some(ScreenEvent::ReadFlushDue(flush_fired)))
    }

    /// Execute actions returned by the session, including any follow-up
    /// actions they produce.
    async fn process_actions(&mut self, initial_actions: Vec<ScreenAction>) -> Result<(), D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    ScreenAction::Render => self.driver.render(&self.session)?,
                    ScreenAction::Dispatch(command) => {
                        tracing::debug!(command = command.name(), "dispatching store command");
                        self.driver.dispatch(command).await?;
                    },
                    ScreenAction::AwaitInteractions => {
                        self.driver.interactions_settled().await;
                        pending_actions.extend(self.session.handle(ScreenEvent::InteractionsSettled));
                    },
                    ScreenAction::ScheduleReadFlush { token, delay } => {
                        self.read_flush = Some((token, Instant::now() + delay));
                    },
                    ScreenAction::CancelReadFlush => self.read_flush = None,
                    ScreenAction::Ui(effect) => self.driver.present(effect)?,
                }
            }
        }
        Ok(())
    }

    /// Get a reference to the session.
    pub fn session(&self) -> &SessionController<C> {
        &self.session
    }

    /// Get a reference to the driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }
}

/// Resolve when the pending flush is due. Never resolves without one.
async fn wait_for_flush(read_flush: Option<(FlushToken, Instant)>) -> FlushToken {
    match read_flush {
        Some((token, deadline)) => {
            tokio::time::sleep_until(deadline).await;
            token
        },
        None => std::future::pending().await,
    }
}
