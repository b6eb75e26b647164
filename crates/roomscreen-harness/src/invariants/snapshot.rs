//! Observable state snapshots for invariant checking.
//!
//! Snapshots capture the observable state of a screen at a point in time.
//! Invariants operate on snapshots rather than live state to ensure
//! consistent, atomic checks.

use roomscreen_app::{
    Clock, ComposerMode, EditTarget, FlushToken, RoomId, ScreenLayout, SessionController,
    StoreSnapshot,
};

/// Snapshot of one screen's observable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSnapshot {
    /// Room the screen shows.
    pub room_id: RoomId,
    /// Message being edited. `None` while composing.
    pub edit_target: Option<EditTarget>,
    /// Composer draft.
    pub draft: String,
    /// Token of the pending read flush.
    pub pending_read_flush: Option<FlushToken>,
    /// Rows waiting for the next read flush.
    pub read_batch_len: usize,
    /// Derived layout.
    pub layout: ScreenLayout,
    /// Store state the screen last saw.
    pub store: StoreSnapshot,
}

impl ScreenSnapshot {
    /// Capture the observable state of `session`.
    pub fn from_session<C: Clock>(session: &SessionController<C>) -> Self {
        let edit_target = match &session.composer().mode {
            ComposerMode::Editing(target) => Some(target.clone()),
            ComposerMode::Composing => None,
        };

        Self {
            room_id: session.room_id().clone(),
            edit_target,
            draft: session.draft_text().to_owned(),
            pending_read_flush: session.pending_read_flush(),
            read_batch_len: session.read_batch().len(),
            layout: session.layout(),
            store: session.snapshot().clone(),
        }
    }
}
