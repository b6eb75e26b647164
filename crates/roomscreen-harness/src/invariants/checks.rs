//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use super::{Invariant, InvariantResult, ScreenSnapshot, Violation};

/// The bottom bar is never shown over an unusable list.
///
/// While messages load, after a fetch error, or when the loaded list is
/// empty, neither the composer nor the join bar may be visible.
pub struct BottomBarVisibility;

impl Invariant for BottomBarVisibility {
    fn name(&self) -> &'static str {
        "bottom_bar_visibility"
    }

    fn check(&self, state: &ScreenSnapshot) -> InvariantResult {
        let Some(bar) = state.layout.bottom_bar() else {
            return Ok(());
        };

        let store = &state.store;
        if store.fetch_error || store.is_loading_messages || store.is_known_empty() {
            return Err(Violation {
                invariant: self.name(),
                message: format!(
                    "{bar:?} shown with fetch_error={} loading={} empty={}",
                    store.fetch_error,
                    store.is_loading_messages,
                    store.is_known_empty()
                ),
            });
        }
        Ok(())
    }
}

/// Unflushed read receipts always have a flush scheduled.
///
/// A non-empty batch without a pending flush would never reach the store.
pub struct ReadBatchScheduled;

impl Invariant for ReadBatchScheduled {
    fn name(&self) -> &'static str {
        "read_batch_scheduled"
    }

    fn check(&self, state: &ScreenSnapshot) -> InvariantResult {
        if state.read_batch_len > 0 && state.pending_read_flush.is_none() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("{} rows batched with no flush pending", state.read_batch_len),
            });
        }
        Ok(())
    }
}

/// The message being edited is one the store knows about.
pub struct EditTargetKnown;

impl Invariant for EditTargetKnown {
    fn name(&self) -> &'static str {
        "edit_target_known"
    }

    fn check(&self, state: &ScreenSnapshot) -> InvariantResult {
        let Some(target) = &state.edit_target else {
            return Ok(());
        };

        if state.store.message(&target.message_id).is_none() {
            return Err(Violation {
                invariant: self.name(),
                message: format!("editing {} which is not in the list", target.message_id),
            });
        }
        Ok(())
    }
}
