//! Debounced read-receipt batching.
//!
//! Visible-row changes arrive in bursts while the list scrolls. The
//! [`ReadReceiptBatcher`] merges them into one [`ReadBatch`] and flushes it
//! on the trailing edge of a quiet period.
//!
//! # Scheduling
//!
//! The batcher owns no timer. Every recorded change yields a
//! [`ScreenAction::ScheduleReadFlush`] carrying a fresh [`FlushToken`]; the
//! runtime keeps a single timer slot and replaces it on each schedule. When
//! the timer fires, the token comes back through [`Self::flush_due`]. Only
//! the most recent token flushes, so a late timer from a replaced schedule is
//! ignored and at most one flush is ever pending.

use std::{collections::BTreeMap, mem, time::Duration};

use crate::{MessageId, RoomId, RowId, ScreenAction, StoreCommand};

/// Rows seen since the last flush, keyed by row.
pub type ReadBatch = BTreeMap<RowId, MessageId>;

/// Identifies one scheduled flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FlushToken(u64);

/// Coalesces visible-row changes into debounced `ReadMessages` commands.
#[derive(Debug, Clone)]
pub struct ReadReceiptBatcher {
    room_id: RoomId,
    quiet_period: Duration,
    batch: ReadBatch,
    /// Token of the pending flush. `None` if nothing is scheduled.
    pending: Option<FlushToken>,
    next_token: u64,
}

impl ReadReceiptBatcher {
    /// Create an empty batcher for `room_id`.
    pub fn new(room_id: RoomId, quiet_period: Duration) -> Self {
        Self { room_id, quiet_period, batch: ReadBatch::new(), pending: None, next_token: 0 }
    }

    /// Merge changed rows into the batch and reschedule the flush.
    ///
    /// Merging is a shallow overwrite: a row already in the batch takes the
    /// new message ID.
    pub fn record_visible_rows(
        &mut self,
        rows: impl IntoIterator<Item = (RowId, MessageId)>,
    ) -> Vec<ScreenAction> {
        self.batch.extend(rows);

        let token = FlushToken(self.next_token);
        self.next_token += 1;
        self.pending = Some(token);

        tracing::trace!(?token, batched = self.batch.len(), "read flush rescheduled");
        vec![ScreenAction::ScheduleReadFlush { token, delay: self.quiet_period }]
    }

    /// Timer callback. Flushes only if `token` is the pending one.
    pub fn flush_due(&mut self, token: FlushToken) -> Vec<ScreenAction> {
        if self.pending != Some(token) {
            tracing::trace!(?token, "stale read flush ignored");
            return vec![];
        }
        self.flush()
    }

    /// Dispatch the batch and clear it. No-op when the batch is empty.
    pub fn flush(&mut self) -> Vec<ScreenAction> {
        self.pending = None;
        if self.batch.is_empty() {
            return vec![];
        }

        let batch = mem::take(&mut self.batch);
        tracing::debug!(rows = batch.len(), "flushing read receipts");
        vec![ScreenAction::Dispatch(StoreCommand::ReadMessages {
            room_id: self.room_id.clone(),
            batch,
        })]
    }

    /// Drop the pending flush on teardown.
    pub fn cancel(&mut self) -> Vec<ScreenAction> {
        match self.pending.take() {
            Some(_) => vec![ScreenAction::CancelReadFlush],
            None => vec![],
        }
    }

    /// Rows accumulated since the last flush.
    pub fn batch(&self) -> &ReadBatch {
        &self.batch
    }

    /// Token of the pending flush. `None` if nothing is scheduled.
    pub fn pending(&self) -> Option<FlushToken> {
        self.pending
    }
}
