//! Older-messages fetch guard.

use crate::PaginationFlags;

/// Decides whether scrolling to the end should load older messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaginationGuard;

impl PaginationGuard {
    /// Whether a [`crate::StoreCommand::FetchOlderMessages`] should be issued.
    ///
    /// Requires that more history exists, no fetch is in flight, and the list
    /// is non-empty. The last condition keeps a scroll event from racing the
    /// initial load.
    pub fn should_fetch_older(flags: &PaginationFlags) -> bool {
        !flags.has_no_more
            && !flags.is_loading_more
            && !flags.is_loading_messages
            && flags.list_len != 0
    }
}
