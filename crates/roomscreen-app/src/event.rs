//! Screen input events.
//!
//! This module defines [`ScreenEvent`], the inputs that drive the
//! [`crate::SessionController`].
//!
//! Events originate from three sources:
//! - User interactions reported by the host UI (taps, text, menus, prompts).
//! - Store snapshots delivered by the subscription.
//! - The runtime itself (interactions boundary, read-flush timer).

use crate::{DrawerState, FlushToken, MenuItem, MessageId, Prompt, ReadBatch, RowId, StoreSnapshot, UserId};

/// Message reference carried by a tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRef {
    /// A persisted message, looked up in the current snapshot.
    Persisted {
        /// List row.
        row_id: RowId,
        /// Message ID.
        message_id: MessageId,
    },
    /// A failed pending send.
    Failed {
        /// List row.
        row_id: RowId,
        /// Draft text of the failed send.
        text: String,
    },
}

/// Events processed by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// Screen was mounted. Carries the store state at that moment, which
    /// decides what the session-start batch still has to fetch.
    Mounted(Box<StoreSnapshot>),

    /// Host transition settled after [`crate::ScreenAction::AwaitInteractions`].
    InteractionsSettled,

    /// Screen is being torn down.
    Unmounted,

    /// New store state.
    StoreUpdated(Box<StoreSnapshot>),

    /// The message list scrolled to its end.
    ScrollReachedEnd,

    /// Composer text changed.
    ComposerTextChanged(String),

    /// Send button pressed.
    SendPressed,

    /// User backed out of an in-progress edit.
    EditCancelled,

    /// Message row tapped.
    MessageTapped(MessageRef),

    /// Message row long-pressed.
    MessageLongPressed(MessageId),

    /// Username in a row tapped.
    UsernamePressed(String),

    /// Avatar in a row tapped.
    AvatarPressed {
        /// Author's user ID.
        user_id: UserId,
        /// Author's username.
        username: String,
    },

    /// Rows whose visibility changed, mapped to their message IDs.
    VisibleRowsChanged(ReadBatch),

    /// Read-receipt flush timer fired.
    ReadFlushDue(FlushToken),

    /// Toolbar overflow action selected, by position.
    ToolbarActionSelected(usize),

    /// Context menu item selected.
    MenuItemSelected(MenuItem),

    /// Context menu closed without a selection.
    MenuDismissed,

    /// Notification dialog choice, by position.
    NotificationChoiceSelected(usize),

    /// Join bar pressed.
    JoinRoomPressed,

    /// Confirmation prompt answered.
    PromptAnswered {
        /// Prompt being answered.
        prompt: Prompt,
        /// `true` for OK, `false` for Cancel.
        confirmed: bool,
    },

    /// Room-info drawer opened or closed.
    InfoDrawerChanged(DrawerState),

    /// Retry after the room failed to load.
    RetryLoadRoom,

    /// Retry after messages failed to load.
    RetryFetchMessages,
}
