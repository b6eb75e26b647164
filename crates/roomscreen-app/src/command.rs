//! Commands submitted to the external store.
//!
//! Commands are fire-and-forget. Their results surface later as a new
//! [`crate::StoreSnapshot`]; nothing here assumes an ordering between a
//! command's completion and subsequent user input.

use crate::{MessageId, NotificationMode, ReadBatch, RoomId, RowId, UserId};

/// Room-info drawer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawerState {
    /// Drawer is open.
    Open,
    /// Drawer is closed.
    Closed,
}

/// Navigation destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavTarget {
    /// Single-message view.
    Message {
        /// Message to show.
        message_id: MessageId,
        /// Room the message belongs to.
        room_id: RoomId,
    },
    /// User profile view.
    User {
        /// User to show.
        user_id: UserId,
        /// Username, shown while the profile loads.
        username: String,
    },
}

/// Commands issued to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCommand {
    /// Make the room the active one.
    SelectRoom {
        /// Target room.
        room_id: RoomId,
    },

    /// Fetch room metadata.
    FetchRoom {
        /// Target room.
        room_id: RoomId,
    },

    /// Initial messages fetch.
    FetchMessages {
        /// Target room.
        room_id: RoomId,
    },

    /// Incremental fetch when a cached list already exists.
    FetchMessagesIfNeeded {
        /// Target room.
        room_id: RoomId,
    },

    /// Load the page before the oldest loaded message.
    FetchOlderMessages {
        /// Target room.
        room_id: RoomId,
    },

    /// Fetch the notification preference.
    FetchNotificationSettings {
        /// Target room.
        room_id: RoomId,
    },

    /// Send a new message.
    SendMessage {
        /// Target room.
        room_id: RoomId,
        /// Message text.
        text: String,
    },

    /// Retry a failed send.
    ResendMessage {
        /// Target room.
        room_id: RoomId,
        /// Row of the failed item.
        row_id: RowId,
        /// Text to send.
        text: String,
    },

    /// Replace a message's text. An empty text is a soft delete.
    UpdateMessage {
        /// Target room.
        room_id: RoomId,
        /// Message to update.
        message_id: MessageId,
        /// New text.
        text: String,
        /// Row being edited, when the update comes from the composer.
        row_id: Option<RowId>,
    },

    /// Drop a failed send from the list.
    DeleteFailedMessage {
        /// Row of the failed item.
        row_id: RowId,
        /// Target room.
        room_id: RoomId,
    },

    /// Mark a batch of rows as read.
    ReadMessages {
        /// Target room.
        room_id: RoomId,
        /// Rows seen since the last flush.
        batch: ReadBatch,
    },

    /// Change the notification preference.
    ChangeNotificationSettings {
        /// Target room.
        room_id: RoomId,
        /// Selected mode.
        mode: NotificationMode,
    },

    /// Clear a standing messages-fetch error.
    ClearFetchError,

    /// Toggle the favourite flag.
    ChangeFavoriteStatus {
        /// Target room.
        room_id: RoomId,
    },

    /// Mark every message in the room as read.
    MarkAllAsRead {
        /// Target room.
        room_id: RoomId,
    },

    /// Join the room.
    JoinRoom {
        /// Target room.
        room_id: RoomId,
    },

    /// Leave the room.
    LeaveRoom {
        /// Target room.
        room_id: RoomId,
    },

    /// Record the room-info drawer position.
    SetRoomInfoDrawer(DrawerState),

    /// Navigate to another screen.
    NavigateTo(NavTarget),
}

impl StoreCommand {
    /// Short command name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SelectRoom { .. } => "select_room",
            Self::FetchRoom { .. } => "fetch_room",
            Self::FetchMessages { .. } => "fetch_messages",
            Self::FetchMessagesIfNeeded { .. } => "fetch_messages_if_needed",
            Self::FetchOlderMessages { .. } => "fetch_older_messages",
            Self::FetchNotificationSettings { .. } => "fetch_notification_settings",
            Self::SendMessage { .. } => "send_message",
            Self::ResendMessage { .. } => "resend_message",
            Self::UpdateMessage { .. } => "update_message",
            Self::DeleteFailedMessage { .. } => "delete_failed_message",
            Self::ReadMessages { .. } => "read_messages",
            Self::ChangeNotificationSettings { .. } => "change_notification_settings",
            Self::ClearFetchError => "clear_fetch_error",
            Self::ChangeFavoriteStatus { .. } => "change_favorite_status",
            Self::MarkAllAsRead { .. } => "mark_all_as_read",
            Self::JoinRoom { .. } => "join_room",
            Self::LeaveRoom { .. } => "leave_room",
            Self::SetRoomInfoDrawer(_) => "set_room_info_drawer",
            Self::NavigateTo(_) => "navigate_to",
        }
    }
}
