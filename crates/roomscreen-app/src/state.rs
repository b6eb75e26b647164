//! Observable store state types.
//!
//! This module defines the data the controller reads from the external store:
//! messages, pending sends, room metadata and the room-scoped
//! [`StoreSnapshot`].
//!
//! These structures are owned by the store. The controller only keeps the
//! latest snapshot it was handed and never mutates it; every change goes out
//! as a [`crate::StoreCommand`] and comes back as a new snapshot.

use std::fmt;

use chrono::{DateTime, Utc};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Server-assigned room identifier.
    RoomId
);
string_id!(
    /// Server-assigned message identifier.
    MessageId
);
string_id!(
    /// Local list row identifier. Pending sends only have one of these.
    RowId
);
string_id!(
    /// Server-assigned user identifier.
    UserId
);

/// A message persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Server-assigned message ID.
    pub id: MessageId,
    /// Message text. Empty once the message was soft-deleted.
    pub text: String,
    /// When the message was sent.
    pub sent_at: DateTime<Utc>,
    /// When the message was last edited. `None` if never edited.
    pub edited_at: Option<DateTime<Utc>>,
    /// Username of the author.
    pub from_user: String,
}

impl Message {
    /// Whether the text was cleared by a delete.
    pub fn is_deleted(&self) -> bool {
        self.text.is_empty() && self.edited_at.is_some()
    }
}

/// A send the store has not acknowledged yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSend {
    /// Local row ID.
    pub row_id: RowId,
    /// Draft text that was submitted.
    pub text: String,
    /// Whether the send attempt failed.
    pub failed: bool,
}

/// One row of the message list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    /// A persisted message.
    Sent {
        /// Local row ID.
        row_id: RowId,
        /// The message itself.
        message: Message,
    },
    /// A send in flight or a failed send.
    Pending(PendingSend),
}

impl ListRow {
    /// Local row ID of this row.
    pub fn row_id(&self) -> &RowId {
        match self {
            Self::Sent { row_id, .. } => row_id,
            Self::Pending(pending) => &pending.row_id,
        }
    }
}

/// Room metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    /// Display name.
    pub name: String,
    /// Room path, used to build quote links (e.g. `/org/room`).
    pub url: String,
    /// Whether the current user is a member.
    pub room_member: bool,
    /// Favourite flag. `None` if the room was never favourited.
    pub favourite: Option<u32>,
}

impl RoomInfo {
    /// Whether the room carries a favourite flag.
    pub fn is_favourite(&self) -> bool {
        self.favourite.is_some()
    }
}

/// Per-room notification mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationMode {
    /// Notify for all messages.
    All,
    /// Notify for mentions and announcements.
    Announcements,
    /// Notify only on direct mention.
    Mute,
}

/// Stored notification preference for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationPreference {
    /// Current mode.
    pub mode: NotificationMode,
}

/// Pagination inputs for the older-messages guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaginationFlags {
    /// The store knows there is nothing older.
    pub has_no_more: bool,
    /// An older-messages fetch is in flight.
    pub is_loading_more: bool,
    /// The initial messages fetch is in flight.
    pub is_loading_messages: bool,
    /// Number of rows currently in the list.
    pub list_len: usize,
}

/// Room-scoped view of the store.
///
/// Produced by the store subscription and handed to the controller through
/// [`crate::ScreenEvent::StoreUpdated`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Room currently selected in the store.
    pub active_room: Option<RoomId>,
    /// Room metadata. `None` until fetched.
    pub room: Option<RoomInfo>,
    /// Message list rows. `None` until the list was first loaded.
    pub rows: Option<Vec<ListRow>>,
    /// Initial messages fetch in flight.
    pub is_loading_messages: bool,
    /// Older-messages fetch in flight.
    pub is_loading_more: bool,
    /// Nothing older is available.
    pub has_no_more: bool,
    /// The last messages fetch failed.
    pub fetch_error: bool,
    /// Notification preference. `None` until fetched.
    pub notifications: Option<NotificationPreference>,
    /// Username of the signed-in user.
    pub current_user: Option<String>,
}

impl StoreSnapshot {
    /// Pagination flags derived from this snapshot.
    pub fn pagination_flags(&self) -> PaginationFlags {
        PaginationFlags {
            has_no_more: self.has_no_more,
            is_loading_more: self.is_loading_more,
            is_loading_messages: self.is_loading_messages,
            list_len: self.rows.as_ref().map_or(0, Vec::len),
        }
    }

    /// Find a persisted message by ID.
    pub fn message(&self, id: &MessageId) -> Option<&Message> {
        self.rows.iter().flatten().find_map(|row| match row {
            ListRow::Sent { message, .. } if &message.id == id => Some(message),
            _ => None,
        })
    }

    /// Whether the list was loaded and holds no rows.
    pub fn is_known_empty(&self) -> bool {
        self.rows.as_ref().is_some_and(Vec::is_empty)
    }
}
