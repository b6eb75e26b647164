//! Derived screen layout.
//!
//! Describes which pieces the host should render for a given
//! [`StoreSnapshot`]. Pure, recomputed from the snapshot on demand.

use crate::StoreSnapshot;

/// Message list area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListBody {
    /// Initial fetch in flight.
    Loading,
    /// Fetch failed, show a retry affordance.
    Failed,
    /// Show the messages.
    Messages,
}

/// Bar under the message list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BottomBar {
    /// Message composer, for members.
    Composer,
    /// Join button, for non-members.
    JoinRoom,
}

/// Body of a loaded room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomLayout {
    /// Show the "loading more" indicator.
    pub loading_more: bool,
    /// Message list area.
    pub body: ListBody,
    /// Bar under the list. `None` while hidden.
    pub bottom: Option<BottomBar>,
}

/// Top-level screen layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenLayout {
    /// Fetch failed before the room was known. Retry re-runs the mount.
    RoomFailed,
    /// Room metadata not loaded yet.
    LoadingRoom,
    /// Room loaded.
    Room(RoomLayout),
}

impl ScreenLayout {
    /// Layout for `snapshot`.
    ///
    /// The bottom bar is hidden while messages load, while a fetch error is
    /// active, or when the loaded list is empty. A list that has not loaded
    /// yet does not count as empty.
    pub fn for_snapshot(snapshot: &StoreSnapshot) -> Self {
        let Some(room) = &snapshot.room else {
            return if snapshot.fetch_error { Self::RoomFailed } else { Self::LoadingRoom };
        };

        let body = if snapshot.is_loading_messages {
            ListBody::Loading
        } else if snapshot.fetch_error {
            ListBody::Failed
        } else {
            ListBody::Messages
        };

        let hidden =
            snapshot.fetch_error || snapshot.is_loading_messages || snapshot.is_known_empty();
        let bottom = (!hidden).then_some(if room.room_member {
            BottomBar::Composer
        } else {
            BottomBar::JoinRoom
        });

        Self::Room(RoomLayout { loading_more: snapshot.is_loading_more, body, bottom })
    }

    /// Bottom bar to render, if any.
    pub fn bottom_bar(&self) -> Option<BottomBar> {
        match self {
            Self::Room(room) => room.bottom,
            Self::RoomFailed | Self::LoadingRoom => None,
        }
    }
}
