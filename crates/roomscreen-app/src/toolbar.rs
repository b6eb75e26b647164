//! Room toolbar.

use crate::{RoomInfo, ScreenError};

/// Toolbar overflow actions, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Open the room-info drawer.
    OpenRoomInfo,
    /// Add or remove the room from favourites.
    ToggleFavorite,
    /// Mark every message as read.
    MarkAllAsRead,
    /// Open the notification settings dialog.
    NotificationSettings,
    /// Leave the room (asks for confirmation).
    LeaveRoom,
}

impl ToolbarAction {
    /// Every action, in display order.
    pub const ALL: [Self; 5] = [
        Self::OpenRoomInfo,
        Self::ToggleFavorite,
        Self::MarkAllAsRead,
        Self::NotificationSettings,
        Self::LeaveRoom,
    ];

    /// Title for this action given the room's favourite state.
    pub fn title(self, favourite: bool) -> &'static str {
        match self {
            Self::OpenRoomInfo => "Open room info",
            Self::ToggleFavorite if favourite => "Remove from favorite",
            Self::ToggleFavorite => "Add to favorite",
            Self::MarkAllAsRead => "Mark all as read",
            Self::NotificationSettings => "Change notification settings",
            Self::LeaveRoom => "Leave room",
        }
    }
}

impl TryFrom<usize> for ToolbarAction {
    type Error = ScreenError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        Self::ALL.get(index).copied().ok_or(ScreenError::ToolbarIndex(index))
    }
}

/// Toolbar contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolbar {
    /// Room name, empty until the room is loaded.
    pub title: String,
    /// Overflow actions with their titles. Empty for non-members.
    pub actions: Vec<(ToolbarAction, &'static str)>,
}

impl Toolbar {
    /// Toolbar for `room`.
    pub fn for_room(room: Option<&RoomInfo>) -> Self {
        let Some(room) = room else {
            return Self { title: String::new(), actions: Vec::new() };
        };

        let actions = if room.room_member {
            ToolbarAction::ALL.iter().map(|action| (*action, action.title(room.is_favourite()))).collect()
        } else {
            Vec::new()
        };
        Self { title: room.name.clone(), actions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(room_member: bool, favourite: Option<u32>) -> RoomInfo {
        RoomInfo { name: "rust".into(), url: "/rust".into(), room_member, favourite }
    }

    #[test]
    fn favourite_title_follows_flag() {
        let toolbar = Toolbar::for_room(Some(&room(true, Some(1))));
        assert_eq!(toolbar.actions[1], (ToolbarAction::ToggleFavorite, "Remove from favorite"));

        let toolbar = Toolbar::for_room(Some(&room(true, None)));
        assert_eq!(toolbar.actions[1], (ToolbarAction::ToggleFavorite, "Add to favorite"));
    }

    #[test]
    fn non_members_get_no_actions() {
        let toolbar = Toolbar::for_room(Some(&room(false, None)));
        assert_eq!(toolbar.title, "rust");
        assert!(toolbar.actions.is_empty());
        assert!(Toolbar::for_room(None).actions.is_empty());
    }

    #[test]
    fn index_mapping() {
        assert_eq!(ToolbarAction::try_from(4), Ok(ToolbarAction::LeaveRoom));
        assert_eq!(ToolbarAction::try_from(5), Err(ScreenError::ToolbarIndex(5)));
    }
}
