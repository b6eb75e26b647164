//! Notification preference dialog.

use crate::{NotificationMode, NotificationPreference, RoomId, ScreenError, StoreCommand};

/// Choice labels, in index order.
pub const NOTIFICATION_LABELS: [&str; 3] = [
    "All: Notify me for all messages",
    "Announcements: Notify for mentions and announcements",
    "Mute: Notify me only when I'm directly mentioned",
];

impl NotificationMode {
    /// Position of this mode in the choice list.
    pub fn index(self) -> usize {
        match self {
            Self::All => 0,
            Self::Announcements => 1,
            Self::Mute => 2,
        }
    }
}

impl TryFrom<usize> for NotificationMode {
    type Error = ScreenError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Self::All),
            1 => Ok(Self::Announcements),
            2 => Ok(Self::Mute),
            other => Err(ScreenError::NotificationIndex(other)),
        }
    }
}

/// Single-choice dialog contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationChoices {
    /// Dialog title.
    pub title: &'static str,
    /// Choice labels.
    pub labels: [&'static str; 3],
    /// Pre-selected choice.
    pub selected_index: usize,
    /// Confirm button text.
    pub positive: &'static str,
    /// Cancel button text.
    pub negative: &'static str,
}

/// Maps a stored notification mode to a dialog and back.
#[derive(Debug, Clone)]
pub struct NotificationPreferenceSelector {
    room_id: RoomId,
}

impl NotificationPreferenceSelector {
    /// Create a selector for `room_id`.
    pub fn new(room_id: RoomId) -> Self {
        Self { room_id }
    }

    /// Dialog for the stored preference. `None` without a baseline.
    pub fn present_choices(preference: Option<&NotificationPreference>) -> Option<NotificationChoices> {
        let preference = preference?;
        Some(NotificationChoices {
            title: "Notifications setting",
            labels: NOTIFICATION_LABELS,
            selected_index: preference.mode.index(),
            positive: "Change",
            negative: "Cancel",
        })
    }

    /// Command for the choice at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NotificationIndex`] if `index` names no choice.
    pub fn resolve_selection(&self, index: usize) -> Result<StoreCommand, ScreenError> {
        let mode = NotificationMode::try_from(index)?;
        Ok(StoreCommand::ChangeNotificationSettings { room_id: self.room_id.clone(), mode })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_baseline_presents_nothing() {
        assert_eq!(NotificationPreferenceSelector::present_choices(None), None);
    }

    #[test]
    fn selection_round_trips_every_mode() {
        let selector = NotificationPreferenceSelector::new(RoomId::new("room"));

        for mode in [NotificationMode::All, NotificationMode::Announcements, NotificationMode::Mute] {
            let choices =
                NotificationPreferenceSelector::present_choices(Some(&NotificationPreference { mode }));
            let Some(choices) = choices else { panic!("choices for {mode:?}") };

            assert_eq!(
                selector.resolve_selection(choices.selected_index),
                Ok(StoreCommand::ChangeNotificationSettings { room_id: RoomId::new("room"), mode })
            );
        }
    }

    #[test]
    fn out_of_range_index_rejected() {
        let selector = NotificationPreferenceSelector::new(RoomId::new("room"));
        assert_eq!(selector.resolve_selection(3), Err(ScreenError::NotificationIndex(3)));
    }
}
