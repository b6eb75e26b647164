//! Screen side-effects and intents.
//!
//! This module defines the [`ScreenAction`] enum, the instructions produced by
//! the [`crate::SessionController`] for the runtime to execute.

use std::{fmt, time::Duration};

use crate::{ActionMenu, FlushToken, NotificationChoices, StoreCommand};

/// Actions produced by the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// Render the screen.
    Render,

    /// Submit a command to the store.
    Dispatch(StoreCommand),

    /// Wait until the host's current transition settles, then deliver
    /// [`crate::ScreenEvent::InteractionsSettled`]. One-shot.
    AwaitInteractions,

    /// Arm the read-receipt flush timer, replacing any pending one.
    ScheduleReadFlush {
        /// Token to hand back in [`crate::ScreenEvent::ReadFlushDue`].
        token: FlushToken,
        /// Delay from now.
        delay: Duration,
    },

    /// Disarm the read-receipt flush timer.
    CancelReadFlush,

    /// Presentational side-effect for the host UI.
    Ui(UiEffect),
}

/// Side-effects performed by the host's presentational layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Give the composer input focus.
    FocusComposer,
    /// Remove focus from the composer input.
    BlurComposer,
    /// Show a short transient notice.
    Notice(Notice),
    /// Write text to the clipboard.
    CopyToClipboard(String),
    /// Show a message context menu.
    ShowMenu(ActionMenu),
    /// Show the notification settings dialog.
    ShowNotificationChoices(NotificationChoices),
    /// Ask the user to confirm.
    Confirm(Prompt),
    /// Slide out the room-info drawer.
    OpenInfoDrawer,
}

impl From<UiEffect> for ScreenAction {
    fn from(effect: UiEffect) -> Self {
        Self::Ui(effect)
    }
}

impl From<StoreCommand> for ScreenAction {
    fn from(command: StoreCommand) -> Self {
        Self::Dispatch(command)
    }
}

/// Transient notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Delete attempted outside the edit window.
    CannotDelete,
    /// Edit committed outside the edit window.
    CannotEdit,
    /// Text was copied to the clipboard.
    Copied,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CannotDelete => "Can't delete message.",
            Self::CannotEdit => "Can't edit message.",
            Self::Copied => "Copied",
        })
    }
}

/// Confirmation prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    /// Confirm joining the room.
    JoinRoom,
    /// Confirm leaving the room.
    LeaveRoom,
}

impl Prompt {
    /// Prompt title.
    pub fn title(self) -> &'static str {
        match self {
            Self::JoinRoom => "Join room",
            Self::LeaveRoom => "Leave room",
        }
    }

    /// Prompt body.
    pub fn message(self) -> &'static str {
        "Are you sure?"
    }
}
