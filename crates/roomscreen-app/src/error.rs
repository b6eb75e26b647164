//! Error types for the room screen.
//!
//! None of these are fatal. The session controller logs them and ignores the
//! offending event; they exist so host adapters that parse labels or indices
//! get a typed failure instead of a silent `None`.

use thiserror::Error;

/// Errors raised while interpreting host input or configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// Menu label does not name any known menu item.
    #[error("unknown menu item label: {0:?}")]
    UnknownMenuItem(String),

    /// Toolbar action index has no matching action.
    #[error("toolbar action index {0} out of range")]
    ToolbarIndex(usize),

    /// Notification choice index has no matching mode.
    #[error("notification choice index {0} out of range")]
    NotificationIndex(usize),

    /// Configuration cannot be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
