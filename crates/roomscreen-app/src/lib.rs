//! Room screen controller
//!
//! Pure state machines and a generic runtime for the conversation screen of
//! a chat client, enabling deterministic simulation testing with the same
//! code that runs against a real host.
//!
//! # Components
//!
//! - [`SessionController`]: screen state machine (mount, pagination, menus)
//! - [`MessageLifecycle`]: composer and the time-boxed edit/delete window
//! - [`ReadReceiptBatcher`]: debounced read receipts
//! - [`ActionMenuResolver`]: per-message action menus
//! - [`NotificationPreferenceSelector`]: notification mode dialog
//! - [`Driver`]: Trait for host I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod clock;
mod command;
pub mod composer;
pub mod config;
mod driver;
mod error;
mod event;
mod layout;
mod lifecycle;
mod menu;
mod notifications;
mod pagination;
mod read_receipts;
mod runtime;
mod session;
mod state;
mod toolbar;

pub use action::{Notice, Prompt, ScreenAction, UiEffect};
pub use clock::{Clock, SystemClock};
pub use command::{DrawerState, NavTarget, StoreCommand};
pub use composer::{ComposerMode, ComposerState, EditTarget};
pub use config::ScreenConfig;
pub use driver::Driver;
pub use error::ScreenError;
pub use event::{MessageRef, ScreenEvent};
pub use layout::{BottomBar, ListBody, RoomLayout, ScreenLayout};
pub use lifecycle::MessageLifecycle;
pub use menu::{
    ActionMenu, ActionMenuResolver, DELETED_MESSAGE_TITLE, MenuCommand, MenuContext, MenuItem,
};
pub use notifications::{NOTIFICATION_LABELS, NotificationChoices, NotificationPreferenceSelector};
pub use pagination::PaginationGuard;
pub use read_receipts::{FlushToken, ReadBatch, ReadReceiptBatcher};
pub use runtime::Runtime;
pub use session::SessionController;
pub use state::{
    ListRow, Message, MessageId, NotificationMode, NotificationPreference, PaginationFlags,
    PendingSend, RoomId, RoomInfo, RowId, StoreSnapshot, UserId,
};
pub use toolbar::{Toolbar, ToolbarAction};
