//! Message context menus.
//!
//! Tapping a row opens an [`ActionMenu`] whose items depend on whether the
//! row is a failed send or a persisted message, and for persisted messages on
//! authorship and the edit window. Selecting an item resolves to a
//! [`MenuCommand`] which the session controller executes.

use std::{fmt, str::FromStr, time::Duration};

use crate::{Clock, Message, RowId, ScreenError};

/// Title shown for a soft-deleted message.
pub const DELETED_MESSAGE_TITLE: &str = "This message was deleted";

/// Context menu entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuItem {
    /// Resend a failed item.
    Retry,
    /// Copy the text to the clipboard.
    CopyText,
    /// Mention the author in the composer.
    Reply,
    /// Quote the text in the composer.
    Quote,
    /// Quote a permalink in the composer.
    QuoteWithLink,
    /// Edit the message.
    Edit,
    /// Delete the message or failed item.
    Delete,
}

impl MenuItem {
    /// Label shown to the user.
    pub fn label(self) -> &'static str {
        match self {
            Self::Retry => "Retry",
            Self::CopyText => "Copy text",
            Self::Reply => "Reply",
            Self::Quote => "Quote",
            Self::QuoteWithLink => "Quote with link",
            Self::Edit => "Edit",
            Self::Delete => "Delete",
        }
    }
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MenuItem {
    type Err = ScreenError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        [
            Self::Retry,
            Self::CopyText,
            Self::Reply,
            Self::Quote,
            Self::QuoteWithLink,
            Self::Edit,
            Self::Delete,
        ]
        .into_iter()
        .find(|item| item.label() == label)
        .ok_or_else(|| ScreenError::UnknownMenuItem(label.to_owned()))
    }
}

/// What a menu was opened on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuContext {
    /// A failed pending send.
    Failed {
        /// List row.
        row_id: RowId,
        /// Draft text of the failed send.
        text: String,
    },
    /// A persisted message.
    Persisted {
        /// List row.
        row_id: RowId,
        /// The message.
        message: Message,
    },
}

/// A context menu ready to be shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMenu {
    /// Menu title.
    pub title: String,
    /// Items in display order.
    pub items: Vec<MenuItem>,
    /// What the menu was opened on.
    pub context: MenuContext,
}

impl ActionMenu {
    /// Whether `item` is offered by this menu.
    pub fn offers(&self, item: MenuItem) -> bool {
        self.items.contains(&item)
    }
}

/// Resolved menu selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    /// Copy text to the clipboard.
    CopyToClipboard(String),
    /// Mention a user in the composer.
    Mention(String),
    /// Quote text in the composer.
    Quote(String),
    /// Quote a permalink to the message in the composer.
    QuoteWithLink(Message),
    /// Start editing a message.
    Edit {
        /// List row.
        row_id: RowId,
        /// The message.
        message: Message,
    },
    /// Soft-delete a persisted message.
    Delete(Message),
    /// Drop a failed send.
    DeleteFailed(RowId),
    /// Resend a failed send.
    Retry {
        /// List row.
        row_id: RowId,
        /// Text to resend.
        text: String,
    },
    /// Nothing to do.
    Ignore,
}

/// Builds menus and resolves selections.
#[derive(Debug, Clone, Copy)]
pub struct ActionMenuResolver {
    edit_window: Duration,
}

impl ActionMenuResolver {
    /// Create a resolver using `edit_window` for edit/delete eligibility.
    pub fn new(edit_window: Duration) -> Self {
        Self { edit_window }
    }

    /// Build the menu for `context`.
    ///
    /// Edit and Delete are offered on persisted messages only to the author,
    /// inside the edit window, and while the message still has text.
    pub fn build_menu(
        &self,
        context: MenuContext,
        current_user: Option<&str>,
        clock: &impl Clock,
    ) -> ActionMenu {
        match &context {
            MenuContext::Failed { text, .. } => ActionMenu {
                title: text.clone(),
                items: vec![MenuItem::Retry, MenuItem::CopyText, MenuItem::Delete],
                context,
            },
            MenuContext::Persisted { message, .. } => {
                let title = if message.is_deleted() {
                    DELETED_MESSAGE_TITLE.to_owned()
                } else {
                    message.text.clone()
                };

                let mut items =
                    vec![MenuItem::CopyText, MenuItem::Reply, MenuItem::Quote, MenuItem::QuoteWithLink];
                if self.can_modify(message, current_user, clock) {
                    items.extend([MenuItem::Edit, MenuItem::Delete]);
                }

                ActionMenu { title, items, context }
            },
        }
    }

    /// Whether `current_user` may edit or delete `message` right now.
    pub fn can_modify(&self, message: &Message, current_user: Option<&str>, clock: &impl Clock) -> bool {
        current_user == Some(message.from_user.as_str())
            && !clock.is_expired(message.sent_at, self.edit_window)
            && !message.text.is_empty()
    }

    /// Resolve `item` against `menu`. Items the menu does not offer resolve to
    /// [`MenuCommand::Ignore`].
    pub fn resolve(&self, item: MenuItem, menu: &ActionMenu) -> MenuCommand {
        if !menu.offers(item) {
            tracing::warn!(%item, "menu item not offered, ignoring");
            return MenuCommand::Ignore;
        }

        match (&menu.context, item) {
            (MenuContext::Failed { text, .. }, MenuItem::CopyText) => {
                MenuCommand::CopyToClipboard(text.clone())
            },
            (MenuContext::Failed { row_id, text }, MenuItem::Retry) => {
                MenuCommand::Retry { row_id: row_id.clone(), text: text.clone() }
            },
            (MenuContext::Failed { row_id, .. }, MenuItem::Delete) => {
                MenuCommand::DeleteFailed(row_id.clone())
            },
            (MenuContext::Persisted { message, .. }, MenuItem::CopyText) => {
                MenuCommand::CopyToClipboard(message.text.clone())
            },
            (MenuContext::Persisted { message, .. }, MenuItem::Reply) => {
                MenuCommand::Mention(message.from_user.clone())
            },
            (MenuContext::Persisted { message, .. }, MenuItem::Quote) => {
                MenuCommand::Quote(message.text.clone())
            },
            (MenuContext::Persisted { message, .. }, MenuItem::QuoteWithLink) => {
                MenuCommand::QuoteWithLink(message.clone())
            },
            (MenuContext::Persisted { row_id, message }, MenuItem::Edit) => {
                MenuCommand::Edit { row_id: row_id.clone(), message: message.clone() }
            },
            (MenuContext::Persisted { message, .. }, MenuItem::Delete) => {
                MenuCommand::Delete(message.clone())
            },
            _ => MenuCommand::Ignore,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};

    use super::*;
    use crate::MessageId;

    struct Fixed(DateTime<Utc>);

    impl Clock for Fixed {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn at(secs: i64) -> Fixed {
        Fixed(DateTime::<Utc>::UNIX_EPOCH + TimeDelta::seconds(secs))
    }

    fn resolver() -> ActionMenuResolver {
        ActionMenuResolver::new(Duration::from_secs(300))
    }

    fn persisted(text: &str) -> MenuContext {
        MenuContext::Persisted {
            row_id: RowId::new("r0"),
            message: Message {
                id: MessageId::new("m1"),
                text: text.into(),
                sent_at: DateTime::<Utc>::UNIX_EPOCH,
                edited_at: None,
                from_user: "alice".into(),
            },
        }
    }

    #[test]
    fn failed_menu_is_fixed() {
        let context = MenuContext::Failed { row_id: RowId::new("r1"), text: "oops".into() };
        let menu = resolver().build_menu(context, Some("alice"), &at(10_000));

        assert_eq!(menu.title, "oops");
        assert_eq!(menu.items, vec![MenuItem::Retry, MenuItem::CopyText, MenuItem::Delete]);
        assert_eq!(
            resolver().resolve(MenuItem::Delete, &menu),
            MenuCommand::DeleteFailed(RowId::new("r1"))
        );
    }

    #[test]
    fn author_inside_window_can_edit() {
        let menu = resolver().build_menu(persisted("hi"), Some("alice"), &at(299));

        assert_eq!(menu.items, vec![
            MenuItem::CopyText,
            MenuItem::Reply,
            MenuItem::Quote,
            MenuItem::QuoteWithLink,
            MenuItem::Edit,
            MenuItem::Delete,
        ]);
    }

    #[test]
    fn edit_hidden_at_window_boundary() {
        let menu = resolver().build_menu(persisted("hi"), Some("alice"), &at(300));
        assert!(!menu.offers(MenuItem::Edit));
        assert!(!menu.offers(MenuItem::Delete));
    }

    #[test]
    fn edit_hidden_for_other_users() {
        let menu = resolver().build_menu(persisted("hi"), Some("bob"), &at(1));
        assert_eq!(menu.items.len(), 4);

        let menu = resolver().build_menu(persisted("hi"), None, &at(1));
        assert_eq!(menu.items.len(), 4);
    }

    #[test]
    fn deleted_message_title_and_no_edit() {
        let mut context = persisted("");
        if let MenuContext::Persisted { message, .. } = &mut context {
            message.edited_at = Some(DateTime::<Utc>::UNIX_EPOCH);
        }
        let menu = resolver().build_menu(context, Some("alice"), &at(1));

        assert_eq!(menu.title, DELETED_MESSAGE_TITLE);
        assert!(!menu.offers(MenuItem::Edit));
    }

    #[test]
    fn unoffered_item_is_ignored() {
        let menu = resolver().build_menu(persisted("hi"), Some("bob"), &at(1));

        assert_eq!(resolver().resolve(MenuItem::Edit, &menu), MenuCommand::Ignore);
        assert_eq!(resolver().resolve(MenuItem::Retry, &menu), MenuCommand::Ignore);
        assert_eq!(resolver().resolve(MenuItem::Reply, &menu), MenuCommand::Mention("alice".into()));
    }

    #[test]
    fn labels_round_trip() {
        for item in [MenuItem::Retry, MenuItem::QuoteWithLink, MenuItem::Delete] {
            assert_eq!(item.label().parse::<MenuItem>(), Ok(item));
        }
        assert_eq!(
            "Forward".parse::<MenuItem>(),
            Err(ScreenError::UnknownMenuItem("Forward".into()))
        );
    }
}
