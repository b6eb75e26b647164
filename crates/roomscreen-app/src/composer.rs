//! Composer state and draft composition.

use chrono::{DateTime, Utc};

use crate::{MessageId, RowId};

/// Message being edited in the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    /// List row of the message.
    pub row_id: RowId,
    /// Message being edited.
    pub message_id: MessageId,
    /// When the message was sent. Re-checked at commit time.
    pub sent_at: DateTime<Utc>,
}

/// Composer mode. The edit target only exists while editing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ComposerMode {
    /// Writing a new message.
    #[default]
    Composing,
    /// Editing an existing message.
    Editing(EditTarget),
}

/// Draft text plus mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    /// In-progress text.
    pub draft: String,
    /// Current mode.
    pub mode: ComposerMode,
}

impl ComposerState {
    /// Whether an existing message is being edited.
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, ComposerMode::Editing(_))
    }

    /// Edit target. `None` while composing.
    pub fn edit_target(&self) -> Option<&EditTarget> {
        match &self.mode {
            ComposerMode::Editing(target) => Some(target),
            ComposerMode::Composing => None,
        }
    }

    /// Return to composing with an empty draft.
    pub fn reset(&mut self) {
        self.draft.clear();
        self.mode = ComposerMode::Composing;
    }
}

/// Append a blockquote of `text` to `draft`.
pub fn compose_quote(draft: &str, text: &str) -> String {
    if draft.is_empty() { format!("> {text}\n\n ") } else { format!("{draft}\n> {text}\n\n ") }
}

/// Append an `@username` mention to `draft`.
pub fn compose_mention(draft: &str, username: &str) -> String {
    if draft.is_empty() { format!("@{username} ") } else { format!("{draft} @{username} ") }
}

/// Append a quote-link token to `draft`.
pub fn compose_quote_link(draft: &str, link: &str) -> String {
    if draft.is_empty() { format!("{link} ") } else { format!("{draft}\n{link} ") }
}

/// Format a permalink to a message: `{time} — {room_url}?at={message_id}`.
pub fn quote_link(
    sent_at: DateTime<Utc>,
    time_format: &str,
    room_url: &str,
    message_id: &MessageId,
) -> String {
    let time = sent_at.format(time_format);
    format!("{time} — {room_url}?at={message_id}")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::config::DEFAULT_QUOTE_TIME_FORMAT;

    #[test]
    fn quote_into_empty_draft() {
        assert_eq!(compose_quote("", "hi"), "> hi\n\n ");
    }

    #[test]
    fn quote_appends_to_draft() {
        assert_eq!(compose_quote("x", "hi"), "x\n> hi\n\n ");
    }

    #[test]
    fn mention_spacing() {
        assert_eq!(compose_mention("", "bob"), "@bob ");
        assert_eq!(compose_mention("hey", "bob"), "hey @bob ");
    }

    #[test]
    fn quote_link_format() {
        let sent = Utc.with_ymd_and_hms(2016, 3, 7, 14, 5, 0).single();
        let Some(sent) = sent else { panic!("valid timestamp") };

        let link = quote_link(sent, DEFAULT_QUOTE_TIME_FORMAT, "/rust-lang/rust", &MessageId::new("56dd"));
        insta::assert_snapshot!(link, @"2016 Mar 7, 14:05 — /rust-lang/rust?at=56dd");

        assert_eq!(compose_quote_link("see", &link), format!("see\n{link} "));
        assert_eq!(compose_quote_link("", &link), format!("{link} "));
    }
}
