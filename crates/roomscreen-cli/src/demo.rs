//! Scripted demo session.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use roomscreen_app::{
    MenuItem, Message, MessageId, MessageRef, ReadBatch, ScreenConfig, ScreenEvent, ToolbarAction,
};
use roomscreen_harness::{SimDriver, row_for};

/// Messages in the demo room.
pub const HISTORY_LEN: usize = 40;

/// Other participant in the demo room.
const PEER: &str = "ada";

fn message_id(i: usize) -> MessageId {
    MessageId::new(format!("msg-{i:03}"))
}

/// Demo history, oldest first. The newest message belongs to `user` and is
/// one minute old, so it can still be edited.
pub fn history(user: &str, now: DateTime<Utc>) -> Vec<Message> {
    (0..HISTORY_LEN)
        .map(|i| {
            let age = TimeDelta::minutes((HISTORY_LEN - i) as i64);
            let from_user = if i % 3 == 0 || i == HISTORY_LEN - 1 { user } else { PEER };
            Message {
                id: message_id(i),
                text: format!("message number {i}"),
                sent_at: now - age,
                edited_at: None,
                from_user: from_user.to_owned(),
            }
        })
        .collect()
}

fn visible(range: std::ops::Range<usize>) -> ScreenEvent {
    let batch: ReadBatch = range
        .map(|i| {
            let id = message_id(i);
            (row_for(&id), id)
        })
        .collect();
    ScreenEvent::VisibleRowsChanged(batch)
}

fn tap(i: usize) -> ScreenEvent {
    let message_id = message_id(i);
    ScreenEvent::MessageTapped(MessageRef::Persisted { row_id: row_for(&message_id), message_id })
}

fn toolbar(action: ToolbarAction) -> ScreenEvent {
    let index = ToolbarAction::ALL.iter().position(|a| *a == action).unwrap_or_default();
    ScreenEvent::ToolbarActionSelected(index)
}

/// Append the demo script to `driver`.
///
/// Scroll through the list, page in older messages, fix a typo in the newest
/// message, send a reply quoting the peer, then mute the room.
pub fn script(driver: SimDriver, config: &ScreenConfig) -> SimDriver {
    let quiet = config.read_quiet_period;
    let newest = HISTORY_LEN - 1;

    driver
        .then(visible(newest - 5..newest))
        .idle(quiet / 2)
        .then(visible(newest - 8..newest - 3))
        .idle(quiet * 2)
        .then(ScreenEvent::ScrollReachedEnd)
        .then(tap(newest))
        .then(ScreenEvent::MenuItemSelected(MenuItem::Edit))
        .then(ScreenEvent::ComposerTextChanged("message number 39, edited".into()))
        .then(ScreenEvent::SendPressed)
        .then(tap(newest - 1))
        .then(ScreenEvent::MenuItemSelected(MenuItem::QuoteWithLink))
        .then(ScreenEvent::UsernamePressed(PEER.into()))
        .then(ScreenEvent::SendPressed)
        .then(toolbar(ToolbarAction::NotificationSettings))
        .then(ScreenEvent::NotificationChoiceSelected(2))
        .idle(Duration::from_secs(1))
}
