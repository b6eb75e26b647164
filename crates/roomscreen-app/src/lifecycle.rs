//! Composer and edit lifecycle.
//!
//! The [`MessageLifecycle`] owns the [`ComposerState`] and turns send, edit
//! and delete requests into store commands and UI effects.
//!
//! # State Machine
//!
//! ```text
//!               request_edit (in window)
//! ┌───────────┐ ──────────────────────────> ┌─────────┐
//! │ Composing │                             │ Editing │
//! └───────────┘ <────────────────────────── └─────────┘
//!                commit_edit / cancel_edit
//! ```
//!
//! The edit window is checked when an edit starts and again when it is
//! committed, since the window can lapse while the user is typing.

use std::time::Duration;

use crate::{
    Clock, ComposerMode, ComposerState, EditTarget, Message, Notice, RoomId, RowId, ScreenAction,
    StoreCommand, UiEffect,
    composer::{compose_mention, compose_quote, compose_quote_link},
};

/// Composer/edit state machine for one room.
#[derive(Debug, Clone)]
pub struct MessageLifecycle {
    room_id: RoomId,
    edit_window: Duration,
    composer: ComposerState,
}

impl MessageLifecycle {
    /// Start composing in `room_id` with an empty draft.
    pub fn new(room_id: RoomId, edit_window: Duration) -> Self {
        Self { room_id, edit_window, composer: ComposerState::default() }
    }

    /// Send the draft, or commit the edit when editing.
    pub fn send(&mut self, clock: &impl Clock) -> Vec<ScreenAction> {
        if self.composer.is_editing() {
            return self.commit_edit(clock);
        }

        let text = std::mem::take(&mut self.composer.draft);
        vec![
            StoreCommand::SendMessage { room_id: self.room_id.clone(), text }.into(),
            ScreenAction::Render,
        ]
    }

    /// Retry a failed send. Independent of the composer mode.
    pub fn resend(&self, row_id: RowId, text: String) -> Vec<ScreenAction> {
        vec![StoreCommand::ResendMessage { room_id: self.room_id.clone(), row_id, text }.into()]
    }

    /// Soft-delete a persisted message if it is still inside the edit window.
    pub fn request_delete(&self, message: &Message, clock: &impl Clock) -> Vec<ScreenAction> {
        if clock.is_expired(message.sent_at, self.edit_window) {
            tracing::debug!(message_id = %message.id, "delete denied, edit window expired");
            return vec![UiEffect::Notice(Notice::CannotDelete).into()];
        }

        vec![
            StoreCommand::UpdateMessage {
                room_id: self.room_id.clone(),
                message_id: message.id.clone(),
                text: String::new(),
                row_id: None,
            }
            .into(),
        ]
    }

    /// Drop a failed send. Never time-gated, the item was never persisted.
    pub fn request_delete_failed(&self, row_id: RowId) -> Vec<ScreenAction> {
        vec![StoreCommand::DeleteFailedMessage { row_id, room_id: self.room_id.clone() }.into()]
    }

    /// Load a message into the composer for editing.
    ///
    /// Outside the edit window the request is dropped without a notice.
    pub fn request_edit(
        &mut self,
        row_id: RowId,
        message: &Message,
        clock: &impl Clock,
    ) -> Vec<ScreenAction> {
        if clock.is_expired(message.sent_at, self.edit_window) {
            tracing::debug!(message_id = %message.id, "edit denied, edit window expired");
            self.composer.mode = ComposerMode::Composing;
            return vec![];
        }

        self.composer.draft.clone_from(&message.text);
        self.composer.mode = ComposerMode::Editing(EditTarget {
            row_id,
            message_id: message.id.clone(),
            sent_at: message.sent_at,
        });
        vec![UiEffect::FocusComposer.into(), ScreenAction::Render]
    }

    /// Submit the edited text, re-checking the edit window first.
    pub fn commit_edit(&mut self, clock: &impl Clock) -> Vec<ScreenAction> {
        let ComposerMode::Editing(target) = std::mem::take(&mut self.composer.mode) else {
            return vec![];
        };
        let text = std::mem::take(&mut self.composer.draft);

        if clock.is_expired(target.sent_at, self.edit_window) {
            tracing::debug!(message_id = %target.message_id, "edit commit denied, edit window expired");
            return vec![
                UiEffect::BlurComposer.into(),
                UiEffect::Notice(Notice::CannotEdit).into(),
                ScreenAction::Render,
            ];
        }

        vec![
            StoreCommand::UpdateMessage {
                room_id: self.room_id.clone(),
                message_id: target.message_id,
                text,
                row_id: Some(target.row_id),
            }
            .into(),
            UiEffect::BlurComposer.into(),
            ScreenAction::Render,
        ]
    }

    /// Abandon an in-progress edit.
    pub fn cancel_edit(&mut self) -> Vec<ScreenAction> {
        if !self.composer.is_editing() {
            return vec![];
        }
        self.composer.reset();
        vec![UiEffect::BlurComposer.into(), ScreenAction::Render]
    }

    /// Replace the draft text. Valid in either mode.
    pub fn set_draft_text(&mut self, text: String) {
        self.composer.draft = text;
    }

    /// Append an `@username` mention and focus the composer.
    pub fn append_mention(&mut self, username: &str) -> Vec<ScreenAction> {
        self.composer.draft = compose_mention(&self.composer.draft, username);
        vec![UiEffect::FocusComposer.into(), ScreenAction::Render]
    }

    /// Append a blockquote and focus the composer.
    pub fn append_quote(&mut self, text: &str) -> Vec<ScreenAction> {
        self.composer.draft = compose_quote(&self.composer.draft, text);
        vec![UiEffect::FocusComposer.into(), ScreenAction::Render]
    }

    /// Append a quote-link token and focus the composer.
    pub fn append_quote_link(&mut self, link: &str) -> Vec<ScreenAction> {
        self.composer.draft = compose_quote_link(&self.composer.draft, link);
        vec![UiEffect::FocusComposer.into(), ScreenAction::Render]
    }

    /// Current composer state.
    pub fn composer(&self) -> &ComposerState {
        &self.composer
    }
}
