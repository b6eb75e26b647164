//! Room screen session controller.
//!
//! This module defines the [`SessionController`], which owns the transient
//! state of one conversation screen and is completely decoupled from I/O and
//! store mechanics.
//!
//! This is a pure state machine: it consumes [`crate::ScreenEvent`] inputs and
//! produces [`crate::ScreenAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Issues the session-start fetch batch once host interactions settle.
//! - Routes scroll, visible-row, composer, menu, toolbar and prompt events to
//!   the component that owns the rule.
//! - Keeps the latest store snapshot for lookups and derived layout.

use crate::{
    ActionMenu, ActionMenuResolver, Clock, ComposerState, DrawerState, FlushToken, MenuCommand,
    MenuContext, MenuItem, MessageId, MessageLifecycle, MessageRef, NavTarget, Notice,
    NotificationPreferenceSelector, PaginationFlags, PaginationGuard, Prompt, ReadBatch,
    ReadReceiptBatcher, RoomId, ScreenAction, ScreenConfig, ScreenEvent, ScreenLayout,
    StoreCommand, StoreSnapshot, SystemClock, Toolbar, ToolbarAction, UiEffect, UserId,
    composer::quote_link,
};

/// Conversation screen state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug)]
pub struct SessionController<C: Clock = SystemClock> {
    /// Room this screen shows.
    room_id: RoomId,
    /// Session configuration.
    config: ScreenConfig,
    /// Wall clock for edit-window checks.
    clock: C,
    /// Latest store state.
    snapshot: StoreSnapshot,
    /// Composer and edit state machine.
    lifecycle: MessageLifecycle,
    /// Read-receipt debouncer.
    receipts: ReadReceiptBatcher,
    /// Context menu builder.
    menus: ActionMenuResolver,
    /// Notification dialog mapping.
    notifications: NotificationPreferenceSelector,
    /// Menu currently shown. `None` if no menu is open.
    open_menu: Option<ActionMenu>,
}

impl<C: Clock> SessionController<C> {
    /// Create a controller for `room_id`.
    pub fn new(room_id: RoomId, config: ScreenConfig, clock: C) -> Self {
        Self {
            lifecycle: MessageLifecycle::new(room_id.clone(), config.edit_window),
            receipts: ReadReceiptBatcher::new(room_id.clone(), config.read_quiet_period),
            menus: ActionMenuResolver::new(config.edit_window),
            notifications: NotificationPreferenceSelector::new(room_id.clone()),
            room_id,
            config,
            clock,
            snapshot: StoreSnapshot::default(),
            open_menu: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: ScreenEvent) -> Vec<ScreenAction> {
        match event {
            ScreenEvent::Mounted(snapshot) => {
                self.snapshot = *snapshot;
                self.mount()
            },
            ScreenEvent::RetryLoadRoom => self.mount(),
            ScreenEvent::InteractionsSettled => self.start(),
            ScreenEvent::Unmounted => {
                self.open_menu = None;
                self.receipts.cancel()
            },
            ScreenEvent::StoreUpdated(snapshot) => {
                self.snapshot = *snapshot;
                vec![ScreenAction::Render]
            },
            ScreenEvent::ScrollReachedEnd => self.scroll_reached_end(),
            ScreenEvent::ComposerTextChanged(text) => {
                self.lifecycle.set_draft_text(text);
                vec![]
            },
            ScreenEvent::SendPressed => self.lifecycle.send(&self.clock),
            ScreenEvent::EditCancelled => self.lifecycle.cancel_edit(),
            ScreenEvent::MessageTapped(message) => self.open_menu_for(message),
            ScreenEvent::MessageLongPressed(message_id) => self.navigate_to_message(message_id),
            ScreenEvent::UsernamePressed(username) => self.lifecycle.append_mention(&username),
            ScreenEvent::AvatarPressed { user_id, username } => {
                Self::navigate_to_user(user_id, username)
            },
            ScreenEvent::VisibleRowsChanged(rows) => self.receipts.record_visible_rows(rows),
            ScreenEvent::ReadFlushDue(token) => self.receipts.flush_due(token),
            ScreenEvent::ToolbarActionSelected(index) => self.toolbar_action(index),
            ScreenEvent::MenuItemSelected(item) => self.menu_item_selected(item),
            ScreenEvent::MenuDismissed => {
                self.open_menu = None;
                vec![]
            },
            ScreenEvent::NotificationChoiceSelected(index) => self.notification_choice(index),
            ScreenEvent::JoinRoomPressed => vec![UiEffect::Confirm(Prompt::JoinRoom).into()],
            ScreenEvent::PromptAnswered { prompt, confirmed } => self.prompt_answered(prompt, confirmed),
            ScreenEvent::InfoDrawerChanged(state) => {
                vec![StoreCommand::SetRoomInfoDrawer(state).into()]
            },
            ScreenEvent::RetryFetchMessages => vec![
                StoreCommand::ClearFetchError.into(),
                StoreCommand::FetchMessages { room_id: self.room_id.clone() }.into(),
            ],
        }
    }

    fn mount(&self) -> Vec<ScreenAction> {
        vec![
            StoreCommand::SetRoomInfoDrawer(DrawerState::Closed).into(),
            ScreenAction::AwaitInteractions,
        ]
    }

    /// Session-start batch. Submitted together, completion order is up to the
    /// store.
    fn start(&self) -> Vec<ScreenAction> {
        let room_id = &self.room_id;
        let mut actions: Vec<ScreenAction> = vec![StoreCommand::ClearFetchError.into()];

        if self.snapshot.active_room.as_ref() != Some(room_id) {
            actions.push(StoreCommand::SelectRoom { room_id: room_id.clone() }.into());
        }
        if self.snapshot.room.is_none() {
            actions.push(StoreCommand::FetchRoom { room_id: room_id.clone() }.into());
        }
        actions.push(StoreCommand::FetchNotificationSettings { room_id: room_id.clone() }.into());
        actions.push(match self.snapshot.rows {
            None => StoreCommand::FetchMessages { room_id: room_id.clone() }.into(),
            Some(_) => StoreCommand::FetchMessagesIfNeeded { room_id: room_id.clone() }.into(),
        });

        tracing::debug!(room_id = %self.room_id, commands = actions.len(), "session started");
        actions
    }

    fn scroll_reached_end(&self) -> Vec<ScreenAction> {
        if !PaginationGuard::should_fetch_older(&self.snapshot.pagination_flags()) {
            return vec![];
        }
        vec![StoreCommand::FetchOlderMessages { room_id: self.room_id.clone() }.into()]
    }

    fn open_menu_for(&mut self, message: MessageRef) -> Vec<ScreenAction> {
        let context = match message {
            MessageRef::Failed { row_id, text } => MenuContext::Failed { row_id, text },
            MessageRef::Persisted { row_id, message_id } => {
                let Some(message) = self.snapshot.message(&message_id) else {
                    tracing::warn!(%message_id, "tapped message not in store, ignoring");
                    return vec![];
                };
                MenuContext::Persisted { row_id, message: message.clone() }
            },
        };

        let menu =
            self.menus.build_menu(context, self.snapshot.current_user.as_deref(), &self.clock);
        self.open_menu = Some(menu.clone());
        vec![UiEffect::ShowMenu(menu).into()]
    }

    fn menu_item_selected(&mut self, item: MenuItem) -> Vec<ScreenAction> {
        let Some(menu) = self.open_menu.take() else {
            tracing::warn!(%item, "menu selection without an open menu, ignoring");
            return vec![];
        };

        match self.menus.resolve(item, &menu) {
            MenuCommand::CopyToClipboard(text) => vec![
                UiEffect::CopyToClipboard(text).into(),
                UiEffect::Notice(Notice::Copied).into(),
            ],
            MenuCommand::Mention(username) => self.lifecycle.append_mention(&username),
            MenuCommand::Quote(text) => self.lifecycle.append_quote(&text),
            MenuCommand::QuoteWithLink(message) => {
                let Some(room) = &self.snapshot.room else {
                    tracing::warn!("quote with link before room metadata loaded, ignoring");
                    return vec![];
                };
                let link = quote_link(
                    message.sent_at,
                    &self.config.quote_time_format,
                    &room.url,
                    &message.id,
                );
                self.lifecycle.append_quote_link(&link)
            },
            // The menu holds the message as it was when tapped, act on the
            // store's current copy.
            MenuCommand::Edit { row_id, message: tapped } => {
                let Some(message) = self.snapshot.message(&tapped.id) else {
                    tracing::warn!(message_id = %tapped.id, "message left the store, ignoring edit");
                    return vec![];
                };
                self.lifecycle.request_edit(row_id, message, &self.clock)
            },
            MenuCommand::Delete(tapped) => {
                let Some(message) = self.snapshot.message(&tapped.id) else {
                    tracing::warn!(message_id = %tapped.id, "message left the store, ignoring delete");
                    return vec![];
                };
                self.lifecycle.request_delete(message, &self.clock)
            },
            MenuCommand::DeleteFailed(row_id) => self.lifecycle.request_delete_failed(row_id),
            MenuCommand::Retry { row_id, text } => self.lifecycle.resend(row_id, text),
            MenuCommand::Ignore => vec![],
        }
    }

    fn toolbar_action(&self, index: usize) -> Vec<ScreenAction> {
        let action = match ToolbarAction::try_from(index) {
            Ok(action) => action,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring toolbar selection");
                return vec![];
            },
        };

        let room_id = self.room_id.clone();
        match action {
            ToolbarAction::OpenRoomInfo => vec![UiEffect::OpenInfoDrawer.into()],
            ToolbarAction::ToggleFavorite => vec![StoreCommand::ChangeFavoriteStatus { room_id }.into()],
            ToolbarAction::MarkAllAsRead => vec![StoreCommand::MarkAllAsRead { room_id }.into()],
            ToolbarAction::NotificationSettings => {
                NotificationPreferenceSelector::present_choices(self.snapshot.notifications.as_ref())
                    .map(|choices| ScreenAction::Ui(UiEffect::ShowNotificationChoices(choices)))
                    .into_iter()
                    .collect()
            },
            ToolbarAction::LeaveRoom => vec![UiEffect::Confirm(Prompt::LeaveRoom).into()],
        }
    }

    fn notification_choice(&self, index: usize) -> Vec<ScreenAction> {
        if self.snapshot.notifications.is_none() {
            tracing::warn!("notification choice without a stored preference, ignoring");
            return vec![];
        }

        match self.notifications.resolve_selection(index) {
            Ok(command) => vec![command.into()],
            Err(e) => {
                tracing::warn!(error = %e, "ignoring notification choice");
                vec![]
            },
        }
    }

    fn prompt_answered(&self, prompt: Prompt, confirmed: bool) -> Vec<ScreenAction> {
        if !confirmed {
            return vec![];
        }

        let room_id = self.room_id.clone();
        match prompt {
            Prompt::JoinRoom => vec![StoreCommand::JoinRoom { room_id }.into()],
            Prompt::LeaveRoom => vec![StoreCommand::LeaveRoom { room_id }.into()],
        }
    }

    fn navigate_to_message(&self, message_id: MessageId) -> Vec<ScreenAction> {
        let target = NavTarget::Message { message_id, room_id: self.room_id.clone() };
        vec![StoreCommand::NavigateTo(target).into()]
    }

    fn navigate_to_user(user_id: UserId, username: String) -> Vec<ScreenAction> {
        vec![StoreCommand::NavigateTo(NavTarget::User { user_id, username }).into()]
    }

    /// Room this screen shows.
    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    /// Session configuration.
    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    /// Latest store snapshot.
    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }

    /// Composer state.
    pub fn composer(&self) -> &ComposerState {
        self.lifecycle.composer()
    }

    /// Current draft text.
    pub fn draft_text(&self) -> &str {
        &self.lifecycle.composer().draft
    }

    /// Whether an existing message is being edited.
    pub fn is_editing(&self) -> bool {
        self.lifecycle.composer().is_editing()
    }

    /// Pagination flags from the latest snapshot.
    pub fn pagination_flags(&self) -> PaginationFlags {
        self.snapshot.pagination_flags()
    }

    /// Rows waiting for the next read flush.
    pub fn read_batch(&self) -> &ReadBatch {
        self.receipts.batch()
    }

    /// Token of the pending read flush. `None` if nothing is scheduled.
    pub fn pending_read_flush(&self) -> Option<FlushToken> {
        self.receipts.pending()
    }

    /// Menu currently shown. `None` if no menu is open.
    pub fn open_menu(&self) -> Option<&ActionMenu> {
        self.open_menu.as_ref()
    }

    /// What the host should render.
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::for_snapshot(&self.snapshot)
    }

    /// Whether the composer or join bar is shown.
    pub fn shows_bottom_bar(&self) -> bool {
        self.layout().bottom_bar().is_some()
    }

    /// Toolbar contents.
    pub fn toolbar(&self) -> Toolbar {
        Toolbar::for_room(self.snapshot.room.as_ref())
    }
}
