//! In-memory store model.
//!
//! `SimStore` stands in for the external store the controller talks to. It
//! applies [`StoreCommand`]s synchronously and exposes the resulting
//! room-scoped [`StoreSnapshot`]. Server history is paged in the same way a
//! real store pages it: the newest page on the first fetch, older pages on
//! demand.

use std::collections::BTreeSet;

use roomscreen_app::{
    Clock, DrawerState, ListRow, Message, MessageId, NavTarget, NotificationMode,
    NotificationPreference, PendingSend, RoomId, RoomInfo, RowId, StoreCommand, StoreSnapshot,
};

use crate::SimClock;

/// Default number of messages per fetched page.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Simulated single-room store.
#[derive(Debug, Clone)]
pub struct SimStore {
    room_id: RoomId,
    clock: SimClock,
    /// Room metadata as the server knows it.
    remote_room: RoomInfo,
    remote_notifications: NotificationPreference,
    /// Server messages not loaded yet, oldest first.
    unloaded: Vec<Message>,
    page_size: usize,
    fail_fetches: bool,
    fail_sends: bool,
    next_local: u64,
    read: BTreeSet<MessageId>,
    drawer: Option<DrawerState>,
    navigations: Vec<NavTarget>,
    snapshot: StoreSnapshot,
}

impl SimStore {
    /// Store for `room_id` with an empty history. The signed-in user is a
    /// member.
    pub fn new(room_id: impl Into<RoomId>, clock: SimClock) -> Self {
        let room_id = room_id.into();
        Self {
            remote_room: RoomInfo {
                name: room_id.to_string(),
                url: format!("/{room_id}"),
                room_member: true,
                favourite: None,
            },
            room_id,
            clock,
            remote_notifications: NotificationPreference { mode: NotificationMode::All },
            unloaded: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            fail_fetches: false,
            fail_sends: false,
            next_local: 0,
            read: BTreeSet::new(),
            drawer: None,
            navigations: Vec::new(),
            snapshot: StoreSnapshot { current_user: Some("me".into()), ..Default::default() },
        }
    }

    /// Replace the server-side room metadata.
    #[must_use]
    pub fn with_room(mut self, room: RoomInfo) -> Self {
        self.remote_room = room;
        self
    }

    /// Seed the server history, oldest first.
    #[must_use]
    pub fn with_history(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.unloaded.extend(messages);
        self
    }

    /// Set the page size for message fetches.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Set the signed-in username.
    #[must_use]
    pub fn with_current_user(mut self, username: impl Into<String>) -> Self {
        self.snapshot.current_user = Some(username.into());
        self
    }

    /// Set the server-side notification mode.
    #[must_use]
    pub fn with_notifications(mut self, mode: NotificationMode) -> Self {
        self.remote_notifications = NotificationPreference { mode };
        self
    }

    /// Make every messages fetch fail until [`Self::set_fail_fetches`] turns
    /// it off.
    #[must_use]
    pub fn failing_fetches(mut self) -> Self {
        self.fail_fetches = true;
        self
    }

    /// Make every send fail until [`Self::set_fail_sends`] turns it off.
    #[must_use]
    pub fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Toggle messages-fetch failures.
    pub fn set_fail_fetches(&mut self, fail: bool) {
        self.fail_fetches = fail;
    }

    /// Toggle send failures.
    pub fn set_fail_sends(&mut self, fail: bool) {
        self.fail_sends = fail;
    }

    /// Apply a command. Returns `true` if the snapshot changed.
    pub fn apply(&mut self, command: &StoreCommand) -> bool {
        if let Some(room_id) = command_room(command)
            && room_id != &self.room_id
        {
            tracing::warn!(%room_id, command = command.name(), "command for another room, ignoring");
            return false;
        }

        let before = self.snapshot.clone();
        match command {
            StoreCommand::SelectRoom { room_id } => self.snapshot.active_room = Some(room_id.clone()),
            StoreCommand::FetchRoom { .. } => self.snapshot.room = Some(self.remote_room.clone()),
            StoreCommand::FetchMessages { .. } => self.fetch_messages(),
            StoreCommand::FetchMessagesIfNeeded { .. } => {
                if self.snapshot.rows.is_none() {
                    self.fetch_messages();
                }
            },
            StoreCommand::FetchOlderMessages { .. } => self.fetch_older(),
            StoreCommand::FetchNotificationSettings { .. } => {
                self.snapshot.notifications = Some(self.remote_notifications);
            },
            StoreCommand::SendMessage { text, .. } => self.send(text),
            StoreCommand::ResendMessage { row_id, text, .. } => self.resend(row_id, text),
            StoreCommand::UpdateMessage { message_id, text, .. } => self.update(message_id, text),
            StoreCommand::DeleteFailedMessage { row_id, .. } => {
                if let Some(rows) = &mut self.snapshot.rows {
                    rows.retain(|row| !matches!(row, ListRow::Pending(p) if &p.row_id == row_id));
                }
            },
            StoreCommand::ReadMessages { batch, .. } => self.read.extend(batch.values().cloned()),
            StoreCommand::ChangeNotificationSettings { mode, .. } => {
                self.remote_notifications = NotificationPreference { mode: *mode };
                self.snapshot.notifications = Some(self.remote_notifications);
            },
            StoreCommand::ClearFetchError => self.snapshot.fetch_error = false,
            StoreCommand::ChangeFavoriteStatus { .. } => {
                self.remote_room.favourite = match self.remote_room.favourite {
                    Some(_) => None,
                    None => Some(1),
                };
                self.sync_room();
            },
            StoreCommand::MarkAllAsRead { .. } => {
                let ids: Vec<_> = self.loaded_messages().map(|m| m.id.clone()).collect();
                self.read.extend(ids);
            },
            StoreCommand::JoinRoom { .. } => {
                self.remote_room.room_member = true;
                self.sync_room();
            },
            StoreCommand::LeaveRoom { .. } => {
                self.remote_room.room_member = false;
                self.sync_room();
            },
            StoreCommand::SetRoomInfoDrawer(state) => self.drawer = Some(*state),
            StoreCommand::NavigateTo(target) => self.navigations.push(target.clone()),
        }
        before != self.snapshot
    }

    fn fetch_messages(&mut self) {
        if self.fail_fetches {
            self.snapshot.fetch_error = true;
            return;
        }
        // A loaded list is already the newest page.
        if self.snapshot.rows.is_none() {
            self.snapshot.rows = Some(self.take_page());
        }
        self.snapshot.has_no_more = self.unloaded.is_empty();
    }

    fn fetch_older(&mut self) {
        if self.fail_fetches {
            self.snapshot.fetch_error = true;
            return;
        }
        let mut page = self.take_page();
        page.extend(self.snapshot.rows.take().unwrap_or_default());
        self.snapshot.rows = Some(page);
        self.snapshot.has_no_more = self.unloaded.is_empty();
    }

    /// Newest unloaded page, as list rows.
    fn take_page(&mut self) -> Vec<ListRow> {
        let split = self.unloaded.len().saturating_sub(self.page_size);
        self.unloaded
            .split_off(split)
            .into_iter()
            .map(|message| ListRow::Sent { row_id: row_for(&message.id), message })
            .collect()
    }

    fn send(&mut self, text: &str) {
        let row_id = RowId::new(format!("local-{}", self.next_local));
        self.next_local += 1;

        let row = if self.fail_sends {
            ListRow::Pending(PendingSend { row_id, text: text.to_owned(), failed: true })
        } else {
            let message = self.persist(text);
            ListRow::Sent { row_id, message }
        };
        self.snapshot.rows.get_or_insert_with(Vec::new).push(row);
    }

    fn resend(&mut self, row_id: &RowId, text: &str) {
        if self.fail_sends {
            return;
        }
        let message = self.persist(text);
        let Some(row) = self.snapshot.rows.iter_mut().flatten().find(|row| row.row_id() == row_id)
        else {
            return;
        };
        if matches!(row, ListRow::Pending(_)) {
            *row = ListRow::Sent { row_id: row_id.clone(), message };
        }
    }

    fn update(&mut self, message_id: &MessageId, text: &str) {
        let now = self.clock.now();
        let message = self.snapshot.rows.iter_mut().flatten().find_map(|row| match row {
            ListRow::Sent { message, .. } if &message.id == message_id => Some(message),
            _ => None,
        });
        if let Some(message) = message {
            message.text = text.to_owned();
            message.edited_at = Some(now);
        }
    }

    /// New server message authored by the signed-in user.
    fn persist(&mut self, text: &str) -> Message {
        let id = MessageId::new(format!("m-{}", self.next_local));
        self.next_local += 1;
        Message {
            id,
            text: text.to_owned(),
            sent_at: self.clock.now(),
            edited_at: None,
            from_user: self.snapshot.current_user.clone().unwrap_or_default(),
        }
    }

    fn sync_room(&mut self) {
        if self.snapshot.room.is_some() {
            self.snapshot.room = Some(self.remote_room.clone());
        }
    }

    fn loaded_messages(&self) -> impl Iterator<Item = &Message> {
        self.snapshot.rows.iter().flatten().filter_map(|row| match row {
            ListRow::Sent { message, .. } => Some(message),
            ListRow::Pending(_) => None,
        })
    }

    /// Current room-scoped snapshot.
    pub fn snapshot(&self) -> &StoreSnapshot {
        &self.snapshot
    }

    /// Messages marked read so far.
    pub fn read_messages(&self) -> &BTreeSet<MessageId> {
        &self.read
    }

    /// Last recorded info-drawer position.
    pub fn drawer(&self) -> Option<DrawerState> {
        self.drawer
    }

    /// Navigations requested so far.
    pub fn navigations(&self) -> &[NavTarget] {
        &self.navigations
    }

    /// Shared wall clock.
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }
}

/// List row assigned to a server message.
pub fn row_for(message_id: &MessageId) -> RowId {
    RowId::new(format!("row-{message_id}"))
}

fn command_room(command: &StoreCommand) -> Option<&RoomId> {
    match command {
        StoreCommand::SelectRoom { room_id }
        | StoreCommand::FetchRoom { room_id }
        | StoreCommand::FetchMessages { room_id }
        | StoreCommand::FetchMessagesIfNeeded { room_id }
        | StoreCommand::FetchOlderMessages { room_id }
        | StoreCommand::FetchNotificationSettings { room_id }
        | StoreCommand::SendMessage { room_id, .. }
        | StoreCommand::ResendMessage { room_id, .. }
        | StoreCommand::UpdateMessage { room_id, .. }
        | StoreCommand::DeleteFailedMessage { room_id, .. }
        | StoreCommand::ReadMessages { room_id, .. }
        | StoreCommand::ChangeNotificationSettings { room_id, .. }
        | StoreCommand::ChangeFavoriteStatus { room_id }
        | StoreCommand::MarkAllAsRead { room_id }
        | StoreCommand::JoinRoom { room_id }
        | StoreCommand::LeaveRoom { room_id } => Some(room_id),
        StoreCommand::NavigateTo(NavTarget::Message { room_id, .. }) => Some(room_id),
        StoreCommand::ClearFetchError
        | StoreCommand::SetRoomInfoDrawer(_)
        | StoreCommand::NavigateTo(NavTarget::User { .. }) => None,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};

    use super::*;

    fn history(count: usize) -> Vec<Message> {
        (0..count)
            .map(|i| Message {
                id: MessageId::new(format!("h{i}")),
                text: format!("message {i}"),
                sent_at: DateTime::<Utc>::default() + TimeDelta::seconds(i as i64),
                edited_at: None,
                from_user: "alice".into(),
            })
            .collect()
    }

    fn store(count: usize) -> SimStore {
        SimStore::new("rust", SimClock::default()).with_history(history(count)).with_page_size(2)
    }

    fn room() -> RoomId {
        RoomId::new("rust")
    }

    fn loaded_ids(store: &SimStore) -> Vec<String> {
        store.loaded_messages().map(|m| m.id.to_string()).collect()
    }

    #[test]
    fn pages_newest_first() {
        let mut store = store(3);

        assert!(store.apply(&StoreCommand::FetchMessages { room_id: room() }));
        assert_eq!(loaded_ids(&store), ["h1", "h2"]);
        assert!(!store.snapshot().has_no_more);

        assert!(store.apply(&StoreCommand::FetchOlderMessages { room_id: room() }));
        assert_eq!(loaded_ids(&store), ["h0", "h1", "h2"]);
        assert!(store.snapshot().has_no_more);
    }

    #[test]
    fn fetch_if_needed_keeps_cached_list() {
        let mut store = store(3);
        store.apply(&StoreCommand::FetchMessages { room_id: room() });

        assert!(!store.apply(&StoreCommand::FetchMessagesIfNeeded { room_id: room() }));
    }

    #[test]
    fn failed_send_can_be_dropped() {
        let mut store = store(0).failing_sends();
        store.apply(&StoreCommand::SendMessage { room_id: room(), text: "hi".into() });

        let rows = store.snapshot().rows.clone().unwrap_or_default();
        let [ListRow::Pending(pending)] = rows.as_slice() else {
            panic!("expected one pending row, got {rows:?}");
        };
        assert!(pending.failed);

        store.apply(&StoreCommand::DeleteFailedMessage {
            row_id: pending.row_id.clone(),
            room_id: room(),
        });
        assert!(store.snapshot().is_known_empty());
    }

    #[test]
    fn resend_persists_failed_row() {
        let mut store = store(0).failing_sends();
        store.apply(&StoreCommand::SendMessage { room_id: room(), text: "hi".into() });
        store.set_fail_sends(false);

        store.apply(&StoreCommand::ResendMessage {
            room_id: room(),
            row_id: RowId::new("local-0"),
            text: "hi".into(),
        });
        assert_eq!(store.loaded_messages().count(), 1);
    }

    #[test]
    fn update_with_empty_text_soft_deletes() {
        let mut store = store(1);
        store.apply(&StoreCommand::FetchMessages { room_id: room() });
        store.apply(&StoreCommand::UpdateMessage {
            room_id: room(),
            message_id: MessageId::new("h0"),
            text: String::new(),
            row_id: None,
        });

        let message = store.snapshot().message(&MessageId::new("h0")).cloned();
        assert!(message.is_some_and(|m| m.is_deleted()));
    }

    #[test]
    fn other_room_commands_are_ignored() {
        let mut store = store(1);
        assert!(!store.apply(&StoreCommand::FetchMessages { room_id: RoomId::new("go") }));
        assert_eq!(store.snapshot().rows, None);
    }

    #[test]
    fn failing_fetch_sets_error_until_cleared() {
        let mut store = store(1).failing_fetches();
        store.apply(&StoreCommand::FetchMessages { room_id: room() });
        assert!(store.snapshot().fetch_error);

        store.apply(&StoreCommand::ClearFetchError);
        assert!(!store.snapshot().fetch_error);
    }
}
