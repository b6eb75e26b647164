//! Runtime tests under paused tokio time.
//!
//! Each test scripts a host with [`SimDriver`] and runs the real
//! [`Runtime`] until the script is exhausted. Standard invariants are
//! checked on every render.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - Which store commands were dispatched, and in what order
//! - Which UI effects the host was asked to perform
//! - The session state the screen was left in

use std::time::Duration;

use chrono::{DateTime, Utc};
use roomscreen_app::{
    MenuItem, Message, MessageId, MessageRef, Notice, ReadBatch, RoomId, Runtime, ScreenConfig,
    ScreenEvent, SessionController, StoreCommand, UiEffect,
};
use roomscreen_harness::{InvariantRegistry, SimClock, SimDriver, SimStore, row_for};

const QUIET: Duration = Duration::from_millis(250);

fn t0() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default()
}

fn message(id: &str, from_user: &str, sent_at: DateTime<Utc>) -> Message {
    Message {
        id: MessageId::new(id),
        text: format!("text of {id}"),
        sent_at,
        edited_at: None,
        from_user: from_user.into(),
    }
}

/// Store with three messages from alice and one from the signed-in user,
/// all sent at `t0`.
fn store(clock: &SimClock) -> SimStore {
    SimStore::new("rust", clock.clone()).with_current_user("me").with_history([
        message("h0", "alice", t0()),
        message("h1", "alice", t0()),
        message("h2", "alice", t0()),
        message("mine", "me", t0()),
    ])
}

fn runtime(driver: SimDriver, clock: SimClock) -> Runtime<SimDriver, SimClock> {
    let session = SessionController::new(RoomId::new("rust"), ScreenConfig::default(), clock);
    Runtime::new(driver.with_invariants(InvariantRegistry::standard()), session)
}

fn seen(ids: &[&str]) -> ReadBatch {
    ids.iter()
        .map(|id| {
            let id = MessageId::new(*id);
            (row_for(&id), id)
        })
        .collect()
}

fn read_batches(driver: &SimDriver) -> Vec<&ReadBatch> {
    driver
        .dispatched()
        .iter()
        .filter_map(|command| match command {
            StoreCommand::ReadMessages { batch, .. } => Some(batch),
            _ => None,
        })
        .collect()
}

fn tap(id: &str) -> ScreenEvent {
    let message_id = MessageId::new(id);
    ScreenEvent::MessageTapped(MessageRef::Persisted { row_id: row_for(&message_id), message_id })
}

#[tokio::test(start_paused = true)]
async fn mount_runs_start_batch_after_interactions_settle() {
    let clock = SimClock::at(t0());
    let driver = SimDriver::new(store(&clock)).with_settle_delay(Duration::from_millis(300));
    let mut runtime = runtime(driver, clock);

    runtime.run().await.unwrap();

    let names: Vec<_> = runtime.driver().dispatched().iter().map(StoreCommand::name).collect();
    assert_eq!(names, [
        "set_room_info_drawer",
        "clear_fetch_error",
        "select_room",
        "fetch_room",
        "fetch_notification_settings",
        "fetch_messages",
    ]);
    assert!(runtime.driver().is_stopped());
    assert_eq!(runtime.session().snapshot().rows.as_ref().map(Vec::len), Some(4));
    assert!(runtime.session().shows_bottom_bar());
}

#[tokio::test(start_paused = true)]
async fn mount_over_cached_room_skips_loaded_state() {
    let clock = SimClock::at(t0());
    let mut store = store(&clock);
    let room_id = RoomId::new("rust");
    for command in [
        StoreCommand::SelectRoom { room_id: room_id.clone() },
        StoreCommand::FetchRoom { room_id: room_id.clone() },
        StoreCommand::FetchMessages { room_id },
    ] {
        store.apply(&command);
    }
    let mut runtime = runtime(SimDriver::new(store), clock);

    runtime.run().await.unwrap();

    let names: Vec<_> = runtime.driver().dispatched().iter().map(StoreCommand::name).collect();
    assert_eq!(names, [
        "set_room_info_drawer",
        "clear_fetch_error",
        "fetch_notification_settings",
        "fetch_messages_if_needed",
    ]);
    assert_eq!(runtime.session().snapshot().rows.as_ref().map(Vec::len), Some(4));
}

#[tokio::test(start_paused = true)]
async fn visible_rows_flush_once_after_quiet_period() {
    let clock = SimClock::at(t0());
    let driver = SimDriver::new(store(&clock))
        .then(ScreenEvent::VisibleRowsChanged(seen(&["h0"])))
        .idle(QUIET / 2)
        .then(ScreenEvent::VisibleRowsChanged(seen(&["h1"])))
        .idle(QUIET / 2)
        .then(ScreenEvent::VisibleRowsChanged(seen(&["h2"])))
        .idle(Duration::from_secs(1));
    let mut runtime = runtime(driver, clock);

    runtime.run().await.unwrap();

    let batches = read_batches(runtime.driver());
    assert_eq!(batches, [&seen(&["h0", "h1", "h2"])]);
    assert_eq!(runtime.driver().store().read_messages().len(), 3);
    assert!(runtime.session().read_batch().is_empty());
    assert_eq!(runtime.session().pending_read_flush(), None);
}

#[tokio::test(start_paused = true)]
async fn separate_bursts_flush_separately() {
    let clock = SimClock::at(t0());
    let driver = SimDriver::new(store(&clock))
        .then(ScreenEvent::VisibleRowsChanged(seen(&["h0"])))
        .idle(QUIET * 2)
        .then(ScreenEvent::VisibleRowsChanged(seen(&["h1", "h2"])))
        .idle(QUIET * 2);
    let mut runtime = runtime(driver, clock);

    runtime.run().await.unwrap();

    assert_eq!(read_batches(runtime.driver()), [&seen(&["h0"]), &seen(&["h1", "h2"])]);
}

#[tokio::test(start_paused = true)]
async fn unmount_drops_pending_flush() {
    let clock = SimClock::at(t0());
    let driver =
        SimDriver::new(store(&clock)).then(ScreenEvent::VisibleRowsChanged(seen(&["h0", "h1"])));
    let mut runtime = runtime(driver, clock);

    runtime.run().await.unwrap();

    assert!(read_batches(runtime.driver()).is_empty());
    assert_eq!(runtime.session().pending_read_flush(), None);
    assert!(runtime.driver().store().read_messages().is_empty());
}

#[tokio::test(start_paused = true)]
async fn edit_committed_inside_window_updates_message() {
    let clock = SimClock::at(t0());
    let driver = SimDriver::new(store(&clock))
        .advance_clock(Duration::from_secs(4 * 60))
        .then(tap("mine"))
        .then(ScreenEvent::MenuItemSelected(MenuItem::Edit))
        .then(ScreenEvent::ComposerTextChanged("fixed".into()))
        .then(ScreenEvent::SendPressed);
    let mut runtime = runtime(driver, clock);

    runtime.run().await.unwrap();

    let mine = MessageId::new("mine");
    assert!(runtime.driver().dispatched().contains(&StoreCommand::UpdateMessage {
        room_id: RoomId::new("rust"),
        message_id: mine.clone(),
        text: "fixed".into(),
        row_id: Some(row_for(&mine)),
    }));
    let stored = runtime.session().snapshot().message(&mine).cloned();
    assert_eq!(stored.map(|m| (m.text, m.edited_at.is_some())), Some(("fixed".into(), true)));
    assert!(!runtime.session().is_editing());
}

#[tokio::test(start_paused = true)]
async fn edit_window_lapsing_while_typing_rejects_commit() {
    let clock = SimClock::at(t0());
    let driver = SimDriver::new(store(&clock))
        .advance_clock(Duration::from_secs(4 * 60 + 59))
        .then(tap("mine"))
        .then(ScreenEvent::MenuItemSelected(MenuItem::Edit))
        .then(ScreenEvent::ComposerTextChanged("too late".into()))
        .advance_clock(Duration::from_secs(2))
        .then(ScreenEvent::SendPressed);
    let mut runtime = runtime(driver, clock);

    runtime.run().await.unwrap();

    let driver = runtime.driver();
    assert!(
        !driver.dispatched().iter().any(|c| matches!(c, StoreCommand::UpdateMessage { .. })),
        "expired edit must not reach the store"
    );
    let effects = driver.effects();
    assert!(effects.contains(&UiEffect::FocusComposer));
    assert!(effects.ends_with(&[UiEffect::BlurComposer, UiEffect::Notice(Notice::CannotEdit)]));
    assert!(!runtime.session().is_editing());
    assert_eq!(runtime.session().draft_text(), "");
}

#[tokio::test(start_paused = true)]
async fn failed_send_is_dropped_from_menu() {
    let clock = SimClock::at(t0());
    let driver = SimDriver::new(store(&clock).failing_sends())
        .then(ScreenEvent::ComposerTextChanged("hello".into()))
        .then(ScreenEvent::SendPressed)
        .advance_clock(Duration::from_secs(3600))
        .then(ScreenEvent::MessageTapped(MessageRef::Failed {
            row_id: "local-0".into(),
            text: "hello".into(),
        }))
        .then(ScreenEvent::MenuItemSelected(MenuItem::Delete));
    let mut runtime = runtime(driver, clock);

    runtime.run().await.unwrap();

    assert!(runtime.driver().dispatched().contains(&StoreCommand::DeleteFailedMessage {
        row_id: "local-0".into(),
        room_id: RoomId::new("rust"),
    }));
    let rows = runtime.session().snapshot().rows.as_ref().map(Vec::len);
    assert_eq!(rows, Some(4));
}

#[tokio::test(start_paused = true)]
async fn scroll_to_end_pages_until_exhausted() {
    let clock = SimClock::at(t0());
    let store = store(&clock).with_page_size(2);
    let driver = SimDriver::new(store)
        .then(ScreenEvent::ScrollReachedEnd)
        .then(ScreenEvent::ScrollReachedEnd);
    let mut runtime = runtime(driver, clock);

    runtime.run().await.unwrap();

    let older = runtime
        .driver()
        .dispatched()
        .iter()
        .filter(|c| matches!(c, StoreCommand::FetchOlderMessages { .. }))
        .count();
    assert_eq!(older, 1);
    assert!(runtime.session().pagination_flags().has_no_more);
    assert_eq!(runtime.session().pagination_flags().list_len, 4);
}
