//! Integration tests for the client coordination loop.
//!
//! Runs the real service and the background API worker together and
//! drives [`App`] through key events, verifying the
//! reload-after-mutation cycle, owner switching, and bulk deletes.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;
use tokio::time::timeout;

use taskdeck::api::ApiClient;
use taskdeck::app::App;
use taskdeck::net::{self, ApiCommand, ApiEvent};
use taskdeck::session::OwnerSession;
use taskdeck::state::Theme;
use taskdeck_proto::api::CreateTaskRequest;
use taskdeck_proto::task::{Category, Priority};
use taskdeck_server::server::{AppState, start_server_with_state};

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

struct Harness {
    app: App,
    commands: mpsc::Sender<ApiCommand>,
    events: mpsc::Receiver<ApiEvent>,
    client: ApiClient,
}

/// Starts the service and the API worker and builds an app signed in
/// as `owner`.
async fn start_harness(owner: &str) -> Harness {
    let state = Arc::new(AppState::new());
    let (addr, _handle) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("start test service");

    let client = ApiClient::new(format!("http://{addr}"));
    let (commands, events, _worker) = net::spawn_api_worker(client.clone());

    Harness {
        app: App::new(OwnerSession::signed_in(owner, owner), Theme::Light),
        commands,
        events,
        client,
    }
}

impl Harness {
    /// Sends a command and applies events until the next `Loaded`
    /// arrives, returning how many events were applied.
    async fn run_command(&mut self, command: ApiCommand) {
        self.commands.send(command).await.expect("send command");
        loop {
            let event = timeout(Duration::from_secs(5), self.events.recv())
                .await
                .expect("event before timeout")
                .expect("worker alive");
            let was_load = matches!(event, ApiEvent::Loaded { .. });
            self.app.apply_event(event, Instant::now());
            if was_load {
                break;
            }
        }
    }

    /// Feeds one key press to the app and forwards any command it
    /// produces, waiting for the resulting reload.
    async fn press(&mut self, code: KeyCode) {
        let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let key = KeyEvent::new(code, KeyModifiers::NONE);
        if let Some(command) = self.app.handle_key(key, Instant::now(), today) {
            self.run_command(command).await;
        }
    }

    fn create_request(&self, title: &str) -> ApiCommand {
        ApiCommand::Create {
            request: CreateTaskRequest {
                title: title.to_string(),
                owner_id: self.app.session.owner_id().to_string(),
                due_date: None,
                priority: Priority::default(),
                category: Category::default(),
            },
        }
    }
}

// ===========================================================================
// Reload-after-mutation cycle
// ===========================================================================

#[tokio::test]
async fn every_mutation_refreshes_the_cache() {
    let mut h = start_harness("cycle-owner").await;

    // Create: the worker reloads and the cache picks up the task.
    let create = h.create_request("walk the dog");
    h.run_command(create).await;
    assert_eq!(h.app.cache.len(), 1);
    assert_eq!(h.app.cache.tasks()[0].title, "walk the dog");

    // Toggle completion via the space key: update then reload.
    h.press(KeyCode::Char(' ')).await;
    assert!(h.app.cache.tasks()[0].completed);
    assert_eq!(h.app.cache.progress_percent(), 100);

    // Delete via d + confirm: delete then reload leaves it empty.
    h.press(KeyCode::Char('d')).await;
    h.press(KeyCode::Char('y')).await;
    assert!(h.app.cache.is_empty());
}

#[tokio::test]
async fn reorder_is_applied_locally_then_persisted() {
    let mut h = start_harness("reorder-owner").await;
    for title in ["a", "b", "c"] {
        let create = h.create_request(title);
        h.run_command(create).await;
    }

    // Shift-J moves the cursor task down; the local splice happens
    // before the service confirms, then the reload agrees with it.
    h.press(KeyCode::Char('J')).await;
    let titles: Vec<_> = h.app.cache.tasks().iter().map(|t| t.title.clone()).collect();
    assert_eq!(titles, vec!["b", "a", "c"]);

    let stored = h
        .client
        .list(h.app.session.owner_id())
        .await
        .expect("list");
    let stored_titles: Vec<_> = stored.iter().map(|t| t.title.clone()).collect();
    assert_eq!(stored_titles, vec!["b", "a", "c"]);
}

// ===========================================================================
// Owner switching
// ===========================================================================

#[tokio::test]
async fn switching_to_guest_clears_and_reloads() {
    let mut h = start_harness("switch-owner").await;
    let create = h.create_request("private task");
    h.run_command(create).await;
    assert_eq!(h.app.cache.len(), 1);

    // The cache is emptied synchronously on the switch, and the guest
    // reload finds nothing.
    h.press(KeyCode::Char('g')).await;
    assert!(h.app.session.owner_id().starts_with("guest-"));
    assert!(h.app.cache.is_empty());
}

#[tokio::test]
async fn stale_load_for_a_previous_owner_is_dropped() {
    let mut h = start_harness("stale-owner").await;
    let create = h.create_request("old task");
    h.run_command(create).await;

    // Request a load for the old owner, switch before it is applied,
    // then apply both events: the stale one must not repopulate the
    // guest's empty cache.
    h.commands
        .send(ApiCommand::Load {
            owner_id: "stale-owner".to_string(),
        })
        .await
        .expect("send load");

    h.press(KeyCode::Char('g')).await;

    let stale = timeout(Duration::from_secs(5), h.events.recv())
        .await
        .expect("event before timeout")
        .expect("worker alive");
    h.app.apply_event(stale, Instant::now());

    assert!(h.app.cache.is_empty());
}

// ===========================================================================
// Bulk deletes
// ===========================================================================

#[tokio::test]
async fn bulk_delete_completed_removes_only_completed() {
    let mut h = start_harness("bulk-owner").await;
    for title in ["done-1", "open", "done-2"] {
        let create = h.create_request(title);
        h.run_command(create).await;
    }

    // Complete the first and third tasks.
    h.press(KeyCode::Char(' ')).await;
    h.press(KeyCode::Char('j')).await;
    h.press(KeyCode::Char('j')).await;
    h.press(KeyCode::Char(' ')).await;
    assert_eq!(h.app.cache.completed_count(), 2);

    // c opens the bulk confirmation, y fires the independent deletes.
    h.press(KeyCode::Char('c')).await;
    h.press(KeyCode::Char('y')).await;

    let titles: Vec<_> = h.app.cache.tasks().iter().map(|t| t.title.clone()).collect();
    assert_eq!(titles, vec!["open"]);
}

#[tokio::test]
async fn bulk_delete_with_no_candidates_shows_a_notice() {
    let mut h = start_harness("empty-bulk-owner").await;
    let create = h.create_request("still open");
    h.run_command(create).await;

    // No completed tasks: no confirmation opens and nothing is sent.
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
    let command = h.app.handle_key(key, Instant::now(), today);

    assert!(command.is_none());
    assert!(h.app.ui.notice.is_some());
    assert_eq!(h.app.cache.len(), 1);
}
