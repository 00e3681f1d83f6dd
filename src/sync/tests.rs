//! Tests for the prompt-mode sync controller.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::*;
use crate::domain::PromptModeState;

const WAIT: Duration = Duration::from_secs(5);

/// Scripted service. Each call pops the next result; when gated, calls block
/// until the test releases them.
#[derive(Default)]
struct MockService {
    gets: AtomicUsize,
    sets: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
    get_results: Mutex<VecDeque<Result<PromptModeResponse, ServiceError>>>,
    set_results: Mutex<VecDeque<Result<PromptModeResponse, ServiceError>>>,
    gate: Mutex<Option<Receiver<()>>>,
    panic_on_set: bool,
}

impl MockService {
    fn gated() -> (Self, Sender<()>) {
        let (tx, rx) = channel();
        let service = Self {
            gate: Mutex::new(Some(rx)),
            ..Self::default()
        };
        (service, tx)
    }

    fn push_get(&self, result: Result<PromptModeResponse, ServiceError>) {
        self.get_results.lock().unwrap().push_back(result);
    }

    fn push_set(&self, result: Result<PromptModeResponse, ServiceError>) {
        self.set_results.lock().unwrap().push_back(result);
    }

    fn enter(&self) {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);
        if let Some(gate) = self.gate.lock().unwrap().as_ref() {
            let _ = gate.recv_timeout(WAIT);
        }
    }

    fn leave(&self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl PromptModeService for MockService {
    fn get_prompt_mode(&self) -> Result<PromptModeResponse, ServiceError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.enter();
        let result = self
            .get_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ServiceError::Transport("no scripted response".into())));
        self.leave();
        result
    }

    fn set_prompt_mode(
        &self,
        _use_engineering_prompts: bool,
    ) -> Result<PromptModeResponse, ServiceError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.enter();
        if self.panic_on_set {
            self.leave();
            panic!("service worker blew up");
        }
        let result = self
            .set_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ServiceError::Transport("no scripted response".into())));
        self.leave();
        result
    }
}

fn response(engineering: bool, types: &[&str], message: &str) -> PromptModeResponse {
    PromptModeResponse {
        use_engineering_prompts: engineering,
        entity_types: types.iter().map(|s| s.to_string()).collect(),
        message: message.to_string(),
    }
}

fn engineering_store() -> SettingsStore {
    let store = SettingsStore::default();
    store.apply_prompt_mode(&PromptModeState {
        use_engineering_prompts: true,
        entity_types: vec!["Grade".to_string()],
    });
    store
}

#[test]
fn test_open_fetches_once_and_overwrites_mirror() {
    let service = Arc::new(MockService::default());
    service.push_get(Ok(response(true, &["Specification", "Standard"], "")));
    let store = SettingsStore::default();
    store.set_prompt_mode_entity_types(vec!["person".to_string()]);

    let mut sync = PromptModeSync::with_shared(Arc::clone(&service), store.clone());
    sync.fetch_on_open(true);
    // Re-reporting visibility while open does not refetch
    sync.fetch_on_open(true);

    assert!(sync.poll_timeout(WAIT));
    assert_eq!(service.gets.load(Ordering::SeqCst), 1);
    assert!(store.use_engineering_prompts());
    assert_eq!(store.entity_types(), vec!["Specification", "Standard"]);
}

#[test]
fn test_each_reopen_fetches_again() {
    let service = Arc::new(MockService::default());
    service.push_get(Ok(response(false, &["person"], "")));
    service.push_get(Ok(response(true, &["Grade"], "")));
    let store = SettingsStore::default();
    let mut sync = PromptModeSync::with_shared(Arc::clone(&service), store.clone());

    sync.fetch_on_open(true);
    assert!(sync.poll_timeout(WAIT));
    sync.fetch_on_open(false);
    sync.fetch_on_open(true);
    assert!(sync.poll_timeout(WAIT));

    assert_eq!(service.gets.load(Ordering::SeqCst), 2);
    assert_eq!(sync.generation(), 2);
    assert!(store.use_engineering_prompts());
}

#[test]
fn test_fetch_failure_leaves_mirror_and_stays_silent() {
    let service = Arc::new(MockService::default());
    service.push_get(Err(ServiceError::Transport("connection refused".into())));
    let store = engineering_store();
    let before = store.snapshot();

    let mut sync = PromptModeSync::with_shared(Arc::clone(&service), store.clone());
    sync.fetch_on_open(true);
    assert!(sync.poll_timeout(WAIT));

    assert_eq!(store.snapshot(), before);
    assert_eq!(sync.pending_notifications(), 0);
}

#[test]
fn test_update_success_applies_response_and_clears_pending() {
    let service = Arc::new(MockService::default());
    service.push_set(Ok(response(false, &[], "Switched to General Knowledge Graph mode.")));
    let store = engineering_store();

    let mut sync = PromptModeSync::with_shared(Arc::clone(&service), store.clone());
    assert!(sync.set_prompt_mode(false));
    assert!(sync.is_pending());
    assert!(sync.poll_timeout(WAIT));

    assert!(!sync.is_pending());
    assert!(!store.use_engineering_prompts());
    assert!(store.entity_types().is_empty());

    let notes = sync.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].kind, NotificationKind::Success);
    assert_eq!(notes[0].title, "Switched to General Knowledge Graph mode.");
    assert_eq!(notes[0].description, "Switched to General Knowledge Graph mode");
}

#[test]
fn test_mirror_follows_response_and_description_follows_intent() {
    let service = Arc::new(MockService::default());
    // Service refuses to switch and stays in general mode
    service.push_set(Ok(response(false, &["person"], "kept general")));
    let store = SettingsStore::default();

    let mut sync = PromptModeSync::with_shared(Arc::clone(&service), store.clone());
    sync.set_prompt_mode(true);
    assert!(sync.poll_timeout(WAIT));

    assert!(!store.use_engineering_prompts());
    let notes = sync.drain_notifications();
    assert_eq!(notes[0].description, "Switched to Engineering Standards mode");
}

#[test]
fn test_update_failure_keeps_mirror_and_reports_error() {
    let service = Arc::new(MockService::default());
    service.push_set(Err(ServiceError::Status {
        code: 500,
        message: "boom".into(),
    }));
    let store = engineering_store();

    let mut sync = PromptModeSync::with_shared(Arc::clone(&service), store.clone());
    sync.set_prompt_mode(false);
    assert!(sync.poll_timeout(WAIT));

    assert!(!sync.is_pending());
    assert!(store.use_engineering_prompts());
    assert_eq!(store.entity_types(), vec!["Grade"]);

    let notes = sync.drain_notifications();
    assert_eq!(notes.len(), 1);
    assert!(notes[0].is_error());
    assert_eq!(notes[0].title, "Failed to update prompt mode");
    assert_eq!(notes[0].description, "Please try again or restart the server");
}

#[test]
fn test_rapid_toggles_keep_one_request_in_flight() {
    let (service, release) = MockService::gated();
    let service = Arc::new(service);
    for _ in 0..3 {
        service.push_set(Ok(response(true, &["Grade"], "ok")));
    }

    let mut sync = PromptModeSync::with_shared(Arc::clone(&service), SettingsStore::default());
    let mut accepted = 0;
    for round in 0..3 {
        for attempt in 0..5 {
            if sync.set_prompt_mode(attempt % 2 == 0) {
                accepted += 1;
            }
        }
        assert!(sync.is_pending(), "round {round}");
        release.send(()).unwrap();
        assert!(sync.poll_timeout(WAIT));
        assert!(!sync.is_pending());
    }

    assert_eq!(accepted, 3);
    assert_eq!(service.sets.load(Ordering::SeqCst), 3);
    assert_eq!(service.max_active.load(Ordering::SeqCst), 1);
}

#[test]
fn test_worker_panic_still_clears_pending() {
    let service = Arc::new(MockService {
        panic_on_set: true,
        ..MockService::default()
    });
    let store = engineering_store();

    let mut sync = PromptModeSync::with_shared(Arc::clone(&service), store.clone());
    sync.set_prompt_mode(false);
    assert!(sync.poll_timeout(WAIT));

    assert!(!sync.is_pending());
    assert!(store.use_engineering_prompts());
    assert!(sync.drain_notifications()[0].is_error());
}

#[test]
fn test_fetch_from_previous_open_is_discarded() {
    // Real workers stay parked on the gate; results are injected directly.
    let (service, _release) = MockService::gated();
    let store = SettingsStore::default();
    let mut sync = PromptModeSync::new(service, store.clone());

    sync.fetch_on_open(true);
    sync.fetch_on_open(false);
    sync.fetch_on_open(true);
    assert_eq!(sync.generation(), 2);

    sync.handle_event(SyncEvent {
        ticket: Ticket::Fetch {
            generation: 1,
            seq: 1,
        },
        result: Ok(response(true, &["Grade"], "")),
    });
    assert_eq!(store.revision(), 0);

    sync.handle_event(SyncEvent {
        ticket: Ticket::Fetch {
            generation: 2,
            seq: 2,
        },
        result: Ok(response(false, &["person", "event"], "")),
    });
    assert_eq!(store.entity_types(), vec!["person", "event"]);
}

#[test]
fn test_stale_fetch_does_not_override_newer_update() {
    let (service, _release) = MockService::gated();
    let store = SettingsStore::default();
    let mut sync = PromptModeSync::new(service, store.clone());

    sync.fetch_on_open(true);
    assert!(sync.set_prompt_mode(true));

    // The update (seq 2) lands before the fetch that was issued first (seq 1)
    sync.handle_event(SyncEvent {
        ticket: Ticket::Update {
            seq: 2,
            requested: true,
        },
        result: Ok(response(true, &["Grade"], "switched")),
    });
    assert!(!sync.is_pending());

    sync.handle_event(SyncEvent {
        ticket: Ticket::Fetch {
            generation: 1,
            seq: 1,
        },
        result: Ok(response(false, &["person"], "")),
    });

    assert!(store.use_engineering_prompts());
    assert_eq!(store.entity_types(), vec!["Grade"]);
}

#[test]
fn test_fetch_during_update_does_not_hide_update_result() {
    let (service, _release) = MockService::gated();
    let store = SettingsStore::default();
    let mut sync = PromptModeSync::new(service, store.clone());

    // Toggle first, then open the panel while the update is in flight
    assert!(sync.set_prompt_mode(true));
    sync.fetch_on_open(true);

    // The fetch was served before the update and lands first
    sync.handle_event(SyncEvent {
        ticket: Ticket::Fetch {
            generation: 1,
            seq: 2,
        },
        result: Ok(response(false, &["person"], "")),
    });
    assert_eq!(store.revision(), 0);

    sync.handle_event(SyncEvent {
        ticket: Ticket::Update {
            seq: 1,
            requested: true,
        },
        result: Ok(response(true, &["Grade"], "Switched")),
    });

    assert!(!sync.is_pending());
    assert!(store.use_engineering_prompts());
    assert_eq!(store.entity_types(), vec!["Grade"]);
    assert_eq!(sync.drain_notifications()[0].title, "Switched");
}

#[test]
fn test_fetch_after_settled_update_applies() {
    let (service, _release) = MockService::gated();
    let store = SettingsStore::default();
    let mut sync = PromptModeSync::new(service, store.clone());

    assert!(sync.set_prompt_mode(true));
    sync.handle_event(SyncEvent {
        ticket: Ticket::Update {
            seq: 1,
            requested: true,
        },
        result: Ok(response(true, &["Grade"], "Switched")),
    });

    sync.fetch_on_open(true);
    sync.handle_event(SyncEvent {
        ticket: Ticket::Fetch {
            generation: 1,
            seq: 2,
        },
        result: Ok(response(true, &["Grade", "Standard"], "")),
    });

    assert_eq!(store.entity_types(), vec!["Grade", "Standard"]);
}

#[test]
fn test_update_result_after_close_still_applies() {
    let (service, _release) = MockService::gated();
    let store = SettingsStore::default();
    let mut sync = PromptModeSync::new(service, store.clone());

    sync.fetch_on_open(true);
    assert!(sync.set_prompt_mode(true));
    sync.fetch_on_open(false);

    sync.handle_event(SyncEvent {
        ticket: Ticket::Update {
            seq: 2,
            requested: true,
        },
        result: Ok(response(true, &["Standard"], "switched")),
    });

    assert!(!sync.is_visible());
    assert!(store.use_engineering_prompts());
    assert_eq!(sync.drain_notifications().len(), 1);
}
