//! Prompt-mode synchronization between the settings panel and the service.
//!
//! [`PromptModeSync`] lives on the UI thread. Network calls run on short-lived
//! worker threads that report back over a channel; the UI calls [`PromptModeSync::poll`]
//! every frame and all store writes happen there.
//!
//! Every request is tagged with a sequence number, fetches additionally with the
//! panel generation (bumped on each open). A successful update is always
//! applied. A fetch is dropped when:
//! - its generation is not the current one, or
//! - an update was in flight at any point while it was outstanding.

mod notification;

#[cfg(test)]
mod tests;

pub use notification::{Notification, NotificationKind};

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::{PromptModeService, ServiceError};
use crate::domain::PromptModeResponse;
use crate::store::SettingsStore;

/// What a worker was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ticket {
    Fetch { generation: u64, seq: u64 },
    Update { seq: u64, requested: bool },
}

impl Ticket {
    fn seq(&self) -> u64 {
        match self {
            Ticket::Fetch { seq, .. } | Ticket::Update { seq, .. } => *seq,
        }
    }
}

#[derive(Debug)]
struct SyncEvent {
    ticket: Ticket,
    result: Result<PromptModeResponse, ServiceError>,
}

/// Reports a worker's outcome exactly once.
/// Dropping it unsent (worker panic, failed spawn) reports [`ServiceError::Aborted`].
struct Reply {
    tx: Sender<SyncEvent>,
    ticket: Ticket,
    sent: bool,
}

impl Reply {
    fn new(tx: Sender<SyncEvent>, ticket: Ticket) -> Self {
        Self {
            tx,
            ticket,
            sent: false,
        }
    }

    fn send(mut self, result: Result<PromptModeResponse, ServiceError>) {
        self.sent = true;
        let _ = self.tx.send(SyncEvent {
            ticket: self.ticket,
            result,
        });
    }
}

impl Drop for Reply {
    fn drop(&mut self) {
        if !self.sent {
            let _ = self.tx.send(SyncEvent {
                ticket: self.ticket,
                result: Err(ServiceError::Aborted),
            });
        }
    }
}

/// Client-side controller for the prompt-mode toggle
pub struct PromptModeSync<S: PromptModeService + 'static> {
    service: Arc<S>,
    store: SettingsStore,
    tx: Sender<SyncEvent>,
    rx: Receiver<SyncEvent>,
    visible: bool,
    generation: u64,
    next_seq: u64,
    /// Last sequence allocated when the latest successful update landed.
    /// Fetches at or below it may predate that update on the server.
    update_settled_seq: u64,
    /// Sequence of the in-flight update, if any
    pending: Option<u64>,
    notifications: VecDeque<Notification>,
}

impl<S: PromptModeService + 'static> PromptModeSync<S> {
    pub fn new(service: S, store: SettingsStore) -> Self {
        Self::with_shared(Arc::new(service), store)
    }

    pub fn with_shared(service: Arc<S>, store: SettingsStore) -> Self {
        let (tx, rx) = channel();
        Self {
            service,
            store,
            tx,
            rx,
            visible: false,
            generation: 0,
            next_seq: 0,
            update_settled_seq: 0,
            pending: None,
            notifications: VecDeque::new(),
        }
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// True while an update is in flight; the toggle must be disabled
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Current panel generation (number of times the panel was opened)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Report panel visibility. Each transition to visible issues one fetch.
    pub fn fetch_on_open(&mut self, visible: bool) {
        let opening = visible && !self.visible;
        self.visible = visible;
        if !opening {
            return;
        }

        self.generation += 1;
        let seq = self.allocate_seq();
        debug!(
            "[kgmode:sync] Panel opened (generation {}), fetching prompt mode",
            self.generation
        );
        self.spawn(Ticket::Fetch {
            generation: self.generation,
            seq,
        });
    }

    /// Ask the service to switch modes.
    ///
    /// Returns false without sending anything while another update is pending.
    pub fn set_prompt_mode(&mut self, requested: bool) -> bool {
        if let Some(seq) = self.pending {
            debug!(
                "[kgmode:sync] Ignoring toggle to {}: request #{} still pending",
                requested, seq
            );
            return false;
        }

        let seq = self.allocate_seq();
        self.pending = Some(seq);
        info!(
            "[kgmode:sync] Requesting prompt mode change: use_engineering_prompts={}",
            requested
        );
        self.spawn(Ticket::Update { seq, requested });
        true
    }

    /// Apply all finished requests without blocking. Returns how many were processed.
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
            processed += 1;
        }
        processed
    }

    /// Wait up to `timeout` for at least one finished request, then drain the rest.
    /// Returns false if nothing finished in time.
    pub fn poll_timeout(&mut self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(event) => {
                self.handle_event(event);
                self.poll();
                true
            }
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Take all queued notifications, oldest first
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    pub fn pending_notifications(&self) -> usize {
        self.notifications.len()
    }

    fn allocate_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn spawn(&self, ticket: Ticket) {
        let service = Arc::clone(&self.service);
        let reply = Reply::new(self.tx.clone(), ticket);

        let spawned = thread::Builder::new()
            .name(format!("kgmode-sync-{}", ticket.seq()))
            .spawn(move || {
                let result = match ticket {
                    Ticket::Fetch { .. } => service.get_prompt_mode(),
                    Ticket::Update { requested, .. } => service.set_prompt_mode(requested),
                };
                reply.send(result);
            });

        if let Err(e) = spawned {
            warn!("[kgmode:sync] Failed to spawn request worker: {}", e);
        }
    }

    fn handle_event(&mut self, event: SyncEvent) {
        match event.ticket {
            Ticket::Fetch { generation, seq } => self.on_fetched(generation, seq, event.result),
            Ticket::Update { seq, requested } => self.on_updated(seq, requested, event.result),
        }
    }

    fn on_fetched(
        &mut self,
        generation: u64,
        seq: u64,
        result: Result<PromptModeResponse, ServiceError>,
    ) {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                warn!("[kgmode:sync] Failed to load prompt mode: {}", e);
                return;
            }
        };

        if generation != self.generation {
            debug!(
                "[kgmode:sync] Discarding fetch from generation {} (current {})",
                generation, self.generation
            );
            return;
        }
        if self.pending.is_some() || seq <= self.update_settled_seq {
            debug!(
                "[kgmode:sync] Discarding fetch #{}: overlapped a prompt mode update",
                seq
            );
            return;
        }
        self.store.apply_prompt_mode(&response.state());
    }

    fn on_updated(
        &mut self,
        seq: u64,
        requested: bool,
        result: Result<PromptModeResponse, ServiceError>,
    ) {
        if self.pending == Some(seq) {
            self.pending = None;
        }

        match result {
            Ok(response) => {
                if response.use_engineering_prompts != requested {
                    warn!(
                        "[kgmode:sync] Requested use_engineering_prompts={} but service reports {}",
                        requested, response.use_engineering_prompts
                    );
                }
                self.update_settled_seq = self.next_seq;
                self.store.apply_prompt_mode(&response.state());
                self.notifications
                    .push_back(Notification::mode_switched(&response.message, requested));
            }
            Err(e) => {
                warn!("[kgmode:sync] Failed to set prompt mode: {}", e);
                self.notifications
                    .push_back(Notification::mode_switch_failed());
            }
        }
    }
}
