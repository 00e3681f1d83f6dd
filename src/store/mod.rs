//! Settings store shared by the panel, the sync controller and the CLI
//!
//! The store is the single owner of display state (language, theme and the
//! prompt-mode mirror). Reads and writes go through explicit methods; every
//! write that changes a value bumps the revision and notifies subscribers.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::{Language, PromptModeState, Theme};

/// Everything the settings panel displays
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsSnapshot {
    pub language: Language,
    pub theme: Theme,
    pub use_engineering_prompts: bool,
    pub prompt_mode_entity_types: Vec<String>,
}

impl SettingsSnapshot {
    pub fn prompt_mode(&self) -> PromptModeState {
        PromptModeState {
            use_engineering_prompts: self.use_engineering_prompts,
            entity_types: self.prompt_mode_entity_types.clone(),
        }
    }
}

/// Which part of the store a write touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreField {
    Language,
    Theme,
    UseEngineeringPrompts,
    EntityTypes,
    PromptMode,
}

/// Change notification delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    pub revision: u64,
    pub field: StoreField,
}

#[derive(Debug, Default)]
struct StoreInner {
    snapshot: SettingsSnapshot,
    revision: u64,
}

/// Cloneable handle to the process-wide settings state
#[derive(Clone, Default)]
pub struct SettingsStore {
    inner: Arc<RwLock<StoreInner>>,
    subscribers: Arc<Mutex<Vec<Sender<StoreChange>>>>,
}

impl std::fmt::Debug for SettingsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsStore")
            .field("revision", &self.revision())
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

impl SettingsStore {
    pub fn new(initial: SettingsSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner {
                snapshot: initial,
                revision: 0,
            })),
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    // Poisoning is ignored: the snapshot is plain data.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    pub fn snapshot(&self) -> SettingsSnapshot {
        self.read().snapshot.clone()
    }

    /// Number of effective writes since creation
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    pub fn language(&self) -> Language {
        self.read().snapshot.language
    }

    pub fn theme(&self) -> Theme {
        self.read().snapshot.theme
    }

    pub fn use_engineering_prompts(&self) -> bool {
        self.read().snapshot.use_engineering_prompts
    }

    pub fn entity_types(&self) -> Vec<String> {
        self.read().snapshot.prompt_mode_entity_types.clone()
    }

    pub fn set_language(&self, language: Language) -> bool {
        self.update(StoreField::Language, |s| {
            std::mem::replace(&mut s.language, language) != language
        })
    }

    pub fn set_theme(&self, theme: Theme) -> bool {
        self.update(StoreField::Theme, |s| {
            std::mem::replace(&mut s.theme, theme) != theme
        })
    }

    pub fn set_use_engineering_prompts(&self, value: bool) -> bool {
        self.update(StoreField::UseEngineeringPrompts, |s| {
            std::mem::replace(&mut s.use_engineering_prompts, value) != value
        })
    }

    pub fn set_prompt_mode_entity_types(&self, types: Vec<String>) -> bool {
        self.update(StoreField::EntityTypes, |s| {
            if s.prompt_mode_entity_types == types {
                return false;
            }
            s.prompt_mode_entity_types = types;
            true
        })
    }

    /// Overwrite both prompt-mode fields in a single revision
    pub fn apply_prompt_mode(&self, state: &PromptModeState) -> bool {
        self.update(StoreField::PromptMode, |s| {
            if s.use_engineering_prompts == state.use_engineering_prompts
                && s.prompt_mode_entity_types == state.entity_types
            {
                return false;
            }
            s.use_engineering_prompts = state.use_engineering_prompts;
            s.prompt_mode_entity_types = state.entity_types.clone();
            true
        })
    }

    /// Receive a [`StoreChange`] for every effective write from now on
    pub fn subscribe(&self) -> Receiver<StoreChange> {
        let (tx, rx) = channel();
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }

    fn update(&self, field: StoreField, apply: impl FnOnce(&mut SettingsSnapshot) -> bool) -> bool {
        let revision = {
            let mut inner = self.write();
            if !apply(&mut inner.snapshot) {
                return false;
            }
            inner.revision += 1;
            inner.revision
        };

        let change = StoreChange { revision, field };
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.retain(|tx| tx.send(change).is_ok());
        }
        true
    }
}
