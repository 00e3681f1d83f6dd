//! Core domain types for kgmode

mod entity_types;
mod preferences;
mod prompt_mode;

pub use entity_types::{
    ENGINEERING_ENTITY_TYPES, ENGINEERING_FALLBACK_ENTITY_TYPES, ENGINEERING_PROMPT_NAMES,
    ENGINEERING_RELATIONSHIP_TYPES,
    EntityBadges, GENERAL_ENTITY_TYPES, MAX_VISIBLE_ENTITY_TYPES, visible_entity_types,
};
pub use preferences::{Language, Theme};
pub use prompt_mode::{
    PromptMode, PromptModeRequest, PromptModeResponse, PromptModeState, PromptStatus,
    PromptSourcesStatus, parse_flag,
};
