//! Native settings panel
//!
//! A palette button opens a dropdown with language, theme and prompt-mode
//! controls. Prompt-mode changes go to the service through [`crate::sync`]
//! and are reported with toasts.

mod app;
mod panel;
mod runner;
mod theme;
mod toast;

pub use app::SettingsApp;
pub use panel::{PanelActions, render_settings_panel};
pub use runner::{initial_store, run_gui};
