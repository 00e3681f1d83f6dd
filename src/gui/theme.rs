//! Color constants for the settings panel

use eframe::egui::Color32;

/// Toast background
pub const BG_SECONDARY: Color32 = Color32::from_rgb(24, 28, 34);

/// Secondary text inside toasts
pub const TEXT_DIM: Color32 = Color32::from_rgb(170, 170, 170);

pub const ACCENT_GREEN: Color32 = Color32::from_rgb(80, 255, 120);
pub const ACCENT_RED: Color32 = Color32::from_rgb(255, 80, 80);
pub const ACCENT_CYAN: Color32 = Color32::from_rgb(0, 200, 170);
