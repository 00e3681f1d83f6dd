//! Settings dropdown rendering
//!
//! Draws language, theme and prompt-mode controls from a store snapshot and
//! reports what the user changed. The caller applies the changes.

use eframe::egui::{self, RichText};

use crate::domain::{
    Language, MAX_VISIBLE_ENTITY_TYPES, PromptMode, Theme, visible_entity_types,
};
use crate::store::SettingsSnapshot;

/// User input collected during one frame
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PanelActions {
    pub language: Option<Language>,
    pub theme: Option<Theme>,
    /// Requested value of the prompt-mode toggle
    pub prompt_mode: Option<bool>,
}

/// Render the dropdown contents
pub fn render_settings_panel(
    ui: &mut egui::Ui,
    snapshot: &SettingsSnapshot,
    pending: bool,
) -> PanelActions {
    let mut actions = PanelActions::default();

    ui.vertical(|ui| {
        ui.spacing_mut().item_spacing.y = 6.0;

        ui.label(RichText::new("Language").strong());
        let mut language = snapshot.language;
        egui::ComboBox::from_id_salt("settings_language")
            .selected_text(language.native_name())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for option in Language::ALL {
                    ui.selectable_value(&mut language, option, option.native_name());
                }
            });
        if language != snapshot.language {
            actions.language = Some(language);
        }

        ui.add_space(8.0);
        ui.label(RichText::new("Theme").strong());
        let mut theme = snapshot.theme;
        egui::ComboBox::from_id_salt("settings_theme")
            .selected_text(theme.label())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for option in Theme::ALL {
                    ui.selectable_value(&mut theme, option, option.label());
                }
            });
        if theme != snapshot.theme {
            actions.theme = Some(theme);
        }

        ui.add_space(8.0);
        ui.separator();
        actions.prompt_mode = render_prompt_mode(ui, snapshot, pending);
        render_entity_types(ui, &snapshot.prompt_mode_entity_types);
    });

    actions
}

fn render_prompt_mode(ui: &mut egui::Ui, snapshot: &SettingsSnapshot, pending: bool) -> Option<bool> {
    // Bound to the mirror: a failed update leaves the box where it was.
    let mut checked = snapshot.use_engineering_prompts;
    let mode = PromptMode::from_flag(checked);

    let changed = ui
        .horizontal(|ui| {
            ui.label(RichText::new("🧪").size(16.0));
            ui.vertical(|ui| {
                ui.label(RichText::new("Prompt Mode").strong());
                ui.label(RichText::new(mode.label()).small().weak());
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if pending {
                    ui.spinner();
                }
                ui.add_enabled(!pending, egui::Checkbox::without_text(&mut checked))
                    .on_disabled_hover_text("Updating prompt mode…")
                    .changed()
            })
            .inner
        })
        .inner;

    changed.then_some(checked)
}

fn render_entity_types(ui: &mut egui::Ui, types: &[String]) {
    if types.is_empty() {
        return;
    }

    ui.add_space(4.0);
    ui.label(RichText::new("Entity Types:").small().weak());

    let badges = visible_entity_types(types, MAX_VISIBLE_ENTITY_TYPES);
    egui::ScrollArea::vertical()
        .max_height(80.0)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(4.0, 4.0);
                for entity_type in badges.shown {
                    badge(ui, entity_type, false);
                }
                if let Some(label) = badges.overflow_label() {
                    badge(ui, &label, true);
                }
            });
        });
}

fn badge(ui: &mut egui::Ui, text: &str, outline: bool) {
    let visuals = ui.visuals();
    let frame = if outline {
        egui::Frame::NONE.stroke(egui::Stroke::new(1.0, visuals.weak_text_color()))
    } else {
        egui::Frame::NONE.fill(visuals.faint_bg_color)
    };
    frame
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.label(RichText::new(text).small());
        });
}
