//! Settings window: top bar with the palette button and the dropdown panel

use std::time::Duration;

use eframe::egui::{self, Align2, Id, RichText, ThemePreference, Vec2};
use tracing::{debug, info};

use super::panel::{PanelActions, render_settings_panel};
use super::theme::ACCENT_CYAN;
use super::toast::ToastQueue;
use crate::client::HttpPromptModeClient;
use crate::domain::{PromptMode, Theme};
use crate::store::SettingsStore;
use crate::sync::PromptModeSync;

/// Repaint interval while requests may be in flight
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct SettingsApp {
    sync: PromptModeSync<HttpPromptModeClient>,
    store: SettingsStore,
    /// Whether the dropdown is open
    opened: bool,
    toasts: ToastQueue,
    applied_theme: Option<Theme>,
    server_url: String,
}

impl SettingsApp {
    pub fn new(client: HttpPromptModeClient, store: SettingsStore) -> Self {
        let server_url = client.base_url().to_string();
        Self {
            sync: PromptModeSync::new(client, store.clone()),
            store,
            opened: false,
            toasts: ToastQueue::default(),
            applied_theme: None,
            server_url,
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let theme = self.store.theme();
        if self.applied_theme == Some(theme) {
            return;
        }
        ctx.set_theme(match theme {
            Theme::Light => ThemePreference::Light,
            Theme::Dark => ThemePreference::Dark,
            Theme::System => ThemePreference::System,
        });
        self.applied_theme = Some(theme);
    }

    fn apply_actions(&mut self, actions: PanelActions) {
        if let Some(language) = actions.language {
            if self.store.set_language(language) {
                info!("[kgmode:gui] Language set to {}", language.code());
            }
        }
        if let Some(theme) = actions.theme {
            if self.store.set_theme(theme) {
                info!("[kgmode:gui] Theme set to {}", theme.as_str());
            }
        }
        if let Some(requested) = actions.prompt_mode {
            if !self.sync.set_prompt_mode(requested) {
                debug!("[kgmode:gui] Prompt mode toggle ignored, update in flight");
            }
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("kgmode").strong().color(ACCENT_CYAN));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = ui
                        .selectable_label(self.opened, RichText::new("🎨").size(16.0))
                        .on_hover_text("Settings");
                    if button.clicked() {
                        self.opened = !self.opened;
                    }
                });
            });
        });
    }

    fn render_body(&self, ctx: &egui::Context) {
        let snapshot = self.store.snapshot();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("Prompt mode").weak());
            ui.heading(PromptMode::from_flag(snapshot.use_engineering_prompts).label());
            ui.add_space(8.0);
            ui.label(RichText::new(format!("Server: {}", self.server_url)).small().weak());
        });
    }

    fn render_dropdown(&mut self, ctx: &egui::Context) {
        let snapshot = self.store.snapshot();
        let pending = self.sync.is_pending();

        let mut close = false;
        let actions = egui::Area::new(Id::new("settings_dropdown"))
            .anchor(Align2::RIGHT_TOP, Vec2::new(-8.0, 36.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .show(ui, |ui| {
                        ui.set_width(256.0);
                        ui.horizontal(|ui| {
                            ui.label(RichText::new("Settings").strong());
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui.small_button("✕").clicked() {
                                    close = true;
                                }
                            });
                        });
                        ui.separator();
                        render_settings_panel(ui, &snapshot, pending)
                    })
                    .inner
            })
            .inner;

        self.apply_actions(actions);
        if close {
            self.opened = false;
        }
    }
}

impl eframe::App for SettingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync.poll();
        for notification in self.sync.drain_notifications() {
            self.toasts.push(notification);
        }

        self.apply_theme(ctx);
        self.render_top_bar(ctx);

        // Fetch when the dropdown transitions to open
        self.sync.fetch_on_open(self.opened);

        self.render_body(ctx);
        if self.opened {
            self.render_dropdown(ctx);
        }
        self.toasts.render(ctx);

        if self.opened || self.sync.is_pending() || !self.toasts.is_idle() {
            ctx.request_repaint_after(POLL_INTERVAL);
        }
    }
}
