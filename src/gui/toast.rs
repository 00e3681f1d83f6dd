//! Toast notifications for prompt-mode updates
//!
//! Shows one notification at a time, bottom right, fading in and out.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use eframe::egui::{self, Align2, Color32, Id, RichText, Vec2};

use super::theme::{ACCENT_GREEN, ACCENT_RED, BG_SECONDARY, TEXT_DIM};
use crate::sync::{Notification, NotificationKind};

/// How long a toast is displayed
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Animation duration for fade in/out
const FADE_DURATION: f32 = 0.3;

/// Queue of notifications waiting to be shown
#[derive(Default)]
pub struct ToastQueue {
    queue: VecDeque<Notification>,
    current: Option<(Notification, Instant)>,
}

impl ToastQueue {
    pub fn push(&mut self, notification: Notification) {
        self.queue.push_back(notification);
    }

    pub fn is_idle(&self) -> bool {
        self.current.is_none() && self.queue.is_empty()
    }

    /// Advance to the toast that should be visible at `now`, with its alpha
    fn advance(&mut self, now: Instant) -> Option<(Notification, f32)> {
        if let Some((_, started)) = &self.current {
            if now.duration_since(*started) > TOAST_DURATION {
                self.current = None;
            }
        }

        if self.current.is_none() {
            let next = self.queue.pop_front()?;
            self.current = Some((next, now));
        }

        let (notification, started) = self.current.as_ref()?;
        let alpha = fade_alpha(now.duration_since(*started).as_secs_f32());
        Some((notification.clone(), alpha))
    }

    /// Render the current toast, if any
    pub fn render(&mut self, ctx: &egui::Context) {
        let Some((notification, alpha)) = self.advance(Instant::now()) else {
            return;
        };

        let animated_alpha = ctx.animate_value_with_time(Id::new("toast_alpha"), alpha, 0.1);

        egui::Area::new(Id::new("prompt_mode_toast"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(apply_alpha(BG_SECONDARY, animated_alpha * 0.95))
                    .stroke(egui::Stroke::new(
                        1.0,
                        Color32::from_rgba_unmultiplied(100, 100, 100, (animated_alpha * 150.0) as u8),
                    ))
                    .corner_radius(8.0)
                    .inner_margin(14.0)
                    .shadow(egui::Shadow {
                        spread: 4,
                        blur: 8,
                        color: Color32::from_rgba_unmultiplied(0, 0, 0, (animated_alpha * 100.0) as u8),
                        offset: [0, 2],
                    })
                    .show(ui, |ui| {
                        ui.set_min_width(260.0);
                        render_toast_content(ui, &notification, animated_alpha);
                    });
            });

        // Keep repainting for animation
        ctx.request_repaint();
    }
}

fn render_toast_content(ui: &mut egui::Ui, notification: &Notification, alpha: f32) {
    let (icon, color) = match notification.kind {
        NotificationKind::Success => ("✔", ACCENT_GREEN),
        NotificationKind::Error => ("✖", ACCENT_RED),
    };

    ui.horizontal(|ui| {
        ui.label(RichText::new(icon).size(20.0).color(apply_alpha(color, alpha)));
        ui.vertical(|ui| {
            ui.label(
                RichText::new(&notification.title)
                    .color(apply_alpha(Color32::WHITE, alpha))
                    .strong(),
            );
            ui.label(
                RichText::new(&notification.description)
                    .color(apply_alpha(TEXT_DIM, alpha))
                    .size(11.0),
            );
            ui.label(
                RichText::new(notification.age_label(chrono::Utc::now()))
                    .color(apply_alpha(TEXT_DIM, alpha * 0.7))
                    .size(10.0),
            );
        });
    });
}

/// Opacity of a toast `elapsed` seconds after it appeared
fn fade_alpha(elapsed: f32) -> f32 {
    let total = TOAST_DURATION.as_secs_f32();
    if elapsed < FADE_DURATION {
        elapsed / FADE_DURATION
    } else if elapsed > total - FADE_DURATION {
        ((total - elapsed) / FADE_DURATION).max(0.0)
    } else {
        1.0
    }
}

/// Apply alpha to a color
fn apply_alpha(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * alpha) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_alpha_curve() {
        assert_eq!(fade_alpha(0.0), 0.0);
        assert!((fade_alpha(0.15) - 0.5).abs() < 1e-4);
        assert_eq!(fade_alpha(2.0), 1.0);
        assert_eq!(fade_alpha(10.0), 0.0);
    }

    #[test]
    fn test_queue_shows_one_toast_at_a_time() {
        let mut toasts = ToastQueue::default();
        toasts.push(Notification::mode_switch_failed());
        toasts.push(Notification::mode_switched("ok", true));

        let start = Instant::now();
        let (first, _) = toasts.advance(start).unwrap();
        assert!(first.is_error());

        let (still_first, _) = toasts.advance(start + Duration::from_secs(1)).unwrap();
        assert!(still_first.is_error());

        let (second, alpha) = toasts.advance(start + Duration::from_secs(5)).unwrap();
        assert_eq!(second.kind, NotificationKind::Success);
        assert_eq!(alpha, 0.0);

        assert!(toasts.advance(start + Duration::from_secs(10)).is_none());
        assert!(toasts.is_idle());
    }
}
