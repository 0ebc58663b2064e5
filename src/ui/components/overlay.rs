//! Transient indicator shown while voice capture is active.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align2, Color32, RichText, Vec2};

pub struct ListeningOverlay<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> ListeningOverlay<'a> {
    pub fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ctx: &egui::Context) {
        if !self.state.voice.is_listening() {
            return;
        }

        egui::Area::new(egui::Id::new("listening_overlay"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-90.0, -180.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(self.theme.overlay_bg)
                    .rounding(egui::Rounding::same(8.0))
                    .inner_margin(egui::Margin::symmetric(16.0, 10.0))
                    .show(ui, |ui| {
                        ui.label(
                            RichText::new("🎤 Listening...")
                                .size(15.0)
                                .strong()
                                .color(Color32::WHITE),
                        );
                    });
            });
    }
}
