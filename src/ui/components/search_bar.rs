//! Search bar component
//!
//! Provides the search field, the submit control, and the microphone button
//! for voice search.

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Color32, Key, RichText, Vec2};

/// Search bar with voice input
pub struct SearchBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_search_field(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_search_button(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_mic_button(ui);
                });
            });
    }

    fn show_search_field(&mut self, ui: &mut egui::Ui) {
        // Reserve space for the two buttons on the right
        let available_width = ui.available_width() - 140.0;

        let text_edit = egui::TextEdit::singleline(&mut self.state.search_query)
            .hint_text("Search jobs, skills, companies...")
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12.0, 8.0));

        let response = ui.add(text_edit);

        if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
            self.state.submit_search();
        }
    }

    fn show_search_button(&mut self, ui: &mut egui::Ui) {
        let button = egui::Button::new(RichText::new("Search").color(Color32::WHITE))
            .min_size(Vec2::new(64.0, 32.0))
            .rounding(self.theme.button_rounding)
            .fill(self.theme.primary);

        if ui.add(button).clicked() {
            self.state.submit_search();
        }
    }

    fn show_mic_button(&mut self, ui: &mut egui::Ui) {
        let listening = self.state.voice.is_listening();

        let (fill, tooltip) = if listening {
            (self.theme.listening, "Stop listening")
        } else {
            (self.theme.mic_idle, "Start voice input")
        };

        let button = egui::Button::new(RichText::new("🎤").size(16.0).color(Color32::WHITE))
            .min_size(Vec2::splat(32.0))
            .rounding(self.theme.button_rounding)
            .fill(fill);

        let response = ui.add(button);
        let button_rect = response.rect;

        if response.clicked() {
            self.state.toggle_voice();
        }

        response.on_hover_text(tooltip);

        // Pulsing ring while listening
        if listening {
            let t = ui.ctx().input(|i| i.time);
            let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

            let painter = ui.painter();
            painter.circle_stroke(
                button_rect.center(),
                button_rect.width() / 2.0 + 2.0 + pulse * 3.0,
                egui::Stroke::new(
                    2.0 * pulse,
                    self.theme.listening.gamma_multiply(1.0 - pulse * 0.5),
                ),
            );

            ui.ctx().request_repaint();
        }
    }
}
