//! Assistant chat components: the floating toggle bubble and the chat window
//! with its message list, input, and send controls.

use crate::messages::{Message, Sender};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, Align, Align2, Color32, Key, RichText, Vec2};

/// Floating bubble that opens and closes the chat window
pub struct ChatToggle<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ChatToggle<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(self, ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("chat_toggle"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -16.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                let icon = if self.state.chat_open { "✕" } else { "💬" };
                let tooltip = if self.state.chat_open {
                    "Close assistant"
                } else {
                    "Chat with the assistant"
                };

                let button = egui::Button::new(
                    RichText::new(icon).size(20.0).color(Color32::WHITE),
                )
                .min_size(Vec2::splat(48.0))
                .rounding(egui::Rounding::same(24.0))
                .fill(self.theme.primary);

                let response = ui.add(button);
                if response.clicked() {
                    self.state.toggle_chat();
                }
                response.on_hover_text(tooltip);
            });
    }
}

/// The assistant chat window
pub struct ChatWindow<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ChatWindow<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ctx: &egui::Context) {
        if !self.state.chat_open {
            return;
        }

        egui::Window::new("chat_window")
            .title_bar(false)
            .resizable(false)
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -72.0))
            .fixed_size(Vec2::new(320.0, 420.0))
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .rounding(self.theme.card_rounding)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                self.show_header(ui);
                ui.separator();
                self.show_messages(ui);
                ui.separator();
                self.show_input_row(ui);
            });
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("HireHub Assistant")
                    .size(16.0)
                    .strong()
                    .color(self.theme.text_primary),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let close = ui.button(RichText::new("✕").size(14.0));
                if close.on_hover_text("Close").clicked() {
                    self.state.close_chat();
                }
            });
        });
    }

    fn show_messages(&mut self, ui: &mut egui::Ui) {
        let messages = self.state.messages.get_all();

        egui::ScrollArea::vertical()
            .id_salt("chat_messages")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .max_height(300.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.add_space(self.theme.spacing_sm);

                    for message in &messages {
                        self.show_message(ui, message);
                        ui.add_space(self.theme.spacing_sm);
                    }

                    if self.state.awaiting_replies > 0 {
                        self.show_typing_indicator(ui);
                    }

                    ui.add_space(self.theme.spacing_sm);
                });
            });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message) {
        let is_user = matches!(message.sender, Sender::User);

        let (bubble_color, text_color, align) = if is_user {
            (self.theme.user_bubble, Color32::WHITE, Align::RIGHT)
        } else {
            (self.theme.bot_bubble, self.theme.text_primary, Align::LEFT)
        };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            ui.label(
                RichText::new(if is_user { "You" } else { "Assistant" })
                    .size(11.0)
                    .color(self.theme.text_muted),
            );

            let max_width = ui.available_width() * 0.8;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    ui.label(RichText::new(&message.text).color(text_color));
                });

            ui.label(
                RichText::new(message.timestamp.format("%H:%M").to_string())
                    .size(9.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_typing_indicator(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(Align::LEFT), |ui| {
            egui::Frame::none()
                .fill(self.theme.bot_bubble)
                .rounding(self.theme.bubble_rounding)
                .inner_margin(egui::Margin::symmetric(10.0, 6.0))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for i in 0..3 {
                            let t = ui.ctx().input(|input| input.time);
                            let alpha = ((t * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                            ui.label(
                                RichText::new("●")
                                    .size(9.0)
                                    .color(self.theme.text_muted.gamma_multiply(alpha)),
                            );
                        }
                    });
                });
        });

        ui.ctx().request_repaint();
    }

    fn show_input_row(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let available_width = ui.available_width() - 48.0;

            let text_edit = egui::TextEdit::singleline(&mut self.state.input_text)
                .hint_text("Type a message...")
                .desired_width(available_width)
                .font(egui::TextStyle::Body)
                .margin(egui::Margin::symmetric(10.0, 6.0));

            let response = ui.add(text_edit);

            if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                self.state.send_message();
                response.request_focus();
            }

            let can_send = !self.state.input_text.trim().is_empty();

            let button = egui::Button::new(
                RichText::new("➤").size(16.0).color(Color32::WHITE),
            )
            .min_size(Vec2::splat(32.0))
            .rounding(self.theme.button_rounding)
            .fill(if can_send {
                self.theme.primary
            } else {
                self.theme.bg_tertiary
            });

            let send = ui.add_enabled(can_send, button);
            if send.clicked() {
                self.state.send_message();
            }
            send.on_hover_text("Send message (Enter)");
        });
    }
}
