//! Main application struct and eframe integration

use crate::audio::CuePlayer;
use crate::chat::{ChatPipeline, HttpChatTransport};
use crate::config::AssistantConfig;
use crate::ui::components::{ChatToggle, ChatWindow, ListeningOverlay, SearchBar};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use crate::voice::VoiceControl;
use egui::{self, Align2, CentralPanel, RichText, TopBottomPanel, Vec2};
use std::sync::Arc;
use tracing::error;

/// The assistant companion application
pub struct AssistantApp {
    state: AppState,
    theme: Theme,
}

impl AssistantApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AssistantConfig) -> Self {
        let theme = Theme::dark();
        theme.apply(&cc.egui_ctx);

        let cues = if config.enable_audio_cues {
            CuePlayer::new(config.cue_path.clone())
        } else {
            CuePlayer::disabled()
        };
        let voice = VoiceControl::new(&config.recognizer, cues);

        let transport = Arc::new(HttpChatTransport::new(
            config.portal_url.clone(),
            config.request_timeout,
        ));
        let pipeline = ChatPipeline::new(transport);
        let command_tx = pipeline.command_sender();
        let event_rx = pipeline.event_receiver();
        if let Err(e) = pipeline.start_worker() {
            error!("Failed to start chat pipeline: {}", e);
        }

        let mut state = AppState::new(voice);
        state.connect_chat(command_tx, event_rx);

        Self { state, theme }
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_secondary)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("HireHub")
                            .size(20.0)
                            .strong()
                            .color(self.theme.primary),
                    );
                    ui.label(
                        RichText::new("Assistant companion")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );
                });
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.bg_primary)
                    .inner_margin(self.theme.spacing),
            )
            .show(ctx, |ui| {
                SearchBar::new(&mut self.state, &self.theme).show(ui);

                ui.add_space(self.theme.spacing);

                match &self.state.submitted_search {
                    Some(query) => {
                        ui.label(
                            RichText::new(format!("Showing results for \"{}\"", query))
                                .color(self.theme.text_primary),
                        );
                    }
                    None => {
                        ui.label(
                            RichText::new("Search the portal, or ask the assistant.")
                                .color(self.theme.text_muted),
                        );
                    }
                }
            });
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.state.alert.clone() else {
            return;
        };

        egui::Window::new("Voice search")
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        self.state.dismiss_alert();
                    }
                });
            });
    }
}

impl eframe::App for AssistantApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Drain backend events before rendering
        self.state.poll_events();

        self.show_header(ctx);
        self.show_content(ctx);

        ChatToggle::new(&mut self.state, &self.theme).show(ctx);
        ChatWindow::new(&mut self.state, &self.theme).show(ctx);
        ListeningOverlay::new(&self.state, &self.theme).show(ctx);
        self.show_alert(ctx);

        // Keep polling while anything is in flight
        if self.state.voice.is_listening() || self.state.awaiting_replies > 0 {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.shutdown();
    }
}
