//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests verify the widget behavior by simulating user interactions
//! and checking the accessibility tree for expected elements.

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use hubbub::audio::CuePlayer;
use hubbub::messages::{Sender, GREETING_TEXT};
use hubbub::ui::AppState;
use hubbub::voice::VoiceControl;

/// Application state wrapper for testing. No speech engine is wired in, so
/// the mic button exercises the capability-missing path.
struct TestApp {
    state: AppState,
}

impl TestApp {
    fn new() -> Self {
        Self {
            state: AppState::new(VoiceControl::with_factory(None, CuePlayer::disabled())),
        }
    }
}

/// Render a compact version of the assistant UI for testing
fn render_assistant_ui(app: &mut TestApp, ui: &mut egui::Ui) {
    // Chat toggle bubble
    let toggle = ui.button(if app.state.chat_open { "✕" } else { "💬" });
    toggle.widget_info(|| {
        egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Assistant toggle")
    });
    if toggle.clicked() {
        app.state.toggle_chat();
    }

    if app.state.chat_open {
        egui::ScrollArea::vertical()
            .id_salt("test_messages")
            .max_height(300.0)
            .show(ui, |ui| {
                for message in app.state.messages.get_all() {
                    let label_text = match message.sender {
                        Sender::User => format!("User message: {}", message.text),
                        Sender::Bot => format!("Assistant message: {}", message.text),
                    };

                    let response = ui.label(&message.text);
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label_text)
                    });
                }
            });

        ui.separator();

        ui.horizontal(|ui| {
            let text_edit = egui::TextEdit::singleline(&mut app.state.input_text)
                .hint_text("Type a message...")
                .desired_width(200.0)
                .id(egui::Id::new("chat_input"));

            let text_response = ui.add(text_edit);
            text_response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Chat input")
            });

            let send_enabled = !app.state.input_text.trim().is_empty();
            let send_response = ui.add_enabled(send_enabled, egui::Button::new("Send"));
            send_response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, send_enabled, "Send message")
            });

            if send_response.clicked() {
                app.state.send_message();
            }
        });
    }

    ui.separator();

    // Search bar with voice input
    ui.horizontal(|ui| {
        let search = ui.add(
            egui::TextEdit::singleline(&mut app.state.search_query)
                .desired_width(200.0)
                .id(egui::Id::new("search_input")),
        );
        search.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Search input")
        });

        let mic = ui.button("🎤");
        mic.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Voice search")
        });
        if mic.clicked() {
            app.state.toggle_voice();
        }
    });

    if let Some(alert) = app.state.alert.clone() {
        let response = ui.label(&alert);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &format!("Alert: {}", alert))
        });
    }
}

fn harness() -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(420.0, 560.0))
        .build_state(
            |ctx, app: &mut TestApp| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    render_assistant_ui(app, ui);
                });
            },
            TestApp::new(),
        )
}

/// Opening the chat shows exactly the greeting
#[test]
fn test_open_chat_shows_greeting() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label("Assistant toggle").click();
    harness.run();

    assert!(harness.state().state.chat_open);

    let messages = harness.state().state.messages.get_all();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, GREETING_TEXT);

    let _greeting =
        harness.get_by_label(&format!("Assistant message: {}", GREETING_TEXT));
}

/// Typing a message and clicking send appends a user message
#[test]
fn test_send_message_creates_user_message() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label("Assistant toggle").click();
    harness.run();

    harness.get_by_label("Chat input").focus();
    harness.run();

    harness.get_by_label("Chat input").type_text("Hello");
    harness.run();

    harness.get_by_label("Send message").click();
    harness.run();

    let messages = harness.state().state.messages.get_all();
    assert_eq!(messages.len(), 2, "greeting plus the new user message");
    assert_eq!(messages[1].sender, Sender::User);
    assert_eq!(messages[1].text, "Hello");

    assert!(
        harness.state().state.input_text.is_empty(),
        "Input should be cleared after sending"
    );

    let _message = harness.get_by_label("User message: Hello");
}

/// Reopening the chat discards history and shows the greeting alone
#[test]
fn test_reopen_resets_to_greeting() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label("Assistant toggle").click();
    harness.run();

    harness.get_by_label("Chat input").focus();
    harness.run();
    harness.get_by_label("Chat input").type_text("old question");
    harness.run();
    harness.get_by_label("Send message").click();
    harness.run();

    assert_eq!(harness.state().state.messages.len(), 2);

    // Close, then reopen
    harness.get_by_label("Assistant toggle").click();
    harness.run();
    assert!(!harness.state().state.chat_open);
    assert_eq!(
        harness.state().state.messages.len(),
        2,
        "history kept while closed"
    );

    harness.get_by_label("Assistant toggle").click();
    harness.run();

    let messages = harness.state().state.messages.get_all();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].text, GREETING_TEXT);
}

/// Empty input cannot be sent
#[test]
fn test_cannot_send_empty_message() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label("Assistant toggle").click();
    harness.run();

    harness.get_by_label("Send message").click();
    harness.run();

    let messages = harness.state().state.messages.get_all();
    assert_eq!(messages.len(), 1, "only the greeting");
}

/// The mic button without a speech engine raises one alert and stays idle
#[test]
fn test_voice_without_engine_alerts() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label("Voice search").click();
    harness.run();

    assert!(!harness.state().state.voice.is_listening());

    let alert = harness.state().state.alert.clone().unwrap();
    let _label = harness.get_by_label(&format!("Alert: {}", alert));
}
