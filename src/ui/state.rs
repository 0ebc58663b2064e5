//! Application state management
//!
//! Central state for the assistant UI. All control logic lives here so it can
//! run headless; the widgets only render from and mutate this struct.

use crate::chat::{ChatCommand, ChatEvent};
use crate::messages::{Message, MessageStorage, CONNECTION_ERROR_TEXT};
use crate::voice::VoiceControl;
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error, info};
use uuid::Uuid;

/// Central application state
pub struct AppState {
    /// Chat history (thread-safe)
    pub messages: MessageStorage,

    /// Current chat input
    pub input_text: String,

    /// Whether the chat window is shown
    pub chat_open: bool,

    /// Chatbot requests still in flight
    pub awaiting_replies: usize,

    /// Current search box contents
    pub search_query: String,

    /// Last submitted search, if any
    pub submitted_search: Option<String>,

    /// Pending user alert, if any
    pub alert: Option<String>,

    /// Voice-search control
    pub voice: VoiceControl,

    /// Channel to send chat commands
    chat_command_tx: Option<Sender<ChatCommand>>,

    /// Channel to receive chat events
    chat_event_rx: Option<Receiver<ChatEvent>>,
}

impl AppState {
    pub fn new(voice: VoiceControl) -> Self {
        Self {
            messages: MessageStorage::new(),
            input_text: String::new(),
            chat_open: false,
            awaiting_replies: 0,
            search_query: String::new(),
            submitted_search: None,
            alert: None,
            voice,
            chat_command_tx: None,
            chat_event_rx: None,
        }
    }

    /// Wire the chat pipeline channels
    pub fn connect_chat(&mut self, command_tx: Sender<ChatCommand>, event_rx: Receiver<ChatEvent>) {
        self.chat_command_tx = Some(command_tx);
        self.chat_event_rx = Some(event_rx);
    }

    /// Open or close the chat window
    pub fn toggle_chat(&mut self) {
        if self.chat_open {
            self.close_chat();
        } else {
            self.open_chat();
        }
    }

    /// Reveal the chat window. Prior history is discarded and the greeting
    /// becomes the only message.
    pub fn open_chat(&mut self) {
        self.chat_open = true;
        self.messages.reset_to_greeting();
    }

    /// Hide the chat window; history stays until the next open
    pub fn close_chat(&mut self) {
        self.chat_open = false;
    }

    /// Send the current input to the chatbot endpoint
    pub fn send_message(&mut self) {
        let text = self.input_text.trim().to_string();
        if text.is_empty() {
            return;
        }

        self.messages.add(Message::user(text.clone()));

        if let Some(tx) = &self.chat_command_tx {
            let request_id = Uuid::new_v4();
            if tx.send(ChatCommand::Send { text, request_id }).is_ok() {
                self.awaiting_replies += 1;
            }
        }

        self.input_text.clear();
    }

    /// User activation of the voice-search control
    pub fn toggle_voice(&mut self) {
        if let Err(e) = self.voice.toggle() {
            error!("Voice input unavailable: {}", e);
            self.alert = Some(e.user_message());
        }
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Record the current search box contents as submitted
    pub fn submit_search(&mut self) {
        let query = self.search_query.trim().to_string();
        info!("Search submitted: \"{}\"", query);
        self.submitted_search = Some(query);
    }

    /// Process incoming events from the background workers
    pub fn poll_events(&mut self) {
        if let Some(rx) = &self.chat_event_rx {
            while let Ok(event) = rx.try_recv() {
                match event {
                    ChatEvent::Reply { text, request_id } => {
                        debug!("Reply for request {}", request_id);
                        self.messages.add(Message::bot(text));
                        self.awaiting_replies = self.awaiting_replies.saturating_sub(1);
                    }
                    ChatEvent::Failed { error, request_id } => {
                        error!("Chatbot request {} failed: {}", request_id, error);
                        self.messages.add(Message::bot(CONNECTION_ERROR_TEXT));
                        self.awaiting_replies = self.awaiting_replies.saturating_sub(1);
                    }
                    ChatEvent::Shutdown => {
                        debug!("Chat pipeline shut down");
                    }
                }
            }
        }

        // A final transcript fills the search box and submits it
        if let Some(transcript) = self.voice.poll() {
            self.search_query = transcript;
            self.submit_search();
        }
    }

    /// Ask the background workers to wind down
    pub fn shutdown(&mut self) {
        if let Some(tx) = &self.chat_command_tx {
            let _ = tx.send(ChatCommand::Shutdown);
        }
    }
}
