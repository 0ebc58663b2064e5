//! Chat pipeline bridging the UI thread and the portal's chatbot endpoint.
//!
//! Commands go in over a channel, replies come back as events the UI drains
//! once per frame. Each send is an independent request: repeated sends are
//! neither serialized nor cancelled, and replies arrive in completion order.

pub mod transport;

pub use transport::{ChatTransport, HttpChatTransport};

use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

/// Commands that can be sent to the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Deliver a user message to the chatbot endpoint
    Send {
        /// The user's message text
        text: String,
        /// Unique request ID for tracking
        request_id: Uuid,
    },

    /// Shutdown the pipeline
    Shutdown,
}

/// Events emitted by the chat pipeline
#[derive(Debug, Clone)]
pub enum ChatEvent {
    /// The responder's reply arrived
    Reply {
        /// The reply text
        text: String,
        /// Request ID this reply belongs to
        request_id: Uuid,
    },

    /// The request failed (network or malformed reply)
    Failed {
        /// Error description for the log
        error: String,
        /// Request ID that failed
        request_id: Uuid,
    },

    /// Pipeline has shut down
    Shutdown,
}

/// Chat pipeline with channel-based communication
pub struct ChatPipeline {
    transport: Arc<dyn ChatTransport>,

    /// Command sender
    command_tx: Sender<ChatCommand>,

    /// Command receiver (for worker)
    command_rx: Receiver<ChatCommand>,

    /// Event sender (for worker)
    event_tx: Sender<ChatEvent>,

    /// Event receiver
    event_rx: Receiver<ChatEvent>,
}

impl ChatPipeline {
    /// Create a new chat pipeline over the given transport
    pub fn new(transport: Arc<dyn ChatTransport>) -> Self {
        let (command_tx, command_rx) = bounded(100);
        let (event_tx, event_rx) = bounded(100);

        Self {
            transport,
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<ChatCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<ChatEvent> {
        self.event_rx.clone()
    }

    /// Start the worker thread that owns the async runtime.
    ///
    /// Requests run as independent tasks, so several may be in flight at once.
    pub fn start_worker(self) -> Result<()> {
        let transport = self.transport;
        let command_rx = self.command_rx;
        let event_tx = self.event_tx;

        std::thread::spawn(move || {
            info!("Chat worker started");

            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to start chat runtime: {}", e);
                    let _ = event_tx.send(ChatEvent::Shutdown);
                    return;
                }
            };

            loop {
                match command_rx.recv() {
                    Ok(ChatCommand::Send { text, request_id }) => {
                        debug!("Dispatching chatbot request {}", request_id);

                        let transport = Arc::clone(&transport);
                        let event_tx = event_tx.clone();

                        runtime.spawn(async move {
                            let event = match transport.send(&text).await {
                                Ok(reply) => ChatEvent::Reply {
                                    text: reply,
                                    request_id,
                                },
                                Err(e) => ChatEvent::Failed {
                                    error: e.to_string(),
                                    request_id,
                                },
                            };

                            if let Err(e) = event_tx.send(event) {
                                error!("Failed to deliver chat event: {}", e);
                            }
                        });
                    }
                    Ok(ChatCommand::Shutdown) => {
                        info!("Chat worker shutting down");
                        let _ = event_tx.send(ChatEvent::Shutdown);
                        break;
                    }
                    Err(e) => {
                        error!("Chat command channel error: {}", e);
                        break;
                    }
                }
            }

            // Let any in-flight requests finish without blocking shutdown
            runtime.shutdown_background();
            info!("Chat worker stopped");
        });

        Ok(())
    }
}
