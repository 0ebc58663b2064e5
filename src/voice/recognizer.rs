//! Speech-recognition seam.
//!
//! A recognizer is an opaque engine that is started and stopped; everything
//! it has to say comes back as [`RecognizerEvent`]s on a channel. Engines are
//! discovered through a probe over the compiled-in providers, so a host
//! without any usable engine simply has no voice capability.

use crate::Result;
use crossbeam_channel::Sender;
use std::path::PathBuf;
use tracing::{debug, info};

/// Events emitted by a recognition session
#[derive(Debug, Clone)]
pub enum RecognizerEvent {
    /// A final transcript was produced
    Result {
        /// The recognized text
        transcript: String,
    },

    /// The session failed
    Error {
        /// Error description for the log
        message: String,
    },

    /// The session ended, with or without a result
    End,
}

/// Recognition settings
#[derive(Debug, Clone)]
pub struct RecognizerConfig {
    /// BCP-47 language tag to recognize
    pub language: String,

    /// Emit partial hypotheses while still listening
    pub interim_results: bool,

    /// Number of alternative transcripts to consider
    pub max_alternatives: usize,

    /// Model file for engines that load one locally
    pub model_path: PathBuf,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            interim_results: false,
            max_alternatives: 1,
            model_path: PathBuf::from("models/ggml-base.en.bin"),
        }
    }
}

/// A speech-recognition engine session handle.
///
/// Implementations deliver their events on the channel handed to their
/// factory; `start`/`stop` only steer the session.
pub trait Recognizer: Send {
    /// Begin a recognition session
    fn start(&mut self) -> Result<()>;

    /// End the current session, if any
    fn stop(&mut self) -> Result<()>;
}

/// Creates a recognizer wired to the given event channel
pub type RecognizerFactory =
    Box<dyn Fn(Sender<RecognizerEvent>) -> Result<Box<dyn Recognizer>> + Send>;

struct Provider {
    name: &'static str,
    probe: fn(&RecognizerConfig) -> Result<RecognizerFactory>,
}

fn providers() -> Vec<Provider> {
    #[allow(unused_mut)]
    let mut providers: Vec<Provider> = Vec::new();

    #[cfg(feature = "whisper")]
    providers.push(Provider {
        name: "whisper-local",
        probe: crate::voice::whisper::probe,
    });

    providers
}

/// Probe the compiled-in engines in order and return a factory for the first
/// usable one. `None` means the capability is absent on this host.
pub fn platform_factory(config: &RecognizerConfig) -> Option<RecognizerFactory> {
    for provider in providers() {
        match (provider.probe)(config) {
            Ok(factory) => {
                info!("Using speech engine: {}", provider.name);
                return Some(factory);
            }
            Err(e) => {
                debug!("Speech engine {} unavailable: {}", provider.name, e);
            }
        }
    }

    None
}
