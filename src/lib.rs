pub mod audio;
pub mod chat;
pub mod config;
pub mod messages;
pub mod ui;
pub mod voice;

use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum HubbubError {
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("Voice recognition is not available on this system")]
    RecognizerUnavailable,

    #[error("Recognition error: {0}")]
    RecognitionError(String),

    #[error("Chatbot request error: {0}")]
    TransportError(String),

    #[error("Malformed chatbot reply: {0}")]
    BadReplyError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Channel error: {0}")]
    ChannelError(String),
}

impl HubbubError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            // Hardware/device errors may require user intervention
            HubbubError::AudioDeviceError(_) => false,
            // No recognition engine means the feature stays off for the session
            HubbubError::RecognizerUnavailable => false,
            // These are typically transient errors
            HubbubError::RecognitionError(_) => true,
            HubbubError::TransportError(_) => true,
            HubbubError::BadReplyError(_) => true,
            HubbubError::ConfigError(_) => false,
            HubbubError::ChannelError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            HubbubError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone/speakers.".to_string()
            }
            HubbubError::RecognizerUnavailable => {
                "Voice search is not supported on this system.".to_string()
            }
            HubbubError::RecognitionError(_) => {
                "Speech recognition failed. Please try again.".to_string()
            }
            HubbubError::TransportError(_) | HubbubError::BadReplyError(_) => {
                crate::messages::CONNECTION_ERROR_TEXT.to_string()
            }
            HubbubError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            HubbubError::ChannelError(_) => {
                "Internal communication error. Please restart the application.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, HubbubError>;
