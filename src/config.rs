//! Application configuration.

use crate::voice::RecognizerConfig;
use crate::{HubbubError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the assistant application
#[derive(Clone, Debug)]
pub struct AssistantConfig {
    /// Base URL of the HireHub portal hosting the chatbot endpoint
    pub portal_url: String,

    /// Timeout applied to each chatbot request
    pub request_timeout: Duration,

    /// Speech-recognition settings
    pub recognizer: RecognizerConfig,

    /// Optional cue file; a synthesized tone is used when absent
    pub cue_path: Option<PathBuf>,

    /// Whether listening start/stop cues are sounded at all
    pub enable_audio_cues: bool,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            portal_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: Duration::from_secs(10),
            recognizer: RecognizerConfig::default(),
            cue_path: None,
            enable_audio_cues: true,
        }
    }
}

impl AssistantConfig {
    /// Build a configuration from environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("HUBBUB_PORTAL_URL") {
            config.portal_url = url;
        }
        if let Ok(model) = std::env::var("HUBBUB_WHISPER_MODEL") {
            config.recognizer.model_path = PathBuf::from(model);
        }
        if let Ok(cue) = std::env::var("HUBBUB_CUE_FILE") {
            config.cue_path = Some(PathBuf::from(cue));
        }

        config
    }

    /// Set the portal base URL
    pub fn with_portal_url(mut self, url: impl Into<String>) -> Self {
        self.portal_url = url.into();
        self
    }

    /// Use a cue file instead of the synthesized tone
    pub fn with_cue_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.cue_path = Some(path.into());
        self
    }

    /// Silence the listening cues
    pub fn without_audio_cues(mut self) -> Self {
        self.enable_audio_cues = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.portal_url.starts_with("http://") && !self.portal_url.starts_with("https://") {
            return Err(HubbubError::ConfigError(format!(
                "Portal URL must be http(s): {}",
                self.portal_url
            )));
        }

        if self.request_timeout.is_zero() {
            return Err(HubbubError::ConfigError(
                "Request timeout must be greater than 0".into(),
            ));
        }

        if self.recognizer.max_alternatives == 0 {
            return Err(HubbubError::ConfigError(
                "At least one transcript alternative is required".into(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AssistantConfig::default().validate().is_ok());
    }

    #[test]
    fn test_non_http_url_rejected() {
        let config = AssistantConfig::default().with_portal_url("ftp://example.com");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_builder_flags() {
        let config = AssistantConfig::default()
            .with_cue_file("/tmp/chime.wav")
            .without_audio_cues();

        assert!(config.cue_path.is_some());
        assert!(!config.enable_audio_cues);
    }
}
