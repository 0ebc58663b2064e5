//! HTTP transport for the portal's chatbot endpoint.
//!
//! The endpoint contract is a single round trip: POST a JSON body with the
//! user's text, receive a JSON body with the reply text. No authentication,
//! no retries, no versioning.

use crate::{HubbubError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatbotRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatbotReply {
    reply: String,
}

/// Seam between the chat pipeline and the network.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Deliver one user message and return the responder's reply text.
    async fn send(&self, message: &str) -> Result<String>;
}

/// Transport backed by the portal's `/chatbot` route.
pub struct HttpChatTransport {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpChatTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base = base_url.into();
        let endpoint = format!("{}/chatbot", base.trim_end_matches('/'));
        Self {
            client: reqwest::Client::new(),
            endpoint,
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, message: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&ChatbotRequest { message })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| HubbubError::TransportError(e.to_string()))?
            .error_for_status()
            .map_err(|e| HubbubError::TransportError(e.to_string()))?;

        let body: ChatbotReply = response
            .json()
            .await
            .map_err(|e| HubbubError::BadReplyError(e.to_string()))?;

        Ok(body.reply)
    }
}
