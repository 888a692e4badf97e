//! Chat completion client

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::transcript::{Message, Sender};
use crate::{Error, Result};

/// Fallback reply used when the upstream response is well-formed but carries
/// no content. Part of the observable contract, not an error.
pub const EMPTY_REPLY_FALLBACK: &str = "No response.";

/// Obtains a model reply for the latest user message
#[async_trait]
pub trait Complete: Send + Sync {
    /// Generate a reply to `user_text`
    ///
    /// `history` is the transcript before the current turn; whether it is
    /// transmitted upstream is an implementation policy.
    ///
    /// # Errors
    ///
    /// Returns error if the text is empty or the remote call fails.
    async fn complete(&self, user_text: &str, history: &[Message]) -> Result<String>;
}

/// `OpenAI`-backed chat completion client
pub struct ChatCompletion {
    client: reqwest::Client,
    api_key: String,
    model: String,
    system_prompt: String,
    send_full_history: bool,
}

impl ChatCompletion {
    /// Create a new completion client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(
        api_key: String,
        model: String,
        system_prompt: String,
        send_full_history: bool,
    ) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "OpenAI API key required for chat completions".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            system_prompt,
            send_full_history,
        })
    }

    /// Assemble the wire messages: system instruction first, optionally the
    /// prior history, then the latest user message.
    fn wire_messages<'a>(
        &'a self,
        user_text: &'a str,
        history: &'a [Message],
    ) -> Vec<WireMessage<'a>> {
        let mut messages = vec![WireMessage {
            role: "system",
            content: &self.system_prompt,
        }];

        if self.send_full_history {
            for message in history {
                messages.push(WireMessage {
                    role: match message.sender {
                        Sender::User => "user",
                        Sender::Assistant => "assistant",
                    },
                    content: &message.text,
                });
            }
        }

        messages.push(WireMessage {
            role: "user",
            content: user_text,
        });
        messages
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// First choice's content, or the fixed fallback when absent or empty
fn extract_reply(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| EMPTY_REPLY_FALLBACK.to_string())
}

#[async_trait]
impl Complete for ChatCompletion {
    async fn complete(&self, user_text: &str, history: &[Message]) -> Result<String> {
        if user_text.trim().is_empty() {
            return Err(Error::InvalidInput("empty message".to_string()));
        }

        let messages = self.wire_messages(user_text, history);
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            "requesting chat completion"
        );

        let response = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&ChatRequest {
                model: &self.model,
                messages,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "chat completion request failed");
                Error::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "chat completion API error");
            return Err(Error::Upstream(format!("chat API error {status}: {body}")));
        }

        let result: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "failed to parse chat completion response");
            Error::Upstream(e.to_string())
        })?;

        let reply = extract_reply(result);
        tracing::info!(chars = reply.len(), "completion received");
        Ok(reply)
    }
}
