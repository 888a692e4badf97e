//! Speech-to-text (STT) processing

use async_trait::async_trait;

use crate::{Error, Result};

/// Turns a captured audio blob into transcript text
#[async_trait]
pub trait Transcribe: Send + Sync {
    /// Transcribe audio to text
    ///
    /// # Errors
    ///
    /// Returns error if the payload is empty or the remote call fails.
    async fn transcribe(&self, audio: &[u8], mime: &str) -> Result<String>;
}

/// Transcribes speech to text via Groq-hosted Whisper
pub struct SpeechToText {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl SpeechToText {
    /// Create a new STT client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Groq API key required for transcription".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
        })
    }
}

#[async_trait]
impl Transcribe for SpeechToText {
    async fn transcribe(&self, audio: &[u8], mime: &str) -> Result<String> {
        if audio.is_empty() {
            return Err(Error::InvalidInput("empty audio payload".to_string()));
        }

        tracing::debug!(audio_bytes = audio.len(), mime, "starting transcription");

        let form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio.to_vec())
                    .file_name("audio.wav")
                    .mime_str(mime)
                    .map_err(|e| Error::InvalidInput(e.to_string()))?,
            )
            .text("model", self.model.clone())
            .text("response_format", "text");

        let response = self
            .client
            .post("https://api.groq.com/openai/v1/audio/transcriptions")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "transcription request failed");
                Error::Network(e.to_string())
            })?;

        let status = response.status();
        tracing::debug!(status = %status, "received response");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "transcription API error");
            return Err(Error::Upstream(format!(
                "transcription API error {status}: {body}"
            )));
        }

        // response_format=text makes the body the bare transcript
        let text = response.text().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read transcription response");
            Error::Upstream(e.to_string())
        })?;

        tracing::info!(transcript = %text, "transcription complete");
        Ok(text)
    }
}
