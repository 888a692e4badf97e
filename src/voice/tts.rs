//! Text-to-speech (TTS) processing

use async_trait::async_trait;
use serde::Serialize;

use crate::voice::transcode::SYNTH_SAMPLE_RATE;
use crate::{Error, Result};

/// Synthesizes reply text into raw speech audio
#[async_trait]
pub trait Synthesize: Send + Sync {
    /// Synthesize text into raw f32 LE mono PCM at 24 kHz
    ///
    /// On success the returned byte length is a multiple of 4; the audio
    /// duration is `len / 4 / 24000` seconds.
    ///
    /// # Errors
    ///
    /// Returns error if the text is empty or the remote call fails.
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>>;
}

/// Synthesizes speech via the Cartesia bytes endpoint
pub struct TextToSpeech {
    client: reqwest::Client,
    api_key: String,
    model: String,
    voice: String,
}

impl TextToSpeech {
    /// Create a new TTS client
    ///
    /// # Errors
    ///
    /// Returns error if the API key is missing
    pub fn new(api_key: String, model: String, voice: String) -> Result<Self> {
        if api_key.is_empty() {
            return Err(Error::Config(
                "Cartesia API key required for synthesis".to_string(),
            ));
        }

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            voice,
        })
    }
}

#[derive(Serialize)]
struct SynthesisRequest<'a> {
    model_id: &'a str,
    transcript: &'a str,
    voice: VoiceSelector<'a>,
    output_format: OutputFormat<'a>,
}

#[derive(Serialize)]
struct VoiceSelector<'a> {
    mode: &'a str,
    id: &'a str,
}

#[derive(Serialize)]
struct OutputFormat<'a> {
    container: &'a str,
    encoding: &'a str,
    sample_rate: u32,
}

#[async_trait]
impl Synthesize for TextToSpeech {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Err(Error::InvalidInput("empty synthesis text".to_string()));
        }

        let request = SynthesisRequest {
            model_id: &self.model,
            transcript: text,
            voice: VoiceSelector {
                mode: "id",
                id: &self.voice,
            },
            output_format: OutputFormat {
                container: "raw",
                encoding: "pcm_f32le",
                sample_rate: SYNTH_SAMPLE_RATE,
            },
        };

        tracing::debug!(chars = text.len(), voice = %self.voice, "starting synthesis");

        let response = self
            .client
            .post("https://api.cartesia.ai/tts/bytes")
            .header("Cartesia-Version", "2024-06-30")
            .header("X-API-Key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "synthesis request failed");
                Error::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "synthesis API error");
            return Err(Error::Upstream(format!(
                "synthesis API error {status}: {body}"
            )));
        }

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read synthesis response");
            Error::Network(e.to_string())
        })?;

        tracing::info!(audio_bytes = audio.len(), "synthesis complete");
        Ok(audio.to_vec())
    }
}
