//! Shared test doubles for the turn pipeline
//!
//! Mock implementations of the three client traits so orchestrator behavior
//! can be exercised without a network.

use std::sync::Mutex;

use async_trait::async_trait;
use confab::{Complete, Error, Message, Result, Synthesize, Transcribe};

/// Transcriber returning a fixed transcript for any non-empty blob
pub struct FixedTranscriber(pub &'static str);

#[async_trait]
impl Transcribe for FixedTranscriber {
    async fn transcribe(&self, audio: &[u8], _mime: &str) -> Result<String> {
        if audio.is_empty() {
            return Err(Error::InvalidInput("empty audio payload".to_string()));
        }
        Ok(self.0.to_string())
    }
}

/// Transcriber that always fails upstream
pub struct FailingTranscriber;

#[async_trait]
impl Transcribe for FailingTranscriber {
    async fn transcribe(&self, _audio: &[u8], _mime: &str) -> Result<String> {
        Err(Error::Upstream("transcription API error 500".to_string()))
    }
}

/// Chat double returning a canned reply and recording the history length it
/// was handed on each call
pub struct RecordingChat {
    pub reply: &'static str,
    pub history_lens: Mutex<Vec<usize>>,
}

impl RecordingChat {
    pub fn new(reply: &'static str) -> Self {
        Self {
            reply,
            history_lens: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Complete for RecordingChat {
    async fn complete(&self, _user_text: &str, history: &[Message]) -> Result<String> {
        self.history_lens.lock().unwrap().push(history.len());
        Ok(self.reply.to_string())
    }
}

/// Chat double that always fails at the transport level
pub struct FailingChat;

#[async_trait]
impl Complete for FailingChat {
    async fn complete(&self, _user_text: &str, _history: &[Message]) -> Result<String> {
        Err(Error::Network("connection reset by peer".to_string()))
    }
}

/// Synthesizer emitting a fixed set of f32 samples as raw LE bytes
pub struct FixedSynth(pub Vec<f32>);

#[async_trait]
impl Synthesize for FixedSynth {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        Ok(self.0.iter().flat_map(|s| s.to_le_bytes()).collect())
    }
}

/// Synthesizer that always fails upstream
pub struct FailingSynth;

#[async_trait]
impl Synthesize for FailingSynth {
    async fn synthesize(&self, _text: &str) -> Result<Vec<u8>> {
        Err(Error::Upstream("synthesis API error 500".to_string()))
    }
}
