//! Turn orchestration
//!
//! Sequences capture drain, transcription, completion, synthesis and
//! transcoding into one conversation turn, and owns the transcript.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::chat::{ChatCompletion, Complete};
use crate::config::Config;
use crate::transcript::{Message, Transcript};
use crate::voice::{
    AudioChunk, SYNTH_SAMPLE_RATE, SpeechToText, Synthesize, TextToSpeech, Transcribe, assemble,
    drain, transcode,
};
use crate::{Error, Result};

/// Phase of the active turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    Capturing,
    Transcribing,
    Completing,
    Synthesizing,
    Ready,
    Failed,
}

/// Outcome of one turn, handed to the presentation layer
#[derive(Debug, Clone)]
pub struct TurnResult {
    /// Snapshot of the whole transcript after the turn
    pub messages: Vec<Message>,
    /// The assistant reply for this turn (fallback text when completion
    /// failed)
    pub reply: String,
    /// Playable WAV audio for the reply; absent when synthesis failed and
    /// the turn degraded to text-only
    pub audio: Option<Vec<u8>>,
    /// Terminal state of the turn (`Ready` or `Failed`)
    pub state: TurnState,
}

/// Sequences one conversation turn at a time
///
/// `&mut self` on the submit methods is the transcript mutation lock: a new
/// turn cannot begin while one is in flight, and only the orchestrator ever
/// mutates the transcript. Remote calls are awaited in sequence; nothing is
/// pipelined within or across turns.
pub struct Orchestrator {
    stt: Option<Arc<dyn Transcribe>>,
    chat: Option<Arc<dyn Complete>>,
    tts: Option<Arc<dyn Synthesize>>,
    transcript: Transcript,
    state: TurnState,
    sample_rate: u32,
}

impl Orchestrator {
    /// Create an orchestrator from explicit client handles
    #[must_use]
    pub fn new(
        stt: Option<Arc<dyn Transcribe>>,
        chat: Option<Arc<dyn Complete>>,
        tts: Option<Arc<dyn Synthesize>>,
    ) -> Self {
        Self {
            stt,
            chat,
            tts,
            transcript: Transcript::new(),
            state: TurnState::Idle,
            sample_rate: SYNTH_SAMPLE_RATE,
        }
    }

    /// Wire up a concrete client for every credential present in `config`
    ///
    /// # Errors
    ///
    /// Returns error if a present credential is rejected by a client
    /// constructor
    pub fn from_config(config: &Config) -> Result<Self> {
        let stt = match &config.api_keys.groq {
            Some(key) => Some(Arc::new(SpeechToText::new(
                key.clone(),
                config.stt_model.clone(),
            )?) as Arc<dyn Transcribe>),
            None => None,
        };

        let chat = match &config.api_keys.openai {
            Some(key) => Some(Arc::new(ChatCompletion::new(
                key.clone(),
                config.llm_model.clone(),
                config.system_prompt.clone(),
                config.send_full_history,
            )?) as Arc<dyn Complete>),
            None => None,
        };

        let tts = match &config.api_keys.cartesia {
            Some(key) => Some(Arc::new(TextToSpeech::new(
                key.clone(),
                config.tts_model.clone(),
                config.tts_voice.clone(),
            )?) as Arc<dyn Synthesize>),
            None => None,
        };

        Ok(Self::new(stt, chat, tts))
    }

    #[must_use]
    pub const fn state(&self) -> TurnState {
        self.state
    }

    /// Current transcript, chronological
    #[must_use]
    pub fn transcript(&self) -> &[Message] {
        self.transcript.messages()
    }

    /// Mark a recording in progress
    pub fn begin_capture(&mut self) {
        self.state = TurnState::Capturing;
    }

    /// Run a text-submitted turn
    ///
    /// The turn skips capture and transcription and begins at completion.
    ///
    /// # Errors
    ///
    /// `Config` when the completion or synthesis credential is missing
    /// (surfaced before any network attempt) and `InvalidInput` for empty
    /// text; both leave the transcript untouched. Completion and synthesis
    /// failures do not error — see [`TurnResult`].
    pub async fn submit_text(&mut self, text: &str) -> Result<TurnResult> {
        let chat = self.require_chat()?;
        self.require_tts()?;

        if text.trim().is_empty() {
            return Err(Error::InvalidInput("empty message".to_string()));
        }

        Ok(self.run_reply_phase(chat, text).await)
    }

    /// Run a voice-submitted turn from already-drained capture chunks
    ///
    /// # Errors
    ///
    /// `Config` when any of the three credentials is missing (surfaced
    /// before any network attempt, transcript untouched). A transcription
    /// failure aborts the turn with zero messages appended; this includes
    /// `InvalidInput` for an empty assembled blob.
    pub async fn submit_voice(&mut self, chunks: &[AudioChunk]) -> Result<TurnResult> {
        let stt = Arc::clone(self.stt.as_ref().ok_or_else(|| {
            Error::Config("GROQ_API_KEY required for transcription".to_string())
        })?);
        let chat = self.require_chat()?;
        self.require_tts()?;

        self.state = TurnState::Transcribing;
        let blob = assemble(chunks);

        let text = match stt.transcribe(&blob, "audio/wav").await {
            Ok(text) => text,
            Err(e) => {
                // Turn never started: nothing was appended
                self.state = TurnState::Failed;
                return Err(e);
            }
        };

        Ok(self.run_reply_phase(chat, &text).await)
    }

    /// Drain a capture and run the voice turn on the collected chunks
    ///
    /// Suspends at the drain barrier until the producer signals stop by
    /// dropping its sender.
    ///
    /// # Errors
    ///
    /// As [`Self::submit_voice`].
    pub async fn submit_capture(
        &mut self,
        receiver: mpsc::UnboundedReceiver<AudioChunk>,
    ) -> Result<TurnResult> {
        self.state = TurnState::Capturing;
        let chunks = drain(receiver).await;
        self.submit_voice(&chunks).await
    }

    fn require_chat(&self) -> Result<Arc<dyn Complete>> {
        self.chat.as_ref().map(Arc::clone).ok_or_else(|| {
            Error::Config("OPENAI_API_KEY required for chat completions".to_string())
        })
    }

    fn require_tts(&self) -> Result<()> {
        if self.tts.is_none() {
            return Err(Error::Config(
                "CARTESIA_API_KEY required for speech synthesis".to_string(),
            ));
        }
        Ok(())
    }

    /// Completion, transcript mutation, and best-effort synthesis — shared
    /// by the text and voice paths.
    async fn run_reply_phase(&mut self, chat: Arc<dyn Complete>, user_text: &str) -> TurnResult {
        self.state = TurnState::Completing;

        // The user message lands before the completion call so a failed call
        // can never leave it unappended. History is snapshotted first so the
        // current message is not transmitted twice.
        let history = self.transcript.snapshot();
        self.transcript.push_user(user_text);

        match chat.complete(user_text, &history).await {
            Ok(reply) => {
                self.transcript.push_assistant(reply.clone());
                self.state = TurnState::Synthesizing;
                let audio = self.synthesize_reply(&reply).await;
                self.state = TurnState::Ready;
                TurnResult {
                    messages: self.transcript.snapshot(),
                    reply,
                    audio,
                    state: TurnState::Ready,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "completion failed, appending fallback reply");
                let fallback = e.user_message().to_string();
                self.transcript.push_assistant(fallback.clone());
                self.state = TurnState::Failed;
                TurnResult {
                    messages: self.transcript.snapshot(),
                    reply: fallback,
                    audio: None,
                    state: TurnState::Failed,
                }
            }
        }
    }

    /// Synthesis is best-effort: a failure degrades the turn to text-only
    /// rather than discarding the reply.
    async fn synthesize_reply(&self, reply: &str) -> Option<Vec<u8>> {
        let tts = self.tts.as_ref()?;
        match tts.synthesize(reply).await {
            Ok(raw) => Some(transcode(&raw, self.sample_rate, 1)),
            Err(e) => {
                tracing::warn!(error = %e, "synthesis failed, returning text-only turn");
                None
            }
        }
    }
}
