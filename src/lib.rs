//! Confab - voice conversation turn pipeline for AI assistants
//!
//! One turn takes user input (typed text or captured audio) through
//! transcription, chat completion, and speech synthesis, and hands back an
//! updated transcript plus a playable WAV rendition of the reply.
//!
//! # Architecture
//!
//! ```text
//! capture ──► drain ──► transcribe ──► complete ──► synthesize ──► transcode
//!   (chunks)  (barrier)      │             │                           │
//!                            ▼             ▼                           ▼
//!                      user message   assistant message          playable WAV
//! ```
//!
//! Remote services are reached through the [`Transcribe`], [`Complete`] and
//! [`Synthesize`] traits; the bundled implementations call Groq-hosted
//! Whisper, `OpenAI` chat completions, and Cartesia speech synthesis. The
//! [`Orchestrator`] owns the transcript and runs one turn at a time.

pub mod chat;
pub mod config;
pub mod error;
pub mod transcript;
pub mod turn;
pub mod voice;

pub use chat::{ChatCompletion, Complete, EMPTY_REPLY_FALLBACK};
pub use config::{ApiKeys, Config, SYSTEM_PROMPT};
pub use error::{Error, Result};
pub use transcript::{Message, Sender, Transcript};
pub use turn::{Orchestrator, TurnResult, TurnState};
pub use voice::{
    AudioChunk, SYNTH_SAMPLE_RATE, SpeechToText, Synthesize, TextToSpeech, Transcribe,
};
