//! Voice processing module
//!
//! Capture chunk assembly, transcription, speech synthesis, and the PCM
//! transcoding step that turns raw synthesis output into a playable WAV
//! container.

mod capture;
mod stt;
mod transcode;
mod tts;

pub use capture::{AudioChunk, assemble, drain};
pub use stt::{SpeechToText, Transcribe};
pub use transcode::{SYNTH_SAMPLE_RATE, WAV_HEADER_LEN, transcode, wav_header};
pub use tts::{Synthesize, TextToSpeech};
