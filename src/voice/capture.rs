//! Captured audio chunk assembly
//!
//! Capture itself is an external producer (microphone, browser recorder)
//! pushing chunks through a channel; dropping the sender is the stop signal.
//! [`drain`] is the single synchronization barrier between capture and
//! transcription: it returns only once the channel is closed and every
//! buffered chunk has been collected, so stopping mid-recording still
//! flushes whatever was buffered.

use tokio::sync::mpsc;

/// One captured audio chunk: opaque bytes plus a capture ordinal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    pub seq: u64,
    pub data: Vec<u8>,
}

impl AudioChunk {
    #[must_use]
    pub const fn new(seq: u64, data: Vec<u8>) -> Self {
        Self { seq, data }
    }
}

/// Collect every chunk from a capture, in arrival order
///
/// Suspends until the producer drops its sender (the stop signal). Chunks
/// already buffered in the channel are never discarded.
pub async fn drain(mut receiver: mpsc::UnboundedReceiver<AudioChunk>) -> Vec<AudioChunk> {
    let mut chunks = Vec::new();
    while let Some(chunk) = receiver.recv().await {
        chunks.push(chunk);
    }
    tracing::debug!(chunks = chunks.len(), "capture drained");
    chunks
}

/// Concatenate chunk bytes in arrival order into one transcription blob
#[must_use]
pub fn assemble(chunks: &[AudioChunk]) -> Vec<u8> {
    let total = chunks.iter().map(|c| c.data.len()).sum();
    let mut blob = Vec::with_capacity(total);
    for chunk in chunks {
        blob.extend_from_slice(&chunk.data);
    }
    blob
}
