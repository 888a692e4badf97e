//! Turn orchestration integration tests
//!
//! Exercises the full turn state machine with mock clients, no network or
//! audio hardware required.

use std::sync::Arc;

use confab::{AudioChunk, Error, Orchestrator, Sender, TurnState};
use tokio::sync::mpsc;

mod common;

use common::{
    FailingChat, FailingSynth, FailingTranscriber, FixedSynth, FixedTranscriber, RecordingChat,
};

fn orchestrator(
    stt: Option<Arc<dyn confab::Transcribe>>,
    chat: Option<Arc<dyn confab::Complete>>,
    tts: Option<Arc<dyn confab::Synthesize>>,
) -> Orchestrator {
    Orchestrator::new(stt, chat, tts)
}

fn full_orchestrator(reply: &'static str) -> Orchestrator {
    orchestrator(
        Some(Arc::new(FixedTranscriber("what time is it?"))),
        Some(Arc::new(RecordingChat::new(reply))),
        Some(Arc::new(FixedSynth(vec![0.0, 0.5, -0.5]))),
    )
}

#[tokio::test]
async fn test_text_turn_success() {
    let mut orch = full_orchestrator("It's noon.");

    let result = orch.submit_text("what time is it?").await.unwrap();

    assert_eq!(result.state, TurnState::Ready);
    assert_eq!(result.reply, "It's noon.");
    assert_eq!(result.messages.len(), 2);
    assert_eq!(result.messages[0].sender, Sender::User);
    assert_eq!(result.messages[0].text, "what time is it?");
    assert_eq!(result.messages[1].sender, Sender::Assistant);
    assert_eq!(result.messages[1].text, "It's noon.");

    // 3 synthesized samples -> 44-byte header + 6 bytes of i16 PCM
    let audio = result.audio.expect("audio expected on a full turn");
    assert_eq!(audio.len(), 44 + 6);
    assert_eq!(&audio[0..4], b"RIFF");
    assert_eq!(orch.state(), TurnState::Ready);
}

#[tokio::test]
async fn test_voice_turn_success() {
    let mut orch = full_orchestrator("It's noon.");

    let chunks = vec![
        AudioChunk::new(0, vec![1, 2, 3]),
        AudioChunk::new(1, vec![4, 5]),
    ];
    let result = orch.submit_voice(&chunks).await.unwrap();

    assert_eq!(result.state, TurnState::Ready);
    assert_eq!(result.messages.len(), 2);
    // The user message is the transcript, not the raw audio
    assert_eq!(result.messages[0].text, "what time is it?");
    assert!(result.audio.is_some());
}

#[tokio::test]
async fn test_voice_turn_via_capture_drain() {
    let mut orch = full_orchestrator("hello!");

    let (tx, rx) = mpsc::unbounded_channel();
    for seq in 0..4 {
        tx.send(AudioChunk::new(seq, vec![0u8; 16])).unwrap();
    }
    drop(tx); // stop signal

    let result = orch.submit_capture(rx).await.unwrap();
    assert_eq!(result.state, TurnState::Ready);
    assert_eq!(result.messages.len(), 2);
}

#[tokio::test]
async fn test_empty_audio_rejected_without_transcript_mutation() {
    let mut orch = full_orchestrator("unused");

    let result = orch.submit_voice(&[]).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(orch.transcript().is_empty());
}

#[tokio::test]
async fn test_empty_text_rejected_without_transcript_mutation() {
    let mut orch = full_orchestrator("unused");

    let result = orch.submit_text("   ").await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert!(orch.transcript().is_empty());
}

#[tokio::test]
async fn test_missing_transcription_credential_fails_before_voice_turn() {
    let mut orch = orchestrator(
        None,
        Some(Arc::new(RecordingChat::new("unused"))),
        Some(Arc::new(FixedSynth(vec![0.0]))),
    );

    let chunks = vec![AudioChunk::new(0, vec![1, 2, 3])];
    let result = orch.submit_voice(&chunks).await;

    match result {
        Err(Error::Config(msg)) => assert!(msg.contains("GROQ_API_KEY")),
        other => panic!("expected Config error, got {other:?}"),
    }
    assert!(orch.transcript().is_empty());
}

#[tokio::test]
async fn test_missing_synthesis_credential_fails_text_turn_fast() {
    let mut orch = orchestrator(None, Some(Arc::new(RecordingChat::new("unused"))), None);

    let result = orch.submit_text("hello").await;
    assert!(matches!(result, Err(Error::Config(_))));
    assert!(orch.transcript().is_empty());
}

#[tokio::test]
async fn test_transcription_failure_aborts_turn_with_zero_messages() {
    let mut orch = orchestrator(
        Some(Arc::new(FailingTranscriber)),
        Some(Arc::new(RecordingChat::new("unused"))),
        Some(Arc::new(FixedSynth(vec![0.0]))),
    );

    let chunks = vec![AudioChunk::new(0, vec![1, 2, 3])];
    let result = orch.submit_voice(&chunks).await;

    assert!(matches!(result, Err(Error::Upstream(_))));
    assert!(orch.transcript().is_empty());
    assert_eq!(orch.state(), TurnState::Failed);
}

#[tokio::test]
async fn test_completion_failure_appends_fallback_reply() {
    let mut orch = orchestrator(
        None,
        Some(Arc::new(FailingChat)),
        Some(Arc::new(FixedSynth(vec![0.0]))),
    );

    let result = orch.submit_text("hello").await.unwrap();

    assert_eq!(result.state, TurnState::Failed);
    assert!(result.audio.is_none());
    assert_eq!(result.messages.len(), 2);
    assert_eq!(result.messages[0].text, "hello");
    assert_eq!(result.messages[1].sender, Sender::Assistant);
    assert_eq!(result.messages[1].text, "Error: Could not get response.");
}

#[tokio::test]
async fn test_session_stays_usable_after_failed_turn() {
    let mut orch = orchestrator(
        None,
        Some(Arc::new(FailingChat)),
        Some(Arc::new(FixedSynth(vec![0.0]))),
    );

    orch.submit_text("first").await.unwrap();
    assert_eq!(orch.state(), TurnState::Failed);
    assert_eq!(orch.transcript().len(), 2);

    // The failure is per-turn: the next submission still runs and the
    // transcript keeps growing coherently
    let result = orch.submit_text("second").await.unwrap();
    assert_eq!(result.messages.len(), 4);
    assert_eq!(result.messages[2].text, "second");
    assert_eq!(result.messages[3].text, "Error: Could not get response.");
}

#[tokio::test]
async fn test_synthesis_failure_degrades_to_text_only() {
    let mut orch = orchestrator(
        None,
        Some(Arc::new(RecordingChat::new("still here"))),
        Some(Arc::new(FailingSynth)),
    );

    let result = orch.submit_text("hello").await.unwrap();

    // The reply is kept; only the audio is missing
    assert_eq!(result.state, TurnState::Ready);
    assert!(result.audio.is_none());
    assert_eq!(result.messages.len(), 2);
    assert_eq!(result.messages[1].text, "still here");
    assert_eq!(orch.state(), TurnState::Ready);
}

#[tokio::test]
async fn test_history_excludes_current_turn_message() {
    let chat = Arc::new(RecordingChat::new("ok"));
    let mut orch = orchestrator(
        None,
        Some(Arc::clone(&chat) as Arc<dyn confab::Complete>),
        Some(Arc::new(FixedSynth(vec![0.0]))),
    );

    orch.submit_text("one").await.unwrap();
    orch.submit_text("two").await.unwrap();

    // First call sees an empty history; the second sees exactly the first
    // turn's two messages, never its own user message.
    let lens = chat.history_lens.lock().unwrap();
    assert_eq!(*lens, vec![0, 2]);
}

#[tokio::test]
async fn test_transcript_grows_monotonically_across_turns() {
    let mut orch = full_orchestrator("ack");

    for i in 0..3 {
        let result = orch.submit_text(&format!("message {i}")).await.unwrap();
        assert_eq!(result.messages.len(), (i + 1) * 2);
    }

    let transcript = orch.transcript();
    assert_eq!(transcript[0].text, "message 0");
    assert_eq!(transcript[2].text, "message 1");
    assert_eq!(transcript[4].text, "message 2");
    for pair in transcript.chunks(2) {
        assert_eq!(pair[0].sender, Sender::User);
        assert_eq!(pair[1].sender, Sender::Assistant);
    }
}

#[tokio::test]
async fn test_begin_capture_marks_state() {
    let mut orch = full_orchestrator("unused");
    assert_eq!(orch.state(), TurnState::Idle);
    orch.begin_capture();
    assert_eq!(orch.state(), TurnState::Capturing);
}
