//! Configuration for the turn pipeline
//!
//! The configuration struct is built once at process start and passed by
//! reference into the clients; core logic never reads credentials from the
//! environment on its own.

/// Fixed system instruction sent ahead of every completion request
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";

/// Turn pipeline configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API keys for the three service boundaries
    pub api_keys: ApiKeys,

    /// STT model identifier (Groq-hosted Whisper)
    pub stt_model: String,

    /// Chat completion model
    pub llm_model: String,

    /// System instruction prepended to every completion request
    pub system_prompt: String,

    /// Synthesis model
    pub tts_model: String,

    /// Synthesis voice identifier
    pub tts_voice: String,

    /// Send the whole transcript with each completion request instead of
    /// only the latest user message
    pub send_full_history: bool,
}

/// API keys for external services
#[derive(Debug, Clone, Default)]
pub struct ApiKeys {
    /// Groq API key (transcription)
    pub groq: Option<String>,

    /// `OpenAI` API key (chat completions)
    pub openai: Option<String>,

    /// Cartesia API key (speech synthesis)
    pub cartesia: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_keys: ApiKeys::default(),
            stt_model: "whisper-large-v3".to_string(),
            llm_model: "gpt-3.5-turbo".to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            tts_model: "sonic-english".to_string(),
            tts_voice: "b7d50908-b17c-442d-ad8d-810c63997ed9".to_string(),
            send_full_history: false,
        }
    }
}

impl Config {
    /// Load configuration from the environment
    ///
    /// Reads `GROQ_API_KEY`, `OPENAI_API_KEY` and `CARTESIA_API_KEY`. Empty
    /// values are treated as absent.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_keys: ApiKeys {
                groq: env_key("GROQ_API_KEY"),
                openai: env_key("OPENAI_API_KEY"),
                cartesia: env_key("CARTESIA_API_KEY"),
            },
            ..Self::default()
        }
    }
}

fn env_key(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
