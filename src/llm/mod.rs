//! Generation collaborator abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! The whole application is single-threaded and event-driven by user input,
//! so `generate` is a plain blocking call — exactly one request is ever in
//! flight.

pub mod providers;

use thiserror::Error;

use crate::config::Config;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Options ───────────────────────────────────────────────────────────────────

/// Per-call generation options.
///
/// `role_instruction` travels as the system message; everything else maps
/// onto the chat-completion request body.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub role_instruction: String,
}

impl GenerateOptions {
    /// Options for the in-session Dungeon Master replies.
    pub fn narration(config: &Config) -> Self {
        Self {
            model: config.llm.openai.model.clone(),
            max_output_tokens: config.llm.openai.max_output_tokens,
            temperature: config.llm.openai.temperature,
            role_instruction: config.llm.role_instruction.clone(),
        }
    }

    /// Options for character auto-generation — same model, but the persona
    /// asks for original content only (the reply must be bare JSON).
    pub fn sheet_generation(config: &Config) -> Self {
        Self {
            role_instruction: "You are a dungeon master. You will create original text only."
                .to_string(),
            ..Self::narration(config)
        }
    }
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects. Adding a backend = new module +
/// new variant + new `generate` arm.
#[derive(Debug)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    OpenAi(providers::openai::OpenAiProvider),
}

impl LlmProvider {
    /// Build the provider selected by `config.llm.provider`.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        match config.llm.provider.as_str() {
            "dummy" => Ok(LlmProvider::Dummy(providers::dummy::DummyProvider::new())),
            "openai" => {
                let p = providers::openai::OpenAiProvider::new(
                    config.llm.openai.api_base_url.clone(),
                    config.llm.openai.timeout_seconds,
                    config.api_key.clone(),
                )?;
                Ok(LlmProvider::OpenAi(p))
            }
            other => Err(ProviderError::UnknownProvider(other.to_string())),
        }
    }

    /// Send `prompt` to the provider and return its text reply.
    pub fn generate(&self, prompt: &str, opts: &GenerateOptions) -> Result<String, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.generate(prompt, opts),
            LlmProvider::OpenAi(p) => p.generate(prompt, opts),
        }
    }
}
