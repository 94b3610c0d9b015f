//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `DUNGEONGPT_DATA_DIR` and `DUNGEONGPT_LOG_LEVEL` env
//! overrides. The API key is read from `OPENAI_API_KEY` only — never from
//! TOML.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::AppError;

/// OpenAI / OpenAI-compatible provider configuration.
/// Populated from `[llm.openai]` in the TOML.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    /// Upper bound on generated tokens per reply.
    pub max_output_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM subsystem configuration.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Which provider is active (`"dummy"` or `"openai"`).
    /// Maps to `default` in `[llm]` TOML.
    pub provider: String,
    /// System-message persona sent with every generation call.
    pub role_instruction: String,
    pub openai: OpenAiConfig,
}

/// Fully-resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for all persistent data (already expanded, no `~`).
    pub data_dir: PathBuf,
    pub log_level: String,
    /// Word budget for the conversation-history window in prompts.
    pub history_budget: usize,
    pub llm: LlmConfig,
    /// API key from `OPENAI_API_KEY` env var — `None` for keyless local
    /// endpoints and the dummy provider.
    pub api_key: Option<String>,
}

impl Config {
    /// Directory holding one JSON file per character sheet.
    pub fn characters_dir(&self) -> PathBuf {
        self.data_dir.join("characters")
    }

    /// Directory holding save bundles and their chat logs.
    pub fn saves_dir(&self) -> PathBuf {
        self.data_dir.join("saves")
    }
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    game: RawGame,
    #[serde(default)]
    llm: RawLlm,
}

#[derive(Deserialize)]
struct RawGame {
    #[serde(default = "default_data_dir")]
    data_dir: String,
    #[serde(default = "default_log_level")]
    log_level: String,
    #[serde(default = "default_history_budget")]
    history_budget: usize,
}

impl Default for RawGame {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            history_budget: default_history_budget(),
        }
    }
}

#[derive(Deserialize)]
struct RawLlm {
    /// Maps to `default = "..."` in `[llm]`.
    #[serde(rename = "default", default = "default_llm_provider")]
    provider: String,
    #[serde(default = "default_role_instruction")]
    role_instruction: String,
    #[serde(default)]
    openai: RawOpenAiConfig,
}

impl Default for RawLlm {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            role_instruction: default_role_instruction(),
            openai: RawOpenAiConfig::default(),
        }
    }
}

#[derive(Deserialize)]
struct RawOpenAiConfig {
    #[serde(default = "default_openai_api_base_url")]
    api_base_url: String,
    #[serde(default = "default_openai_model")]
    model: String,
    #[serde(default = "default_openai_max_output_tokens")]
    max_output_tokens: u32,
    #[serde(default = "default_openai_temperature")]
    temperature: f32,
    #[serde(default = "default_openai_timeout_seconds")]
    timeout_seconds: u64,
}

impl Default for RawOpenAiConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_openai_api_base_url(),
            model: default_openai_model(),
            max_output_tokens: default_openai_max_output_tokens(),
            temperature: default_openai_temperature(),
            timeout_seconds: default_openai_timeout_seconds(),
        }
    }
}

fn default_data_dir() -> String { "~/.dungeongpt".to_string() }
fn default_log_level() -> String { "info".to_string() }
fn default_history_budget() -> usize { 15_000 }
fn default_llm_provider() -> String { "openai".to_string() }
fn default_role_instruction() -> String { "You are an expert dungeon master.".to_string() }
fn default_openai_api_base_url() -> String { "https://api.openai.com/v1/chat/completions".to_string() }
fn default_openai_model() -> String { "gpt-4o".to_string() }
fn default_openai_max_output_tokens() -> u32 { 16_384 }
fn default_openai_temperature() -> f32 { 0.7 }
fn default_openai_timeout_seconds() -> u64 { 60 }

/// Load config from `config/default.toml`, then apply env-var overrides.
/// A missing config file is not an error — defaults apply.
pub fn load() -> Result<Config, AppError> {
    let data_dir_override = env::var("DUNGEONGPT_DATA_DIR").ok();
    let log_level_override = env::var("DUNGEONGPT_LOG_LEVEL").ok();
    load_from(
        Path::new("config/default.toml"),
        data_dir_override.as_deref(),
        log_level_override.as_deref(),
    )
}

/// Internal loader — accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    data_dir_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, AppError> {
    let parsed: RawConfig = if path.exists() {
        let raw = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| AppError::Config(format!("parse error in {}: {e}", path.display())))?
    } else {
        RawConfig::default()
    };

    let data_dir_str = data_dir_override.unwrap_or(&parsed.game.data_dir).to_string();
    let data_dir = expand_home(&data_dir_str);
    let log_level = log_level_override.unwrap_or(&parsed.game.log_level).to_string();

    Ok(Config {
        data_dir,
        log_level,
        history_budget: parsed.game.history_budget,
        llm: LlmConfig {
            provider: parsed.llm.provider,
            role_instruction: parsed.llm.role_instruction,
            openai: OpenAiConfig {
                api_base_url: parsed.llm.openai.api_base_url,
                model: parsed.llm.openai.model,
                max_output_tokens: parsed.llm.openai.max_output_tokens,
                temperature: parsed.llm.openai.temperature,
                timeout_seconds: parsed.llm.openai.timeout_seconds,
            },
        },
        api_key: env::var("OPENAI_API_KEY").ok(),
    })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

// ── test helpers ──────────────────────────────────────────────────────────────

/// Safe `Config` for unit tests — dummy LLM, no API key, no external calls.
#[cfg(test)]
impl Config {
    pub fn test_default(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
            log_level: "info".into(),
            history_budget: 15_000,
            llm: LlmConfig {
                provider: "dummy".into(),
                role_instruction: "You are an expert dungeon master.".into(),
                openai: OpenAiConfig {
                    api_base_url: "http://localhost:0/v1/chat/completions".into(),
                    model: "test-model".into(),
                    max_output_tokens: 64,
                    temperature: 0.0,
                    timeout_seconds: 1,
                },
            },
            api_key: None,
        }
    }
}
