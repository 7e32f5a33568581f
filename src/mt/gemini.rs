//! Gemini provider over the OpenAI-compatible chat completions API
//!
//! Google exposes Gemini models behind an OpenAI-compatible endpoint, so
//! a run is a single `POST {base_url}/chat/completions` with the agent's
//! instructions as the system message and the user's text as the only
//! user message.
//!
//! # Authentication
//!
//! The provider loads the API key from the `GEMINI_API_KEY` environment
//! variable. `GEMINI_BASE_URL` and `GEMINI_MODEL` optionally override the
//! endpoint and model. The binaries call [`load_dotenv`] first, so all three
//! may also come from a `.env` file.
//!
//! # Example
//!
//! ```ignore
//! use urdu_translator::mt::{Agent, CompletionProvider, GeminiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::from_env()?;
//!     let run = provider.complete(&Agent::urdu_translator(), "Good morning").await?;
//!     println!("{}", run.final_output);
//!     Ok(())
//! }
//! ```

use crate::mt::agent::{Agent, RunResult};
use crate::mt::error::{MtError, MtResult};
use crate::mt::provider::CompletionProvider;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const BASE_URL_VAR: &str = "GEMINI_BASE_URL";
pub const MODEL_VAR: &str = "GEMINI_MODEL";

/// Load `.env` from the working directory or a parent into the process
/// environment, as the binaries do before reading configuration
///
/// Variables already set in the environment are not overridden. Returns the
/// file that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Immutable provider settings, built once at startup
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Settings with the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> MtResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Read settings through `lookup`, usually `std::env::var`
    ///
    /// A missing or blank key is a configuration error.
    pub fn from_lookup<F>(lookup: F) -> MtResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                MtError::ConfigError(format!(
                    "{} is not set. Please define it in your .env file or environment.",
                    API_KEY_VAR
                ))
            })?;

        let mut config = Self::new(api_key)?;
        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }
        if let Some(model) = lookup(MODEL_VAR).filter(|v| !v.trim().is_empty()) {
            config = config.with_model(model);
        }
        Ok(config)
    }

    pub fn from_env() -> MtResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Full chat completions URL
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Gemini chat completions provider
#[derive(Clone)]
pub struct GeminiProvider {
    config: ProviderConfig,
    /// HTTP client for async requests
    client: reqwest::Client,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> MtResult<Self> {
        // No idle pool: a pooled connection is driven by a task on whichever
        // runtime opened it, and the bridge may block that runtime later.
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Create a provider from `GEMINI_API_KEY` and the optional overrides
    pub fn from_env() -> MtResult<Self> {
        Self::new(ProviderConfig::from_env()?)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Build the request body for one run
    fn build_payload(&self, agent: &Agent, input: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": agent.instructions },
                { "role": "user", "content": input }
            ]
        })
    }

    /// Pull the upstream error message out of an error body
    ///
    /// Gemini sometimes wraps the error object in a one-element array.
    fn upstream_error_message(body: &str) -> Option<String> {
        let v: Value = serde_json::from_str(body).ok()?;
        v["error"]["message"]
            .as_str()
            .or_else(|| v[0]["error"]["message"].as_str())
            .map(|s| s.to_string())
    }

    /// Extract the assistant text from a successful response body
    fn parse_completion(&self, json: &Value) -> MtResult<RunResult> {
        if let Some(message) = json["error"]["message"].as_str() {
            return Err(MtError::TranslationError(format!("API error: {}", message)));
        }

        let final_output = json["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                MtError::MalformedResponse(
                    "missing 'choices[0].message.content' in completion".to_string(),
                )
            })?
            .to_string();

        let model = json["model"]
            .as_str()
            .unwrap_or(self.config.model.as_str())
            .to_string();

        Ok(RunResult {
            final_output,
            model,
        })
    }
}

impl std::fmt::Debug for GeminiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiProvider")
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    async fn complete(&self, agent: &Agent, input: &str) -> MtResult<RunResult> {
        let url = self.config.completions_url();
        let body = self.build_payload(agent, input);
        debug!(agent = %agent.name, model = %self.config.model, "sending completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = Self::upstream_error_message(&error_text).unwrap_or(error_text);

            return Err(if status.is_client_error() {
                MtError::AuthError(format!("API client error ({}): {}", status, message))
            } else {
                MtError::TranslationError(format!("API server error ({}): {}", status, message))
            });
        }

        let json: Value = response.json().await.map_err(|e| {
            MtError::MalformedResponse(format!("Failed to parse API response: {}", e))
        })?;

        self.parse_completion(&json)
    }

    fn provider_name(&self) -> &str {
        "Gemini"
    }
}
