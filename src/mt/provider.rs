//! Completion provider trait
//!
//! This module defines the `CompletionProvider` trait for backend
//! abstraction, so the form can run an agent against Gemini, a mock, or
//! any other chat-completions service without knowing which.
//!
//! # Example
//!
//! ```ignore
//! use urdu_translator::mt::{Agent, CompletionProvider, GeminiProvider};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GeminiProvider::from_env()?;
//!     let result = provider
//!         .complete(&Agent::urdu_translator(), "Hello, how are you?")
//!         .await?;
//!     println!("{}", result.final_output);
//!     Ok(())
//! }
//! ```

use crate::mt::agent::{Agent, RunResult};
use crate::mt::error::MtResult;
use async_trait::async_trait;

/// Generic trait for chat-completion backends
///
/// Implementations send the agent's instructions as the system message and
/// `input` as the single user message, and return the model's text.
/// A provider performs no retries; any failure is returned to the caller.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Run `agent` once over `input`
    ///
    /// # Returns
    ///
    /// * `Ok(RunResult)` - The model's final output
    /// * `Err(MtError)` - Network, auth, or malformed-response failure
    async fn complete(&self, agent: &Agent, input: &str) -> MtResult<RunResult>;

    /// Get the name of this provider
    ///
    /// Used for logging to identify which backend handled a run.
    fn provider_name(&self) -> &str;
}
