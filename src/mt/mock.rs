//! Mock completion provider for testing
//!
//! This module provides a deterministic, API-free provider for exercising
//! the form and the bridge without API keys or network access. Every call
//! is recorded so tests can assert how many outbound runs happened and
//! what they carried.
//!
//! # Example
//!
//! ```ignore
//! use urdu_translator::mt::{Agent, CompletionProvider, MockMode, MockProvider};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockProvider::new(MockMode::Fixed("سلام".to_string()));
//!     let run = mock.complete(&Agent::urdu_translator(), "hello").await.unwrap();
//!     assert_eq!(run.final_output, "سلام");
//!     assert_eq!(mock.call_count(), 1);
//! }
//! ```

use crate::mt::agent::{Agent, RunResult};
use crate::mt::error::{MtError, MtResult};
use crate::mt::provider::CompletionProvider;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock response modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Always answer with the same text
    Fixed(String),

    /// Answer with the input unchanged
    Echo,

    /// Predefined input → output pairs, echoing anything unknown
    Mappings(HashMap<String, String>),

    /// Fail every run with this error
    Error(MtError),
}

/// One recorded run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub instructions: String,
    pub input: String,
}

/// Mock provider that simulates completion runs
///
/// Clones share the same call log.
#[derive(Debug, Clone)]
pub struct MockProvider {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl MockProvider {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a MockProvider with simulated network delay
    ///
    /// ```ignore
    /// let mock = MockProvider::with_delay(MockMode::Echo, 50);
    /// // Each run will take ~50ms
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Snapshot of every run made so far, oldest first
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|calls| calls.len()).unwrap_or(0)
    }

    /// Internal helper to apply the simulated delay
    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn record(&self, agent: &Agent, input: &str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                instructions: agent.instructions.clone(),
                input: input.to_string(),
            });
        }
    }

    fn respond(&self, input: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Fixed(text) => Ok(text.clone()),
            MockMode::Echo => Ok(input.to_string()),
            MockMode::Mappings(map) => Ok(map
                .get(input)
                .cloned()
                .unwrap_or_else(|| input.to_string())),
            MockMode::Error(err) => Err(err.clone()),
        }
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(&self, agent: &Agent, input: &str) -> MtResult<RunResult> {
        self.record(agent, input);
        self.apply_delay().await;

        Ok(RunResult {
            final_output: self.respond(input)?,
            model: "mock".to_string(),
        })
    }

    fn provider_name(&self) -> &str {
        "Mock Provider"
    }
}
