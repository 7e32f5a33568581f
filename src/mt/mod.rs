/// Agent runs against remote completion services
///
/// This module runs a fixed-instruction agent over one piece of user text
/// and returns the model's reply, either from inside async code or from a
/// synchronous event handler through the bridge.
///
/// # Overview
///
/// 1. **Agent** - A name and the instructions sent as the system message
/// 2. **Provider Trait & Backends** - `CompletionProvider` with Gemini and mock implementations
/// 3. **Bridge** - Drives one future to completion from a synchronous caller
///
/// # Example
///
/// ```ignore
/// use urdu_translator::mt::{Agent, CompletionProvider, GeminiProvider, run_to_completion};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let provider = GeminiProvider::from_env()?;
///     let agent = Agent::urdu_translator();
///
///     let run = run_to_completion(provider.complete(&agent, "Hello, how are you?"))??;
///     println!("{}", run.final_output);
///     Ok(())
/// }
/// ```
pub mod agent;
pub mod bridge;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod provider;

// Local HTTP stub (only available during testing)
#[cfg(test)]
pub(crate) mod stub_server;

pub use agent::{Agent, RunResult, URDU_INSTRUCTIONS};
pub use bridge::{BridgeError, SchedulerContext, run_to_completion};
pub use error::{MtError, MtResult};
pub use gemini::{GeminiProvider, ProviderConfig};
pub use mock::{MockMode, MockProvider, RecordedCall};
pub use provider::CompletionProvider;
