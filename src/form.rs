//! The translator form, independent of how it is rendered
//!
//! A renderer (terminal or HTML) owns the widgets; this module owns what
//! they say and what happens on submit. `submit` is synchronous and is
//! meant to be called straight from an event handler: the completion run
//! goes through the bridge, so the handler returns only after it resolves.

use std::sync::Arc;
use tracing::{error, info};

use crate::mt::bridge::run_to_completion;
use crate::mt::{Agent, CompletionProvider, MtError, MtResult};

pub const PAGE_TITLE: &str = "English to Urdu Translator";
pub const HEADING: &str = "🤖AI Translator Agent (Powered By GEMINI)";
pub const INTRO: &str = "Type any English Text and Sentence and click Translate to see it in Urdu.";
pub const INPUT_LABEL: &str = "✍️ Enter your Text :";
pub const BUTTON_LABEL: &str = "🔁 Translate";
pub const SPINNER_TEXT: &str = "Translating...";
pub const EMPTY_WARNING: &str = "Please enter some text to translate.";
pub const SUCCESS_BANNER: &str = "Translation:";
pub const RESULT_LABEL: &str = "📘 Urdu:";
pub const FAILURE_MESSAGE: &str = "Translation failed. Please try again.";

/// What the page shows after one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// Blank input, nothing was sent
    Warning { message: String },
    /// The provider's text, verbatim
    Success { translation: String },
    /// The run failed; details went to the log
    Failure { message: String },
}

impl FormOutcome {
    /// Result line as shown under the success banner
    pub fn result_line(translation: &str) -> String {
        format!("{} {}", RESULT_LABEL, translation)
    }
}

/// Input validated as non-blank, kept exactly as typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest(String);

impl TranslationRequest {
    pub fn parse(input: &str) -> MtResult<Self> {
        if input.trim().is_empty() {
            return Err(MtError::EmptyInput);
        }
        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The translator form: one agent and one provider, both fixed at startup
#[derive(Clone)]
pub struct TranslatorForm {
    agent: Agent,
    provider: Arc<dyn CompletionProvider>,
}

impl TranslatorForm {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self::with_agent(Agent::urdu_translator(), provider)
    }

    pub fn with_agent(agent: Agent, provider: Arc<dyn CompletionProvider>) -> Self {
        Self { agent, provider }
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    /// Validate `input` and run the agent on it, blocking until done
    ///
    /// Remote failures are returned exactly as the provider produced them.
    pub fn translate(&self, input: &str) -> MtResult<String> {
        let request = TranslationRequest::parse(input)?;
        let provider = Arc::clone(&self.provider);
        let agent = &self.agent;

        let run = run_to_completion(async move {
            provider.complete(agent, request.as_str()).await
        })??;

        Ok(run.final_output)
    }

    /// Handle one click of the translate button
    pub fn submit(&self, input: &str) -> FormOutcome {
        match self.translate(input) {
            Ok(translation) => {
                info!(
                    provider = self.provider_name(),
                    chars = input.chars().count(),
                    "translation succeeded"
                );
                FormOutcome::Success { translation }
            }
            Err(MtError::EmptyInput) => FormOutcome::Warning {
                message: EMPTY_WARNING.to_string(),
            },
            Err(e) => {
                error!(provider = self.provider_name(), "translation failed: {}", e);
                FormOutcome::Failure {
                    message: FAILURE_MESSAGE.to_string(),
                }
            }
        }
    }
}

impl std::fmt::Debug for TranslatorForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslatorForm")
            .field("agent", &self.agent.name)
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::{MockMode, MockProvider, URDU_INSTRUCTIONS};

    fn form_with(mock: &MockProvider) -> TranslatorForm {
        TranslatorForm::new(Arc::new(mock.clone()))
    }

    // ========== Validation ==========

    #[test]
    fn test_request_rejects_blank_input() {
        assert_eq!(TranslationRequest::parse(""), Err(MtError::EmptyInput));
        assert_eq!(TranslationRequest::parse(" \n\t "), Err(MtError::EmptyInput));
    }

    #[test]
    fn test_request_keeps_raw_text() {
        let request = TranslationRequest::parse("  Hello  ").unwrap();
        assert_eq!(request.as_str(), "  Hello  ");
    }

    #[test]
    fn test_blank_input_warns_without_calling() {
        let mock = MockProvider::new(MockMode::Echo);
        let form = form_with(&mock);

        for input in ["", "   ", "\n\n"] {
            assert_eq!(
                form.submit(input),
                FormOutcome::Warning {
                    message: EMPTY_WARNING.to_string()
                }
            );
        }
        assert_eq!(mock.call_count(), 0);
    }

    // ========== Submission ==========

    #[test]
    fn test_submit_makes_exactly_one_call() {
        let mock = MockProvider::new(MockMode::Fixed("ہیلو، آپ کیسے ہیں؟".to_string()));
        let form = form_with(&mock);

        let outcome = form.submit("Hello, how are you?");
        assert_eq!(
            outcome,
            FormOutcome::Success {
                translation: "ہیلو، آپ کیسے ہیں؟".to_string()
            }
        );

        let calls = mock.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].input, "Hello, how are you?");
        assert_eq!(calls[0].instructions, URDU_INSTRUCTIONS);
    }

    #[test]
    fn test_result_rendered_verbatim_after_label() {
        let opaque = "  <b>not parsed</b>\n".to_string();
        let mock = MockProvider::new(MockMode::Fixed(opaque.clone()));
        let form = form_with(&mock);

        match form.submit("anything") {
            FormOutcome::Success { translation } => {
                assert_eq!(translation, opaque);
                assert_eq!(
                    FormOutcome::result_line(&translation),
                    format!("📘 Urdu: {}", opaque)
                );
            }
            other => panic!("Expected Success, got {:?}", other),
        }
    }

    #[test]
    fn test_sequential_submissions_are_independent() {
        let mock = MockProvider::new(MockMode::Echo);
        let form = form_with(&mock);

        assert_eq!(form.translate("one").unwrap(), "one");
        assert_eq!(form.translate("two").unwrap(), "two");
        let inputs: Vec<String> = mock.calls().into_iter().map(|c| c.input).collect();
        assert_eq!(inputs, vec!["one", "two"]);
    }

    // ========== Failures ==========

    #[test]
    fn test_translate_propagates_remote_error_unchanged() {
        let err = MtError::NetworkError("connection refused".to_string());
        let mock = MockProvider::new(MockMode::Error(err.clone()));
        let form = form_with(&mock);

        assert_eq!(form.translate("Hello"), Err(err));
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn test_submit_shows_generic_failure() {
        let mock = MockProvider::new(MockMode::Error(MtError::AuthError(
            "API key not valid".to_string(),
        )));
        let form = form_with(&mock);

        match form.submit("Hello") {
            FormOutcome::Failure { message } => {
                assert_eq!(message, FAILURE_MESSAGE);
                assert!(!message.contains("API key"));
            }
            other => panic!("Expected Failure, got {:?}", other),
        }
    }

    // ========== Calling Contexts ==========

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_submit_from_multi_thread_handler() {
        let mock = MockProvider::with_delay(MockMode::Fixed("شکریہ".to_string()), 5);
        let form = form_with(&mock);
        assert_eq!(
            form.submit("Thank you"),
            FormOutcome::Success {
                translation: "شکریہ".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_submit_from_current_thread_handler() {
        let mock = MockProvider::with_delay(MockMode::Echo, 5);
        let form = form_with(&mock);
        assert_eq!(form.translate("Good night").unwrap(), "Good night");
    }

    #[tokio::test]
    async fn test_translate_after_direct_await_on_current_thread_runtime() {
        use crate::mt::stub_server::StubServer;
        use crate::mt::{GeminiProvider, ProviderConfig};
        use std::time::{Duration, Instant};

        let stub = StubServer::completion("اردو");
        let mut config = ProviderConfig::new("stub-key")
            .unwrap()
            .with_base_url(stub.base_url.clone());
        config.timeout = Duration::from_secs(5);
        let provider = Arc::new(GeminiProvider::new(config).unwrap());

        // The first run is awaited on this runtime; nothing it opened may
        // be needed once the form blocks the runtime below
        let direct = provider
            .complete(&Agent::urdu_translator(), "Urdu")
            .await
            .unwrap();
        assert_eq!(direct.final_output, "اردو");

        let form = TranslatorForm::new(provider.clone());
        let start = Instant::now();
        assert_eq!(form.translate("Hello").unwrap(), "اردو");
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(stub.requests().len(), 2);
    }

    #[test]
    fn test_debug_shows_provider() {
        let form = form_with(&MockProvider::new(MockMode::Echo));
        let debug_str = format!("{:?}", form);
        assert!(debug_str.contains("Translator Agent"));
        assert!(debug_str.contains("Mock Provider"));
    }
}
