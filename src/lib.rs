//! English → Urdu translation agent
//!
//! A form takes a block of English text, runs a fixed-instruction agent on
//! it through a chat-completions provider, and shows the reply. The form's
//! submit handler is synchronous; [`mt::bridge`] makes the one async call
//! complete before the handler returns, with or without a running tokio
//! runtime.
//!
//! ```ignore
//! use std::sync::Arc;
//! use urdu_translator::{FormOutcome, TranslatorForm};
//! use urdu_translator::mt::GeminiProvider;
//!
//! let form = TranslatorForm::new(Arc::new(GeminiProvider::from_env()?));
//! if let FormOutcome::Success { translation } = form.submit("Hello, how are you?") {
//!     println!("{}", FormOutcome::result_line(&translation));
//! }
//! ```

pub mod form;
pub mod mt;

pub use form::{FormOutcome, TranslationRequest, TranslatorForm};
