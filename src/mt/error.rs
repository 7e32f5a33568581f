/// Error types for the translation agent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MtError {
    /// Missing or unusable configuration (API key, base URL)
    ConfigError(String),
    /// Input was empty or whitespace only; no call is attempted
    EmptyInput,
    /// Transport failure talking to the completion endpoint
    NetworkError(String),
    /// The endpoint rejected the request (4xx, usually a bad key)
    AuthError(String),
    /// The endpoint answered but the body had no usable text
    MalformedResponse(String),
    /// Upstream server error or other failed completion
    TranslationError(String),
    /// The bridge could not create or drive a scheduler
    Runtime(String),
}

impl std::fmt::Display for MtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MtError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            MtError::EmptyInput => write!(f, "Input text is empty"),
            MtError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            MtError::AuthError(msg) => write!(f, "Authentication error: {}", msg),
            MtError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            MtError::TranslationError(msg) => write!(f, "Translation error: {}", msg),
            MtError::Runtime(msg) => write!(f, "Runtime error: {}", msg),
        }
    }
}

impl std::error::Error for MtError {}

impl From<reqwest::Error> for MtError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MtError::NetworkError(format!("request timed out: {}", err))
        } else if err.is_decode() {
            MtError::MalformedResponse(err.to_string())
        } else {
            MtError::NetworkError(err.to_string())
        }
    }
}

impl From<crate::mt::bridge::BridgeError> for MtError {
    fn from(err: crate::mt::bridge::BridgeError) -> Self {
        MtError::Runtime(err.to_string())
    }
}

/// Result type for translation operations
pub type MtResult<T> = Result<T, MtError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::bridge::BridgeError;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            MtError::ConfigError("GEMINI_API_KEY is not set".to_string()).to_string(),
            "Configuration error: GEMINI_API_KEY is not set"
        );
        assert_eq!(MtError::EmptyInput.to_string(), "Input text is empty");
        assert!(
            MtError::AuthError("401".to_string())
                .to_string()
                .starts_with("Authentication error")
        );
    }

    #[test]
    fn test_bridge_error_maps_to_runtime() {
        let err: MtError = BridgeError::WorkerPanicked.into();
        match err {
            MtError::Runtime(msg) => assert!(msg.contains("panicked")),
            other => panic!("Expected Runtime error, got {:?}", other),
        }
    }
}
