//! Agent definitions and run results

use serde::{Deserialize, Serialize};

/// Instruction given to the translator agent on every run
pub const URDU_INSTRUCTIONS: &str = "Translate the given English word, name, or sentence into Urdu only. Do not return any explanation or English text—just the Urdu translation.";

/// A named set of instructions sent as the system message of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub instructions: String,
}

impl Agent {
    pub fn new(name: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
        }
    }

    /// The English → Urdu translator
    pub fn urdu_translator() -> Self {
        Self::new("Translator Agent", URDU_INSTRUCTIONS)
    }
}

/// Outcome of one agent run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    /// The model's final text, unmodified
    pub final_output: String,
    /// Model identifier that produced the output
    pub model: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urdu_translator_agent() {
        let agent = Agent::urdu_translator();
        assert_eq!(agent.name, "Translator Agent");
        assert!(agent.instructions.starts_with("Translate the given English"));
        assert!(agent.instructions.contains("into Urdu only"));
    }
}
