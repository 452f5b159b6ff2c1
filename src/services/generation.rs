use async_trait::async_trait;

/// Failure modes of an external text-generation call. All of them are
/// recoverable: callers fall back to rule-based output.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("generation unavailable: {0}")]
    Unavailable(String),
}

/// Free-text generation backend. Output is untrusted and may ignore
/// formatting instructions.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// `max_items` is a hint for how many suggestion lines the prompt asks for.
    async fn generate(&self, prompt: &str, max_items: usize) -> Result<String, GenerationError>;
}

#[cfg(test)]
pub mod fakes {
    use std::sync::Mutex;

    use super::*;

    /// Always fails, as if the provider were down.
    pub struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str, _max_items: usize) -> Result<String, GenerationError> {
            Err(GenerationError::Unavailable("provider offline".into()))
        }
    }

    /// Returns a fixed reply and records every prompt it was given.
    pub struct ScriptedGenerator {
        reply: String,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn last_prompt(&self) -> Option<String> {
            self.prompts.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str, _max_items: usize) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }
}
