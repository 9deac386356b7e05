//! A scriptable in-memory generator for tests and offline development.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{Result, Text2SqlError};
use crate::generator::SqlGenerator;

enum Reply {
    Text(String),
    Failure(String),
}

/// A [`SqlGenerator`] that returns a canned reply and records every prompt.
///
/// Useful for exercising the pipeline and HTTP layer without network access.
pub struct MockSqlGenerator {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockSqlGenerator {
    /// A generator that always succeeds with `text` as raw model output.
    pub fn respond_with(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// A generator that always fails with the given message.
    pub fn fail_with(message: impl Into<String>) -> Self {
        Self {
            reply: Reply::Failure(message.into()),
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// How many times [`SqlGenerator::generate`] has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every prompt received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// The most recent prompt, if any call was made.
    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).last().cloned()
    }
}

#[async_trait]
impl SqlGenerator for MockSqlGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap_or_else(|e| e.into_inner()).push(prompt.to_string());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Failure(message) => Err(Text2SqlError::Generation {
                provider: "Mock".into(),
                message: message.clone(),
            }),
        }
    }

    fn name(&self) -> &str {
        "Mock"
    }
}
