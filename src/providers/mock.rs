/*!
 * Mock punctuation service for testing.
 *
 * - `MockPunctuator::working()` - Appends a full stop to every request
 * - `MockPunctuator::failing()` - Always fails with an error
 * - `MockPunctuator::intermittent(n)` - Fails every nth request
 * - `MockPunctuator::with_response(f)` - Answers with a custom function
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::providers::PunctuationService;

/// Behavior mode for the mock service
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds
    Working,
    /// Fails on every nth request
    Intermittent { fail_every: usize },
    /// Always fails
    Failing,
}

/// Mock service recording how often it was called
#[derive(Debug, Clone)]
pub struct MockPunctuator {
    behavior: MockBehavior,
    request_count: Arc<AtomicUsize>,
    custom_response: Option<fn(&str) -> String>,
}

impl MockPunctuator {
    /// Create a new mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
            custom_response: None,
        }
    }

    /// Create a mock that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock failing every `fail_every` requests
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every: fail_every.max(1) })
    }

    /// Create a working mock answering with `generator`
    pub fn with_response(generator: fn(&str) -> String) -> Self {
        Self {
            custom_response: Some(generator),
            ..Self::working()
        }
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    fn answer(&self, text: &str) -> String {
        match self.custom_response {
            Some(generator) => generator(text),
            None => format!("{}.", text.trim_end()),
        }
    }
}

#[async_trait]
impl PunctuationService for MockPunctuator {
    async fn restore(&self, text: &str) -> Result<String, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match self.behavior {
            MockBehavior::Working => Ok(self.answer(text)),
            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        status_code: 503,
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                    })
                } else {
                    Ok(self.answer(text))
                }
            }
            MockBehavior::Failing => Err(ProviderError::ConnectionError(
                "Simulated service failure".to_string(),
            )),
        }
    }
}
