/*!
 * Punctuation restoration service clients.
 *
 * This module contains the service interface and its implementations:
 * - `http`: Remote restoration service reached over HTTP
 * - `mock`: Deterministic in-process service for tests
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ProviderError;

/// Common trait for punctuation restoration services
///
/// A service receives the text of one sentence and returns the same words
/// with punctuation inserted.
#[async_trait]
pub trait PunctuationService: Send + Sync + Debug {
    /// Restore punctuation in `text`
    ///
    /// # Arguments
    /// * `text` - Unpunctuated sentence text
    ///
    /// # Returns
    /// * `Result<String, ProviderError>` - The punctuated text or an error
    async fn restore(&self, text: &str) -> Result<String, ProviderError>;
}

pub mod http;
pub mod mock;

pub use self::http::HttpPunctuator;
pub use self::mock::MockPunctuator;
