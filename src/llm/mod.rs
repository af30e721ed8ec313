//! Language model access.
//!
//! The rest of the crate only sees [`ModelGateway`]: submit a prompt, get text
//! back or an [`LlmError`]. [`ChatClient`] is the production implementation
//! speaking the OpenAI-compatible chat completions protocol.

mod client;
pub use client::ChatClient;

mod error;
pub use error::{LlmError, LlmResult};

#[async_trait::async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends a single user prompt and returns the trimmed completion text.
    ///
    /// Implementations must fail with [`LlmError::EmptyResponse`] rather than
    /// return an empty string.
    async fn submit_prompt(&self, prompt: &str, temperature: f32) -> LlmResult<String>;
}
