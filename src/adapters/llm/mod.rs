//! Chat completion adapters.

pub mod mock;
pub mod openai;
pub mod retry;

pub use mock::MockLlmClient;
pub use openai::{OpenAiClient, OpenAiClientConfig};
pub use retry::RetryPolicy;
