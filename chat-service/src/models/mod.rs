pub mod chat;
pub mod retry;

pub use chat::{ChatRequest, ChatResponse, ErrorBody};
pub use retry::{RetryDecision, RetryPolicy, MAX_RETRIES};
