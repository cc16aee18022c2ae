pub mod client;

pub use client::{LLMClient, LlmError};
