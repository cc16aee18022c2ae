pub mod cli;
pub mod commands;
pub mod config;
pub mod generator;
pub mod llm;
pub mod storage;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::error::SubtopicGenerationError;
pub use generator::summary::{TreeSummary, summarize};
pub use generator::types::{CallMetadata, GenerationRequest, GenerationResult, TopicNode};
pub use generator::workflow::{generate_topic_tree, launch};
