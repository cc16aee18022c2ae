//! Live模式 - 通过对话补全接口生成子主题

use std::sync::LazyLock;
use std::time::Instant;

use schemars::JsonSchema;
use serde_json::Value;
use tracing::debug;

use crate::generator::error::SubtopicGenerationError;
use crate::generator::types::{CallMetadata, GenerationMode};
use crate::llm::LLMClient;

/// 模型应答的结构约定，仅用于生成提示词中的 JSON Schema
#[derive(Debug, JsonSchema)]
pub struct SubtopicReply {
    /// 简洁的子主题列表
    pub subtopics: Vec<String>,
}

static SYSTEM_PROMPT: LazyLock<String> = LazyLock::new(|| {
    let schema = serde_json::to_string_pretty(&schemars::schema_for!(SubtopicReply))
        .unwrap_or_default();
    format!(
        "You are a research assistant that breaks topics down into subtopics. \
         Reply with strictly valid JSON only: a single object with one property named \"subtopics\" \
         whose value is an array of strings. Do not add any commentary, explanation or markdown \
         around the JSON.\n\nThe reply must conform to this JSON schema:\n{}",
        schema
    )
});

pub fn system_prompt() -> &'static str {
    &SYSTEM_PROMPT
}

/// 组装用户提示词
pub fn build_user_prompt(topic: &str, parent_path: &str) -> String {
    format!(
        "Given a topic, return a JSON object of subtopics for the topic.\n\
         Return the response as a JSON object with a single key named \"subtopics\" whose value is a list of concise subtopic strings.\n\
         Parent path: {}\n\
         Topic: {}",
        parent_path, topic
    )
}

/// 解析并清洗模型应答
pub fn parse_subtopics(content: &str) -> Result<Vec<String>, SubtopicGenerationError> {
    let payload: Value =
        serde_json::from_str(content).map_err(|_| SubtopicGenerationError::NonJsonReply)?;

    let items = payload
        .get("subtopics")
        .and_then(Value::as_array)
        .ok_or(SubtopicGenerationError::MissingSubtopics)?;

    let cleaned: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::String(text) => text.trim().to_string(),
            other => other.to_string().trim().to_string(),
        })
        .filter(|text| !text.is_empty())
        .collect();

    if cleaned.is_empty() {
        return Err(SubtopicGenerationError::EmptySubtopics);
    }

    Ok(cleaned)
}

fn round_seconds(seconds: f64) -> f64 {
    (seconds * 100.0).round() / 100.0
}

/// Live生成器，持有一次生成全程不变的模型参数
pub struct LiveGenerator {
    client: LLMClient,
    model: String,
    temperature: f64,
}

impl LiveGenerator {
    pub fn new(client: LLMClient, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }

    pub async fn generate(
        &self,
        topic: &str,
        parent_path: &str,
    ) -> Result<(Vec<String>, CallMetadata), SubtopicGenerationError> {
        let user_prompt = build_user_prompt(topic, parent_path);

        let start_time = Instant::now();
        let reply = self
            .client
            .chat(&self.model, self.temperature, system_prompt(), &user_prompt)
            .await
            .map_err(|e| SubtopicGenerationError::Provider(e.to_string()))?;
        let elapsed = round_seconds(start_time.elapsed().as_secs_f64());

        let subtopics = parse_subtopics(&reply.content)?;
        debug!(topic, count = subtopics.len(), elapsed, "Live subtopics received");

        let usage = reply.usage.unwrap_or_default();
        let metadata = CallMetadata {
            mode: GenerationMode::Live,
            topic: topic.to_string(),
            parent_path: parent_path.to_string(),
            total_tokens: usage.total_tokens,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            elapsed_seconds: Some(elapsed),
        };

        Ok((subtopics, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_blank_entries() {
        let subtopics = parse_subtopics(r#"{"subtopics": ["A", " ", "B"]}"#).unwrap();
        assert_eq!(subtopics, vec!["A", "B"]);
    }

    #[test]
    fn test_parse_trims_entries() {
        let subtopics = parse_subtopics(r#"{"subtopics": ["  Ownership ", "Lifetimes\n"]}"#).unwrap();
        assert_eq!(subtopics, vec!["Ownership", "Lifetimes"]);
    }

    #[test]
    fn test_parse_stringifies_non_string_items() {
        let subtopics = parse_subtopics(r#"{"subtopics": [2024, "Trends"]}"#).unwrap();
        assert_eq!(subtopics, vec!["2024", "Trends"]);
    }

    #[test]
    fn test_parse_missing_subtopics_key() {
        let err = parse_subtopics(r#"{"notsubtopics": []}"#).unwrap_err();
        assert_eq!(err, SubtopicGenerationError::MissingSubtopics);
    }

    #[test]
    fn test_parse_subtopics_not_a_list() {
        let err = parse_subtopics(r#"{"subtopics": "A, B"}"#).unwrap_err();
        assert_eq!(err, SubtopicGenerationError::MissingSubtopics);
    }

    #[test]
    fn test_parse_non_json() {
        let err = parse_subtopics("Here are some subtopics: A, B").unwrap_err();
        assert_eq!(err, SubtopicGenerationError::NonJsonReply);
        assert_eq!(err.to_string(), "Model returned a non-JSON response.");
    }

    #[test]
    fn test_parse_all_blank() {
        let err = parse_subtopics(r#"{"subtopics": ["", "   "]}"#).unwrap_err();
        assert_eq!(err, SubtopicGenerationError::EmptySubtopics);
    }

    #[test]
    fn test_user_prompt_embeds_topic_and_path() {
        let prompt = build_user_prompt("Borrowing", "Rust > Ownership");
        assert!(prompt.contains("Topic: Borrowing"));
        assert!(prompt.contains("Parent path: Rust > Ownership"));
    }

    #[test]
    fn test_system_prompt_constrains_reply() {
        let prompt = system_prompt();
        assert!(prompt.contains("subtopics"));
        assert!(prompt.contains("JSON"));
    }

    #[test]
    fn test_round_seconds() {
        assert_eq!(round_seconds(1.23456), 1.23);
        assert_eq!(round_seconds(0.456), 0.46);
    }
}
