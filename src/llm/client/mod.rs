//! LLM客户端 - OpenAI兼容接口的最小封装

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::LLMConfig;

pub mod types;

use types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatReply};

/// 模型服务调用错误
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("No choices in response")]
    NoChoices,

    #[error("Response message has no content")]
    EmptyContent,
}

/// LLM客户端 - 每个实例绑定一个已解析的API KEY
#[derive(Clone)]
pub struct LLMClient {
    client: Client,
    api_base_url: String,
    api_key: String,
}

impl LLMClient {
    /// 创建新的LLM客户端
    pub fn new(config: &LLMConfig, api_key: &str) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path)
    }

    /// 发送单轮对话请求（system + user 两条消息）
    pub async fn chat(
        &self,
        model: &str,
        temperature: f64,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<ChatReply, LlmError> {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)],
            temperature,
        };

        debug!(model, temperature, "Calling chat completion API");

        let response = self
            .client
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let body: ChatCompletionResponse = response.json().await?;
        let choice = body.choices.into_iter().next().ok_or(LlmError::NoChoices)?;
        let content = choice.message.content.ok_or(LlmError::EmptyContent)?;

        Ok(ChatReply {
            content,
            usage: body.usage,
        })
    }

    /// 获取可用的对话模型列表，任何失败都返回空列表
    pub async fn list_models(&self) -> Vec<String> {
        if self.api_key.is_empty() {
            return Vec::new();
        }

        match self.fetch_model_ids().await {
            Ok(ids) => chat_model_ids(ids),
            Err(e) => {
                warn!(error = %e, "Failed to list models");
                Vec::new()
            }
        }
    }

    async fn fetch_model_ids(&self) -> Result<Vec<String>, LlmError> {
        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Status { status, body });
        }

        let body: Value = response.json().await?;
        let ids = body
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("id").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(ids)
    }
}

/// 只保留 gpt- 开头的模型，去重并排序
pub fn chat_model_ids(ids: Vec<String>) -> Vec<String> {
    let mut models: Vec<String> = ids
        .into_iter()
        .filter(|id| id.starts_with("gpt-"))
        .collect();
    models.sort();
    models.dedup();
    models
}

#[cfg(test)]
mod tests;
