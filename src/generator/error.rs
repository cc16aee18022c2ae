use thiserror::Error;

/// 主题树生成过程中的唯一错误类型，任何一个节点失败都会中止整次生成
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SubtopicGenerationError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("No OpenAI API key configured. Provide one in the settings or set OPENAI_API_KEY.")]
    MissingCredential,

    #[error("{0}")]
    Provider(String),

    #[error("Model returned a non-JSON response.")]
    NonJsonReply,

    #[error("Response JSON does not include a 'subtopics' list.")]
    MissingSubtopics,

    #[error("No subtopics were returned by the model.")]
    EmptySubtopics,
}

impl SubtopicGenerationError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }
}
