use tracing::debug;

use crate::generator::demo::DemoGenerator;
use crate::generator::error::SubtopicGenerationError;
use crate::generator::live::LiveGenerator;
use crate::generator::types::{CallMetadata, GenerationMode};

/// 祖先链的连接符
pub const PATH_SEPARATOR: &str = " > ";
/// 根节点的祖先链
pub const ROOT_SENTINEL: &str = "ROOT";

/// 计算 parent_path
pub fn parent_path(ancestry: &[String]) -> String {
    if ancestry.is_empty() {
        ROOT_SENTINEL.to_string()
    } else {
        ancestry.join(PATH_SEPARATOR)
    }
}

/// 解析一次生成的实际模式，整次生成只解析一次
///
/// 显式要求演示模式时忽略凭证；要求 live 却没有凭证时直接失败，不会静默降级。
pub fn resolve_mode(
    use_demo_mode: bool,
    api_key: &str,
) -> Result<GenerationMode, SubtopicGenerationError> {
    if use_demo_mode {
        return Ok(GenerationMode::Demo);
    }
    if api_key.trim().is_empty() {
        return Err(SubtopicGenerationError::MissingCredential);
    }
    Ok(GenerationMode::Live)
}

/// 子主题获取分发器，模式在构造时冻结
pub enum SubtopicFetcher {
    Demo,
    Live(LiveGenerator),
}

impl SubtopicFetcher {
    pub fn mode(&self) -> GenerationMode {
        match self {
            SubtopicFetcher::Demo => GenerationMode::Demo,
            SubtopicFetcher::Live(_) => GenerationMode::Live,
        }
    }

    /// 获取单个主题的子主题及本次调用的元数据
    pub async fn fetch(
        &self,
        topic: &str,
        ancestry: &[String],
    ) -> Result<(Vec<String>, CallMetadata), SubtopicGenerationError> {
        let parent_path = parent_path(ancestry);
        debug!(topic, parent_path = %parent_path, mode = %self.mode(), "Fetching subtopics");

        match self {
            SubtopicFetcher::Demo => Ok((
                DemoGenerator::subtopics(topic),
                CallMetadata::demo(topic, &parent_path),
            )),
            SubtopicFetcher::Live(generator) => generator.generate(topic, &parent_path).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_path_root() {
        assert_eq!(parent_path(&[]), "ROOT");
    }

    #[test]
    fn test_parent_path_joined() {
        let ancestry = vec!["Rust".to_string(), "Rust Trends".to_string()];
        assert_eq!(parent_path(&ancestry), "Rust > Rust Trends");
    }

    #[test]
    fn test_resolve_mode() {
        assert_eq!(resolve_mode(true, ""), Ok(GenerationMode::Demo));
        assert_eq!(resolve_mode(true, "sk-test"), Ok(GenerationMode::Demo));
        assert_eq!(resolve_mode(false, "sk-test"), Ok(GenerationMode::Live));
        assert_eq!(
            resolve_mode(false, ""),
            Err(SubtopicGenerationError::MissingCredential)
        );
        assert_eq!(
            resolve_mode(false, "   "),
            Err(SubtopicGenerationError::MissingCredential)
        );
    }

    #[tokio::test]
    async fn test_demo_fetch_tags_metadata() {
        let ancestry = vec!["Science".to_string()];
        let (subtopics, metadata) = SubtopicFetcher::Demo.fetch("Topic", &ancestry).await.unwrap();

        assert_eq!(subtopics, DemoGenerator::subtopics("Topic"));
        assert_eq!(metadata.mode, GenerationMode::Demo);
        assert_eq!(metadata.topic, "Topic");
        assert_eq!(metadata.parent_path, "Science");
        assert!(metadata.elapsed_seconds.is_none());
        assert!(metadata.total_tokens.is_none());
    }
}
