use std::time::Instant;

use anyhow::Result;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::config::LLMConfig;
use crate::generator::context::{GenerateOptions, GeneratorContext};
use crate::generator::dispatcher::{SubtopicFetcher, resolve_mode};
use crate::generator::error::SubtopicGenerationError;
use crate::generator::live::LiveGenerator;
use crate::generator::tree_builder::TreeBuilder;
use crate::generator::types::{GenerationMode, GenerationRequest, GenerationResult};
use crate::generator::validator::validate;
use crate::llm::LLMClient;
use crate::storage::HistoryEntry;

/// 为请求中的每个主题生成一棵主题树
///
/// 校验与模式解析都在第一次外部调用之前完成；模式解析后在整棵树中保持不变。
/// 任一节点失败都会使整次生成失败，不返回部分结果。
pub async fn generate_topic_tree(
    request: &GenerationRequest,
    api_key: &str,
    llm_config: &LLMConfig,
) -> Result<GenerationResult, SubtopicGenerationError> {
    validate(request)?;
    let mode = resolve_mode(request.use_demo_mode, api_key)?;

    let fetcher = match mode {
        GenerationMode::Demo => SubtopicFetcher::Demo,
        GenerationMode::Live => {
            let client = LLMClient::new(llm_config, api_key)
                .map_err(|e| SubtopicGenerationError::Provider(e.to_string()))?;
            SubtopicFetcher::Live(LiveGenerator::new(
                client,
                request.model.clone(),
                request.temperature,
            ))
        }
    };

    info!(
        topics = request.topics.len(),
        max_level = request.max_level,
        mode = %mode,
        model = %request.model,
        "Starting topic tree generation"
    );
    let start_time = Instant::now();

    let builder = TreeBuilder::new(&fetcher, request.max_level);
    let mut trees = Vec::with_capacity(request.topics.len());
    for topic in &request.topics {
        trees.push(builder.build_tree(topic).await?);
    }

    let calls: usize = trees.iter().map(|tree| tree.metadata.len()).sum();
    info!(
        calls,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Topic tree generation finished"
    );

    Ok(GenerationResult {
        id: Uuid::new_v4().simple().to_string(),
        topics: request.topics.clone(),
        max_level: request.max_level,
        temperature: request.temperature,
        model: request.model.clone(),
        use_demo_mode: mode == GenerationMode::Demo,
        created_at: Utc::now(),
        trees,
    })
}

/// 执行一次完整的 generate 命令：合并设置、生成、统计并写入历史
pub async fn launch(context: &GeneratorContext, options: &GenerateOptions) -> Result<HistoryEntry> {
    let (request, api_key) = context.build_request(options).await;

    let result = generate_topic_tree(&request, &api_key, &context.config.llm).await?;
    let entry = HistoryEntry::new(result);

    if options.save {
        context.history_store.add_entry(entry.clone())?;
    }

    Ok(entry)
}
