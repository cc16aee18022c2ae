use crate::config::Config;
use crate::generator::types::GenerationRequest;
use crate::generator::validator::{MAX_LEVEL, MIN_LEVEL};
use crate::llm::LLMClient;
use crate::storage::{HistoryStore, Settings, SettingsStore};
use crate::utils::topics::parse_topics;

/// 兜底模型
pub const FALLBACK_MODEL: &str = "gpt-3.5-turbo";

/// 一次 generate 命令的原始输入，尚未与设置合并
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// 主题参数，逐个按逗号/换行继续拆分
    pub topics: Vec<String>,
    pub depth: Option<i64>,
    pub temperature: Option<f64>,
    pub model: Option<String>,
    /// Some(true) 为 --demo，Some(false) 为 --live，None 表示未指定
    pub demo_mode: Option<bool>,
    /// 命令行传入的 API KEY，优先级最高
    pub api_key: Option<String>,
    /// 是否写入历史记录
    pub save: bool,
}

/// 应用上下文：配置与两个持久化存储
pub struct GeneratorContext {
    /// 配置
    pub config: Config,
    /// 用户设置存储
    pub settings_store: SettingsStore,
    /// 历史记录存储
    pub history_store: HistoryStore,
}

impl GeneratorContext {
    /// 创建新的上下文
    pub fn new(config: Config) -> Self {
        let settings_store = SettingsStore::new(config.settings_path());
        let history_store = HistoryStore::new(config.history_path());
        Self {
            config,
            settings_store,
            history_store,
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings_store.load()
    }

    /// 凭证优先级：命令行 > 用户设置 > 进程配置（OPENAI_API_KEY）
    pub fn resolve_api_key(&self, settings: &Settings, override_key: Option<&str>) -> String {
        [override_key, Some(settings.api_key.as_str()), Some(self.config.llm.api_key.as_str())]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|key| !key.is_empty())
            .unwrap_or_default()
            .to_string()
    }

    /// 可用模型：有凭证时以接口结果为准，否则使用配置中的列表
    pub async fn available_models(&self, api_key: &str) -> Vec<String> {
        if !api_key.trim().is_empty()
            && let Ok(client) = LLMClient::new(&self.config.llm, api_key)
        {
            let models = client.list_models().await;
            if !models.is_empty() {
                return models;
            }
        }
        self.config.available_models.clone()
    }

    /// 将命令行输入与设置、配置合并为生成请求，返回请求与解析出的凭证
    pub async fn build_request(&self, options: &GenerateOptions) -> (GenerationRequest, String) {
        let settings = self.settings();
        let api_key = self.resolve_api_key(&settings, options.api_key.as_deref());

        let max_level = options
            .depth
            .unwrap_or(settings.default_depth as i64)
            .clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8;

        let temperature = options
            .temperature
            .filter(|t| t.is_finite())
            .unwrap_or(settings.default_temperature)
            .clamp(0.0, 1.0);

        // 未显式指定模式时，默认设置或缺少凭证都会回落到演示模式
        let use_demo_mode = options
            .demo_mode
            .unwrap_or(settings.default_demo_mode || api_key.is_empty());

        let mut model = options
            .model
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| settings.default_model.clone());
        if model.trim().is_empty() {
            model = FALLBACK_MODEL.to_string();
        }
        if !use_demo_mode {
            let available = self.available_models(&api_key).await;
            if let Some(first) = available.first()
                && !available.contains(&model)
            {
                model = first.clone();
            }
        }

        let defaults = if settings.default_topics.is_empty() {
            self.config.default_topics.clone()
        } else {
            settings.default_topics.clone()
        };
        let topics = parse_topics(&options.topics.join(","), &defaults);

        let request = GenerationRequest {
            topics,
            max_level,
            temperature,
            model,
            use_demo_mode,
        };
        (request, api_key)
    }
}
