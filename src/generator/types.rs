use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单次生成的请求参数，构造后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// 种子主题，调用方负责去重
    pub topics: Vec<String>,
    /// 最大层级（根节点为第1层），合法范围 1..=6
    pub max_level: u8,
    /// 采样温度，合法范围 0.0..=1.0
    pub temperature: f64,
    /// 模型标识
    pub model: String,
    /// 调用方是否显式要求演示模式
    pub use_demo_mode: bool,
}

/// 子主题的获取方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Demo,
    Live,
}

impl std::fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationMode::Demo => write!(f, "demo"),
            GenerationMode::Live => write!(f, "live"),
        }
    }
}

/// 单次获取调用的元数据，创建后不可变，只做拼接不做合并
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallMetadata {
    pub mode: GenerationMode,
    pub topic: String,
    /// 祖先链，以 " > " 连接；根节点为 "ROOT"
    pub parent_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_tokens: Option<u64>,
    /// 仅 live 调用记录，保留两位小数
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<f64>,
}

impl CallMetadata {
    pub fn demo(topic: &str, parent_path: &str) -> Self {
        Self {
            mode: GenerationMode::Demo,
            topic: topic.to_string(),
            parent_path: parent_path.to_string(),
            total_tokens: None,
            prompt_tokens: None,
            completion_tokens: None,
            elapsed_seconds: None,
        }
    }
}

/// 主题树节点，独占其子节点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicNode {
    pub topic: String,
    #[serde(default)]
    pub children: Vec<TopicNode>,
    /// 本节点及全部后代的调用元数据，按先序深度优先排列
    #[serde(default)]
    pub metadata: Vec<CallMetadata>,
}

impl TopicNode {
    pub fn leaf(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            children: Vec::new(),
            metadata: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// 一次完整生成的结果，交给存储层后不再被引擎读取
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub id: String,
    pub topics: Vec<String>,
    pub max_level: u8,
    pub temperature: f64,
    pub model: String,
    /// 实际生效的演示模式标记
    pub use_demo_mode: bool,
    pub created_at: DateTime<Utc>,
    pub trees: Vec<TopicNode>,
}
