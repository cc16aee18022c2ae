use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::generator::summary::{TreeSummary, summarize};
use crate::generator::types::{GenerationResult, TopicNode};

/// 历史记录条目：生成结果 + 统计 + 收藏标记
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub result: GenerationResult,
    #[serde(default)]
    pub summary: Option<TreeSummary>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl HistoryEntry {
    pub fn new(result: GenerationResult) -> Self {
        let summary = Some(summarize(&result.trees));
        Self {
            result,
            summary,
            is_favorite: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.result.id
    }

    /// 输入主题或任一节点主题包含查询串（忽略大小写）
    pub fn matches_query(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.result
            .topics
            .iter()
            .any(|topic| topic.to_lowercase().contains(&lowered))
            || self
                .result
                .trees
                .iter()
                .any(|tree| node_contains(tree, &lowered))
    }
}

fn node_contains(node: &TopicNode, lowered: &str) -> bool {
    node.topic.to_lowercase().contains(lowered)
        || node.children.iter().any(|child| node_contains(child, lowered))
}

/// 历史记录存储，最新的条目排在最前
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取全部条目；文件不存在或无法解析时返回空列表
    pub fn load(&self) -> Vec<HistoryEntry> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "History file is not valid JSON, ignoring");
            Vec::new()
        })
    }

    pub fn save(&self, entries: &[HistoryEntry]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)
            .context(format!("Failed to write history file: {:?}", self.path))
    }

    pub fn add_entry(&self, entry: HistoryEntry) -> Result<()> {
        let mut entries = self.load();
        entries.insert(0, entry);
        self.save(&entries)
    }

    pub fn get_entry(&self, entry_id: &str) -> Option<HistoryEntry> {
        self.load().into_iter().find(|entry| entry.id() == entry_id)
    }

    /// 修改指定条目并持久化，返回是否找到
    pub fn update_entry<F>(&self, entry_id: &str, update: F) -> Result<bool>
    where
        F: FnOnce(&mut HistoryEntry),
    {
        let mut entries = self.load();
        match entries.iter_mut().find(|entry| entry.id() == entry_id) {
            Some(entry) => {
                update(entry);
                self.save(&entries)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn set_favorite(&self, entry_id: &str, value: bool) -> Result<bool> {
        self.update_entry(entry_id, |entry| entry.is_favorite = value)
    }

    /// 切换收藏状态，返回新值；条目不存在时返回 None
    pub fn toggle_favorite(&self, entry_id: &str) -> Result<Option<bool>> {
        let mut new_value = None;
        self.update_entry(entry_id, |entry| {
            entry.is_favorite = !entry.is_favorite;
            new_value = Some(entry.is_favorite);
        })?;
        Ok(new_value)
    }

    pub fn clear(&self) -> Result<()> {
        self.save(&[])
    }

    /// 为缺少统计的旧条目补算统计并写回
    pub fn backfill_summaries(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.load();
        let mut changed = false;
        for entry in entries.iter_mut().filter(|entry| entry.summary.is_none()) {
            entry.summary = Some(summarize(&entry.result.trees));
            changed = true;
        }
        if changed {
            self.save(&entries)?;
        }
        Ok(entries)
    }

    /// 按主题搜索，空查询返回全部
    pub fn search(&self, query: &str) -> Vec<HistoryEntry> {
        let query = query.trim();
        let entries = self.load();
        if query.is_empty() {
            return entries;
        }
        entries
            .into_iter()
            .filter(|entry| entry.matches_query(query))
            .collect()
    }

    /// 导出单个条目或全部历史，返回导出的条目数
    pub fn export(&self, output: &Path, entry_id: Option<&str>) -> Result<usize> {
        let (content, count) = match entry_id {
            Some(id) => {
                let entry = self
                    .get_entry(id)
                    .ok_or_else(|| anyhow!("History entry not found: {}", id))?;
                (serde_json::to_string_pretty(&entry)?, 1)
            }
            None => {
                let entries = self.load();
                (serde_json::to_string_pretty(&entries)?, entries.len())
            }
        };

        if let Some(parent) = output.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(output, content).context(format!("Failed to write export file: {:?}", output))?;
        Ok(count)
    }
}
