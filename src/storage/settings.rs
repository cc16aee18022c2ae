use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::generator::validator::{MAX_LEVEL, MIN_LEVEL};

/// 用户设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub api_key: String,
    pub default_model: String,
    pub default_depth: u8,
    pub default_temperature: f64,
    pub default_demo_mode: bool,
    pub default_topics: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_model: "gpt-3.5-turbo".to_string(),
            default_depth: 3,
            default_temperature: 0.2,
            default_demo_mode: false,
            default_topics: vec![],
        }
    }
}

/// 设置的部分更新，`None` 表示保持原值
#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub api_key: Option<String>,
    pub default_model: Option<String>,
    pub default_depth: Option<i64>,
    pub default_temperature: Option<f64>,
    pub default_demo_mode: Option<bool>,
    pub default_topics: Option<Vec<String>>,
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 读取设置；文件不存在或无法解析时返回默认值，类型不符的字段回落到默认值
    pub fn load(&self) -> Settings {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Settings::default(),
        };

        match serde_json::from_str::<Value>(&content) {
            Ok(value) => normalize(&value),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Settings file is not valid JSON, using defaults");
                Settings::default()
            }
        }
    }

    /// 合并部分更新并写回
    pub fn save(&self, update: SettingsUpdate) -> Result<Settings> {
        let mut current = self.load();

        if let Some(api_key) = update.api_key {
            current.api_key = api_key.trim().to_string();
        }
        if let Some(model) = update.default_model {
            current.default_model = model.trim().to_string();
        }
        if let Some(depth) = update.default_depth {
            current.default_depth = clamp_depth(depth);
        }
        if let Some(temperature) = update.default_temperature {
            current.default_temperature =
                clamp_temperature(temperature).unwrap_or(current.default_temperature);
        }
        if let Some(demo_mode) = update.default_demo_mode {
            current.default_demo_mode = demo_mode;
        }
        if let Some(topics) = update.default_topics {
            current.default_topics = clean_topics(topics.iter().map(String::as_str));
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&current)?;
        fs::write(&self.path, content)
            .context(format!("Failed to write settings file: {:?}", self.path))?;

        Ok(current)
    }
}

/// 隐藏 API KEY，仅保留首尾少量字符
pub fn mask_api_key(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return "Not set".to_string();
    }

    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}…{}", head, tail)
}

fn normalize(value: &Value) -> Settings {
    let defaults = Settings::default();
    Settings {
        api_key: value
            .get("api_key")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.api_key),
        default_model: value
            .get("default_model")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(defaults.default_model),
        default_depth: value
            .get("default_depth")
            .and_then(value_as_i64)
            .map(clamp_depth)
            .unwrap_or(defaults.default_depth),
        default_temperature: value
            .get("default_temperature")
            .and_then(value_as_f64)
            .and_then(clamp_temperature)
            .unwrap_or(defaults.default_temperature),
        default_demo_mode: value
            .get("default_demo_mode")
            .map(truthy)
            .unwrap_or(defaults.default_demo_mode),
        default_topics: value
            .get("default_topics")
            .map(topic_list)
            .unwrap_or(defaults.default_topics),
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn topic_list(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => {
            let normalized = s.replace('\r', "\n");
            clean_topics(normalized.split('\n'))
        }
        Value::Array(items) => {
            let rendered: Vec<String> = items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect();
            clean_topics(rendered.iter().map(String::as_str))
        }
        _ => vec![],
    }
}

fn clean_topics<'a>(items: impl Iterator<Item = &'a str>) -> Vec<String> {
    items
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn clamp_depth(depth: i64) -> u8 {
    depth.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8
}

fn clamp_temperature(temperature: f64) -> Option<f64> {
    if !temperature.is_finite() {
        return None;
    }
    Some((temperature.clamp(0.0, 1.0) * 100.0).round() / 100.0)
}
