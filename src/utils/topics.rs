use std::collections::HashSet;

/// 解析用户输入的主题：按逗号与换行拆分、去空白、去重并保持首次出现的顺序
///
/// 输入为空白时返回 `defaults`。
pub fn parse_topics(raw: &str, defaults: &[String]) -> Vec<String> {
    if raw.trim().is_empty() {
        return defaults.to_vec();
    }

    let mut seen = HashSet::new();
    raw.split([',', '\n', '\r'])
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .filter(|topic| seen.insert(topic.to_string()))
        .map(str::to_string)
        .collect()
}
