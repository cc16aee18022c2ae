#[cfg(test)]
mod tests {
    use crate::config::{Config, LLMConfig};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.data_dir, PathBuf::from(".subtopics"));
        assert_eq!(config.history_path(), PathBuf::from(".subtopics/history.json"));
        assert_eq!(config.settings_path(), PathBuf::from(".subtopics/settings.json"));
        assert!(config.default_topics.is_empty());
        assert_eq!(config.available_models[0], "gpt-3.5-turbo");
        assert!(!config.verbose);
    }

    #[test]
    fn test_llm_config_default() {
        let config = LLMConfig::default();

        // api_key may be empty if env var is not set
        assert_eq!(config.api_base_url, "https://api.openai.com/v1");
        assert_eq!(config.timeout_seconds, 120);
    }

    #[test]
    fn test_from_file_partial() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("subtopics.toml");
        fs::write(
            &config_path,
            r#"
default_topics = ["Rust", "Oceans"]
verbose = true

[llm]
api_base_url = "http://localhost:8080/v1"
timeout_seconds = 30
"#,
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.default_topics, vec!["Rust", "Oceans"]);
        assert!(config.verbose);
        assert_eq!(config.llm.api_base_url, "http://localhost:8080/v1");
        assert_eq!(config.llm.timeout_seconds, 30);
        // 未出现的字段使用默认值
        assert_eq!(config.history_path(), PathBuf::from(".subtopics/history.json"));
    }

    #[test]
    fn test_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::from_file(&temp_dir.path().join("missing.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("broken.toml");
        fs::write(&config_path, "default_topics = [").unwrap();

        assert!(Config::from_file(&config_path).is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("custom.toml");
        fs::write(&config_path, "available_models = [\"gpt-4o\"]\n").unwrap();

        let config = Config::load(Some(config_path.as_path())).unwrap();
        assert_eq!(config.available_models, vec!["gpt-4o"]);
    }

    #[test]
    fn test_with_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::default().with_data_dir(temp_dir.path());

        assert_eq!(config.data_dir, temp_dir.path());
        assert_eq!(config.history_path(), temp_dir.path().join("history.json"));
        assert_eq!(config.settings_path(), temp_dir.path().join("settings.json"));
    }

    #[test]
    fn test_from_file_data_dir_moves_store_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("subtopics.toml");
        fs::write(&config_path, "data_dir = \"/srv/subtopics\"\n").unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.history_path(), PathBuf::from("/srv/subtopics/history.json"));
        assert_eq!(config.settings_path(), PathBuf::from("/srv/subtopics/settings.json"));
    }

    #[test]
    fn test_from_file_explicit_store_path_wins() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("subtopics.toml");
        fs::write(
            &config_path,
            r#"
data_dir = "/srv/subtopics"
history_path = "/var/log/topics.json"
"#,
        )
        .unwrap();

        let config = Config::from_file(&config_path).unwrap();
        assert_eq!(config.history_path(), PathBuf::from("/var/log/topics.json"));
        assert_eq!(config.settings_path(), PathBuf::from("/srv/subtopics/settings.json"));

        // 命令行指定的数据目录覆盖单独路径
        let config = config.with_data_dir(temp_dir.path());
        assert_eq!(config.history_path(), temp_dir.path().join("history.json"));
    }
}
