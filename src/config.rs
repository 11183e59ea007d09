use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::quiz::session::DEFAULT_TIME_PER_QUESTION;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_time_per_question")]
    pub time_per_question: u32,
    #[serde(default = "default_shuffle_questions")]
    pub shuffle_questions: bool,
    #[serde(default)]
    pub question_file: Option<String>,
    #[serde(default)]
    pub start_directory: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_theme() -> String {
    "catppuccin-mocha".to_string()
}
fn default_time_per_question() -> u32 {
    DEFAULT_TIME_PER_QUESTION
}
fn default_shuffle_questions() -> bool {
    true
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            time_per_question: default_time_per_question(),
            shuffle_questions: default_shuffle_questions(),
            question_file: None,
            start_directory: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.normalize();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ppde")
            .join("config.toml")
    }

    /// Clamp values a hand-edited file could get wrong.
    pub fn normalize(&mut self) {
        if self.time_per_question == 0 {
            self.time_per_question = default_time_per_question();
        }
        if self.theme.trim().is_empty() {
            self.theme = default_theme();
        }
    }

    /// Initial directory for the explorer: config value, then the working
    /// directory, then home.
    pub fn start_directory(&self) -> PathBuf {
        self.start_directory
            .as_deref()
            .map(expand_tilde)
            .filter(|p| p.is_dir())
            .or_else(|| std::env::current_dir().ok())
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.time_per_question, 30);
        assert!(config.shuffle_questions);
        assert!(config.question_file.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_partial_fields() {
        let toml_str = r#"
theme = "terminal-default"
time_per_question = 15
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "terminal-default");
        assert_eq!(config.time_per_question, 15);
        assert!(config.shuffle_questions);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.question_file = Some("/tmp/bank.json".to_string());
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.question_file, deserialized.question_file);
        assert_eq!(config.time_per_question, deserialized.time_per_question);
    }

    #[test]
    fn test_normalize_zero_time_limit() {
        let mut config: Config = toml::from_str("time_per_question = 0\ntheme = \"\"").unwrap();
        config.normalize();
        assert_eq!(config.time_per_question, 30);
        assert_eq!(config.theme, "catppuccin-mocha");
    }

    #[test]
    fn test_start_directory_ignores_missing_path() {
        let mut config = Config::default();
        config.start_directory = Some("/nonexistent_zzz_dir".to_string());
        assert!(config.start_directory().is_dir());

        let dir = tempfile::tempdir().unwrap();
        config.start_directory = Some(dir.path().display().to_string());
        assert_eq!(config.start_directory(), dir.path());
    }

    #[test]
    fn test_expand_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/notes"), home.join("notes"));
        }
        assert_eq!(expand_tilde("/abs"), PathBuf::from("/abs"));
    }
}
