// Layered configuration: defaults, optional TOML file, then environment

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::AppError;
use crate::render::RendererKind;

pub const ENV_API_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_BIND: &str = "WINE_GUIDE_BIND";
pub const ENV_API_URL: &str = "WINE_GUIDE_API_URL";
pub const ENV_LOG_FORMAT: &str = "WINE_GUIDE_LOG_FORMAT";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub guide: GuideConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("unknown log format '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0:3000".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

/// Settings for the upstream content API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub api_url: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub model: String,
    pub api_version: String,
    pub guide_max_tokens: u32,
    pub pairing_max_tokens: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            api_url: "https://api.anthropic.com".to_string(),
            api_key: None,
            model: "claude-sonnet-4-20250514".to_string(),
            api_version: "2023-06-01".to_string(),
            guide_max_tokens: 4000,
            pairing_max_tokens: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// Reject generated content that lacks any of the four wine categories.
    pub require_all_categories: bool,
    pub renderer: RendererKind,
}

impl Default for GuideConfig {
    fn default() -> Self {
        GuideConfig {
            require_all_categories: true,
            renderer: RendererKind::default(),
        }
    }
}

impl Config {
    /// Defaults, overlaid by `path` when given, overlaid by the process
    /// environment.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.generator.api_key = Some(key);
        }
        if let Some(bind) = non_empty(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(url) = non_empty(ENV_API_URL) {
            self.generator.api_url = url;
        }
        if let Some(format) = non_empty(ENV_LOG_FORMAT) {
            self.server.log_format = format.parse()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.server.log_format, LogFormat::Compact);
        assert_eq!(config.generator.api_url, "https://api.anthropic.com");
        assert_eq!(config.generator.guide_max_tokens, 4000);
        assert_eq!(config.generator.pairing_max_tokens, 1000);
        assert!(config.guide.require_all_categories);
        assert_eq!(config.guide.renderer, RendererKind::Pdf);
    }

    #[test]
    fn test_demo_config_matches_schema() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/wine-guide.toml");
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.server.log_format, LogFormat::Compact);
        assert_eq!(config.generator.api_url, "https://api.anthropic.com");
        assert_eq!(config.generator.guide_max_tokens, 4000);
        assert!(config.generator.api_key.is_none());
        assert!(config.guide.require_all_categories);
        assert_eq!(config.guide.renderer, RendererKind::Pdf);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
[server]
log_format = "json"

[guide]
require_all_categories = false
"#,
        )
        .unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert!(!config.guide.require_all_categories);
        assert_eq!(config.generator.model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = Config::from_toml("[server\nbind = 3").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = Config::from_toml("[guide]\nrenderer = \"browser\"").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nbind = \"127.0.0.1:8080\"").unwrap();
        let mut config = Config::from_file(file.path()).unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_API_KEY, "sk-test"),
            (ENV_BIND, "127.0.0.1:9090"),
            (ENV_API_URL, "http://localhost:1234"),
            (ENV_LOG_FORMAT, "JSON"),
        ]);
        config
            .apply_env(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.generator.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.server.bind, "127.0.0.1:9090");
        assert_eq!(config.generator.api_url, "http://localhost:1234");
        assert_eq!(config.server.log_format, LogFormat::Json);
    }

    #[test]
    fn test_empty_env_values_are_ignored() {
        let mut config = Config::default();
        config.apply_env(|_| Some(String::new())).unwrap();
        assert!(config.generator.api_key.is_none());
        assert_eq!(config.server.bind, "0.0.0.0:3000");
    }

    #[test]
    fn test_bad_log_format_env() {
        let mut config = Config::default();
        let err = config
            .apply_env(|key| (key == ENV_LOG_FORMAT).then(|| "yaml".to_string()))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::from_file(Path::new("/nonexistent/wine-guide.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
