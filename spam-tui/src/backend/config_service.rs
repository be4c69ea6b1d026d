//! 配置服务

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use spam_core::dispatcher::DEFAULT_BASE_PATH;
use spam_core::http_client::{DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT};
use spam_core::services::DEFAULT_SITE_MODE_TTL;

use crate::view::theme::Theme;

/// 默认后端地址
pub const DEFAULT_BACKEND_URL: &str = "http://localhost/spam/api/v0/";

const ENV_BACKEND: &str = "SPAM_BACKEND";
const ENV_PATH: &str = "SPAM_PATH";
const ENV_LOG: &str = "SPAM_LOG";

/// 获取配置目录路径
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("spam-tui")
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 后端端点
    pub backend_url: String,
    /// 路径前缀
    pub base_path: String,
    /// 启动路径，缺省时打开交换机列表
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_path: Option<String>,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    /// 站点列模式缓存的有效期
    pub site_mode_ttl_secs: u64,
    pub theme: Theme,
    /// 日志过滤（`EnvFilter` 语法）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_filter: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            start_path: None,
            request_timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            max_retries: DEFAULT_MAX_RETRIES,
            site_mode_ttl_secs: DEFAULT_SITE_MODE_TTL.as_secs(),
            theme: Theme::default(),
            log_filter: None,
        }
    }
}

impl AppConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn site_mode_ttl(&self) -> Duration {
        Duration::from_secs(self.site_mode_ttl_secs)
    }

    /// 启动时要导航到的路径
    pub fn start_path(&self) -> &str {
        self.start_path.as_deref().unwrap_or(&self.base_path)
    }

    /// 用环境变量覆盖文件中的值
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        if let Some(url) = non_empty(ENV_BACKEND) {
            self.backend_url = url;
        }
        if let Some(path) = non_empty(ENV_PATH) {
            self.start_path = Some(path);
        }
        if let Some(filter) = non_empty(ENV_LOG) {
            self.log_filter = Some(filter);
        }
    }
}

/// 配置服务 trait
pub trait ConfigService: Send + Sync {
    /// 加载配置
    fn load(&self) -> Result<AppConfig>;

    /// 保存配置
    fn save(&self, config: &AppConfig) -> Result<()>;
}

/// 本地配置服务
pub struct LocalConfigService {
    path: PathBuf,
}

impl LocalConfigService {
    pub fn new() -> Self {
        Self::with_path(config_dir().join("config.json"))
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_file(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            log::debug!("No config file at {}, using defaults", self.path.display());
            return Ok(AppConfig::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing {}", self.path.display()))
    }
}

impl Default for LocalConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigService for LocalConfigService {
    fn load(&self) -> Result<AppConfig> {
        let mut config = self.load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn save(&self, config: &AppConfig) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = LocalConfigService::with_path(dir.path().join("config.json"));

        let config = service.load_file().unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.start_path(), "/spam/");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"backend_url": "https://spam.example/api/", "theme": "light"}"#)
            .unwrap();

        let config = LocalConfigService::with_path(&path).load_file().unwrap();
        assert_eq!(config.backend_url, "https://spam.example/api/");
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn save_then_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let service = LocalConfigService::with_path(dir.path().join("nested").join("config.json"));
        let config = AppConfig {
            site_mode_ttl_secs: 60,
            ..AppConfig::default()
        };

        service.save(&config).unwrap();
        assert_eq!(service.load_file().unwrap(), config);
    }

    #[test]
    fn environment_overrides_file_values() {
        let env: HashMap<&str, &str> = [
            ("SPAM_BACKEND", "http://10.0.0.5/spam/api/v0/"),
            ("SPAM_PATH", "/spam/sw/brrsw01/"),
            ("SPAM_LOG", "spam_core=debug"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.backend_url, "http://10.0.0.5/spam/api/v0/");
        assert_eq!(config.start_path(), "/spam/sw/brrsw01/");
        assert_eq!(config.log_filter.as_deref(), Some("spam_core=debug"));
    }

    #[test]
    fn blank_environment_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_env(|_| Some("  ".to_string()));
        assert_eq!(config, AppConfig::default());
    }
}
