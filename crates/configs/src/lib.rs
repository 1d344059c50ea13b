use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use std::path::Path;

/// Environment variable overriding `storage.file_path`.
pub const FILE_PATH_ENV: &str = "HBNB_FILE_PATH";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_file_path")]
    pub file_path: String,
    #[serde(default)]
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { file_path: default_file_path(), pretty: false }
    }
}

fn default_file_path() -> String { "file.json".to_string() }

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

/// Load from `CONFIG_PATH` (default `config.toml`). A missing file yields defaults.
pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    if !Path::new(&path).exists() {
        return Ok(AppConfig::default());
    }
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    AppConfig::from_toml_str(&content)
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let cfg: AppConfig = toml::from_str(content)?;
        Ok(cfg)
    }

    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 环境变量优先于 TOML 中的存储路径
        self.storage.apply_override(std::env::var(FILE_PATH_ENV).ok());
        self.storage.validate()?;
        Ok(())
    }
}

impl StorageConfig {
    /// Replace `file_path` with a non-blank override.
    pub fn apply_override(&mut self, file_path: Option<String>) {
        if let Some(path) = file_path.filter(|p| !p.trim().is_empty()) {
            self.file_path = path;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.file_path.trim().is_empty() {
            return Err(anyhow!("storage.file_path 为空；请在 config.toml 或环境变量 {FILE_PATH_ENV} 中提供"));
        }
        if Path::new(&self.file_path).is_dir() {
            return Err(anyhow!("storage.file_path 指向一个目录: {}", self.file_path));
        }
        Ok(())
    }
}
