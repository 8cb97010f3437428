//! 配置加载
//!
//! 配置文件为 TOML 格式，查找顺序：
//! 1. 环境变量 `ITEMS_CONFIG` 指定的路径
//! 2. `config.toml`
//! 3. `./config/config.toml`
//!
//! 都不存在时使用默认配置。环境变量 `ITEMS_PORT` 可以覆盖端口。

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::app::items::store::IdStrategy;

pub const CONFIG_PATH_ENV: &str = "ITEMS_CONFIG";
pub const PORT_ENV: &str = "ITEMS_PORT";

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];
const DEFAULT_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024; // 2 MiB
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 服务配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 服务配置
    pub http: HttpConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 存储配置
    pub store: StoreConfig,
    /// 实际加载的配置文件，使用默认配置时为 `None`
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// 绑定地址
    pub bind_address: String,
    /// HTTP 服务端口
    pub port: u16,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
    /// 请求体大小上限（字节）
    pub body_limit_bytes: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)，`RUST_LOG` 优先
    pub level: String,
    /// 设置后额外按天写入日志文件
    pub log_dir: Option<PathBuf>,
    /// 日志文件名前缀
    pub file_prefix: String,
}

/// 存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 启动时是否写入示例数据
    pub seed_sample_items: bool,
    /// 新条目 ID 分配方式
    pub id_strategy: IdStrategy,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            timeout_seconds: 30,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: None,
            file_prefix: "items".to_string(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            seed_sample_items: true,
            id_strategy: IdStrategy::Length,
        }
    }
}

impl HttpConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let mut config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.source = Some(path.as_ref().to_path_buf());

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::FileWrite(e.to_string()))?;
        }

        fs::write(path.as_ref(), content).map_err(|e| ConfigError::FileWrite(e.to_string()))?;

        Ok(())
    }

    /// 用环境变量中的端口覆盖配置
    pub fn apply_port_override(&mut self, value: Option<String>) -> Result<(), ConfigError> {
        if let Some(raw) = value {
            self.http.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Validation(format!("无效的 {}: {}", PORT_ENV, raw)))?;
        }
        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.trim().is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }
        if self.http.body_limit_bytes == 0 {
            return Err(ConfigError::Validation("请求体大小上限必须大于0".to_string()));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, VALID_LOG_LEVELS
            )));
        }
        if self.logging.log_dir.is_some() && self.logging.file_prefix.trim().is_empty() {
            return Err(ConfigError::Validation("日志文件前缀不能为空".to_string()));
        }

        Ok(())
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("文件写入错误: {0}")]
    FileWrite(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置序列化错误: {0}")]
    Serialize(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 从文件或默认值加载配置，应用环境变量覆盖并验证
pub fn load_config() -> Result<Config, ConfigError> {
    let mut config = match env::var(CONFIG_PATH_ENV) {
        Ok(path) => Config::load_from_file(path)?,
        Err(_) => DEFAULT_CONFIG_PATHS
            .iter()
            .map(Path::new)
            .find(|path| path.exists())
            .map(Config::load_from_file)
            .transpose()?
            .unwrap_or_default(),
    };

    config.apply_port_override(env::var(PORT_ENV).ok())?;
    config.validate()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.http.body_limit_bytes, 2 * 1024 * 1024);
        assert_eq!(config.logging.level, "info");
        assert!(config.store.seed_sample_items);
        assert_eq!(config.store.id_strategy, IdStrategy::Length);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.http.port = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.bind_address = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.http.body_limit_bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_save_load() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.http.port = 9090;
        config.store.id_strategy = IdStrategy::Monotonic;
        config.save_to_file(&config_path).unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert_eq!(loaded.http.port, 9090);
        assert_eq!(loaded.store.id_strategy, IdStrategy::Monotonic);
        assert_eq!(loaded.source.as_deref(), Some(config_path.as_path()));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[store]\nseed_sample_items = false\nid_strategy = \"monotonic\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_file(&config_path).unwrap();
        assert!(!loaded.store.seed_sample_items);
        assert_eq!(loaded.store.id_strategy, IdStrategy::Monotonic);
        assert_eq!(loaded.http.port, 8080);
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[http]\nport = \"eighty\"\n").unwrap();

        assert!(matches!(
            Config::load_from_file(&config_path),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::load_from_file(dir.path().join("missing.toml")),
            Err(ConfigError::FileRead(_))
        ));
    }

    #[test]
    fn test_port_override() {
        let mut config = Config::default();
        config.apply_port_override(Some("3001".to_string())).unwrap();
        assert_eq!(config.http.port, 3001);

        config.apply_port_override(None).unwrap();
        assert_eq!(config.http.port, 3001);

        assert!(config.apply_port_override(Some("abc".to_string())).is_err());
    }
}
