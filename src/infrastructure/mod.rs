//! 基础设施层：配置和日志

pub mod config;
pub mod logger;

pub use config::{load_config, Config, ConfigError};
pub use logger::Logger;
