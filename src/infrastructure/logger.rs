//! 日志基础设施

use anyhow::Result;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// 控制台日志始终开启；配置了 `log_dir` 时再按天写一份文件日志。
    /// `RUST_LOG` 存在时覆盖配置中的日志级别。
    ///
    /// 返回的 [`WorkerGuard`] 必须在进程退出前一直持有，否则文件日志会丢失。
    pub fn init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

        let mut guard = None;
        let file_layer = match &config.log_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir)?;
                let (writer, worker_guard) =
                    non_blocking(rolling::daily(dir, &config.file_prefix));
                guard = Some(worker_guard);
                Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false) // 文件中不使用颜色
                        .with_target(false),
                )
            }
            None => None,
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .with(file_layer)
            .try_init()?;

        Ok(guard)
    }
}
