//! Items 服务入口

use anyhow::Context;
use items_service::{
    app::items::ItemStore,
    build_store, create_router,
    infrastructure::{load_config, Config, Logger},
    AppState,
};
use std::env;
use tokio::net::TcpListener;
use tracing::{info, warn};

const DEFAULT_CONFIG_OUTPUT: &str = "config/config.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "init-config" => {
                let path = args.get(2).map(String::as_str).unwrap_or(DEFAULT_CONFIG_OUTPUT);
                Config::default()
                    .save_to_file(path)
                    .with_context(|| format!("写入默认配置失败: {}", path))?;
                println!("默认配置已写入 {}", path);
                return Ok(());
            }
            _ => {
                println!("用法: {} [init-config [path]]", args[0]);
                println!("  不带参数    启动 HTTP 服务");
                println!("  init-config 写入默认配置文件（默认 {}）", DEFAULT_CONFIG_OUTPUT);
                return Ok(());
            }
        }
    }

    let config = load_config().context("加载配置失败")?;

    // guard 需要一直持有到进程退出
    let _log_guard = Logger::init(&config.logging).context("初始化日志失败")?;

    match &config.source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }

    let store = build_store(&config.store);
    info!(
        "内存存储已就绪: {} 个条目, ID 分配方式 {:?}",
        store.len()?,
        store.strategy()
    );
    if store.is_empty()? {
        warn!("存储为空，未写入示例数据");
    }

    let state = AppState::new(store);
    let app = create_router(state, &config.http);

    let listener = TcpListener::bind((config.http.bind_address.as_str(), config.http.port))
        .await
        .with_context(|| {
            format!(
                "无法绑定到 {}:{}",
                config.http.bind_address, config.http.port
            )
        })?;

    info!("🚀 Items 服务运行在 http://{}", listener.local_addr()?);
    info!("📖 API 端点:");
    info!("   GET    /items          - 获取所有条目");
    info!("   GET    /items?id=<id>  - 获取特定条目");
    info!("   POST   /items          - 创建新条目");
    info!("   PUT    /items          - 更新条目");
    info!("   DELETE /items?id=<id>  - 删除条目");
    info!("   GET    /health         - 健康检查");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("服务器运行失败")?;

    info!("服务器已停止");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("监听 Ctrl-C 失败: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("监听 SIGTERM 失败: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到退出信号，开始优雅关闭...");
}
