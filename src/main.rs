// ==========================================
// 网店订单出货系统 - HTTP 服务主入口
// ==========================================
// 技术栈: axum + Rust + SQLite
// ==========================================

use std::sync::Arc;

use shop_order_hub::app::{build_router, AppState};
use shop_order_hub::config::AppConfig;
use shop_order_hub::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", shop_order_hub::APP_NAME);
    tracing::info!("系统版本: {}", shop_order_hub::VERSION);
    tracing::info!("==================================================");

    // 装配配置
    let config = AppConfig::from_env();

    // 创建AppState
    tracing::info!("正在初始化AppState...");
    let state = AppState::new(&config).map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("使用数据库: {}", state.get_db_path());

    // 启动HTTP服务
    let router = build_router(Arc::new(state));
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("HTTP 服务监听: {}", config.listen_addr);
    axum::serve(listener, router).await?;

    Ok(())
}
