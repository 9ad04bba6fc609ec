// ==========================================
// 网店订单出货系统 - 日志初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认日志过滤器
///
/// hyper / reqwest 的连接层日志过于细碎，默认压到 warn
const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认见 [`DEFAULT_FILTER`]）
///   例如: RUST_LOG=debug 或 RUST_LOG=shop_order_hub=trace
///
/// # 示例
/// ```no_run
/// use shop_order_hub::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}

/// 初始化测试环境的日志系统
///
/// 日志级别固定为 debug，输出走测试捕获通道；
/// 重复调用不报错，方便多个测试各自初始化。
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("shop_order_hub=debug"))
        .with_test_writer()
        .try_init();
}
