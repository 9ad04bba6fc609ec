// ==========================================
// 网店订单出货系统 - 运行配置
// ==========================================
// 职责: 从环境变量装配应用配置
// 约定: 未配置远端商店 API 时，相关接口在调用时报“未配置”
// ==========================================

use std::path::PathBuf;

/// 默认监听地址
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// 远端商店 API 配置
#[derive(Debug, Clone)]
pub struct ShopApiConfig {
    /// REST API 根地址（例如 https://shop.example.com/wp-json/wc/v3）
    pub base_url: String,
    /// Basic Auth 用户名（consumer key）
    pub api_key: String,
    /// Basic Auth 密码（consumer secret）
    pub api_secret: String,
}

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite 数据库文件路径
    pub db_path: String,
    /// HTTP 监听地址
    pub listen_addr: String,
    /// 远端商店 API（可缺省）
    pub shop_api: Option<ShopApiConfig>,
}

impl AppConfig {
    /// 从环境变量装配配置
    ///
    /// # 环境变量
    /// - SHOP_ORDER_HUB_DB_PATH: 数据库路径（默认见 [`default_db_path`]）
    /// - SHOP_ORDER_HUB_LISTEN_ADDR: 监听地址（默认 0.0.0.0:8080）
    /// - SHOP_API_BASE_URL / SHOP_API_KEY / SHOP_API_SECRET: 远端商店 API
    pub fn from_env() -> Self {
        let db_path = default_db_path();

        let listen_addr = std::env::var("SHOP_ORDER_HUB_LISTEN_ADDR")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        let shop_api = match std::env::var("SHOP_API_BASE_URL") {
            Ok(base_url) if !base_url.trim().is_empty() => Some(ShopApiConfig {
                base_url: base_url.trim().trim_end_matches('/').to_string(),
                api_key: std::env::var("SHOP_API_KEY").unwrap_or_default(),
                api_secret: std::env::var("SHOP_API_SECRET").unwrap_or_default(),
            }),
            _ => None,
        };

        Self {
            db_path,
            listen_addr,
            shop_api,
        }
    }
}

/// 获取默认数据库路径
///
/// # 返回
/// - 开发环境: 用户数据目录/shop-order-hub-dev/shop_order_hub.db
/// - 生产环境: 用户数据目录/shop-order-hub/shop_order_hub.db
pub fn default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var("SHOP_ORDER_HUB_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 拿不到用户数据目录时退回相对路径
    let mut path = PathBuf::from("./shop_order_hub.db");

    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("shop-order-hub-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("shop-order-hub");
        }

        // 确保目录存在
        std::fs::create_dir_all(&path).ok();
        path = path.join("shop_order_hub.db");
    }

    path.to_string_lossy().to_string()
}
