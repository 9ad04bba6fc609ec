// ==========================================
// 网店订单出货系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 约定: 所有仓储共享同一个 SQLite 连接
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{ChecklistApi, OrderUploadApi, ShopOrderApi};
use crate::config::AppConfig;
use crate::db;
use crate::repository::{ChecklistRepository, OrderMetadataRepository};
use crate::shop::{HttpShopOrderClient, ShopOrderClient};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 作为 HTTP 服务的全局状态注入各路由处理器
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 上传订单API（导入、查询、汇总、清空）
    pub upload_api: Arc<OrderUploadApi>,

    /// 出货清单API
    pub checklist_api: Arc<ChecklistApi>,

    /// 远端商店订单API
    pub shop_order_api: Arc<ShopOrderApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config: 应用配置
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", config.db_path);

        // 创建数据库连接（共享连接）
        let conn = db::open_sqlite_connection(&config.db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        db::init_schema(&conn).map_err(|e| format!("初始化数据库表失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================

        let checklist_repo = Arc::new(ChecklistRepository::from_connection(conn.clone()));
        let metadata_repo = Arc::new(OrderMetadataRepository::from_connection(conn.clone()));

        // ==========================================
        // 初始化API层
        // ==========================================

        let upload_api = Arc::new(OrderUploadApi::new(conn.clone()));
        let checklist_api = Arc::new(ChecklistApi::new(checklist_repo));

        // 远端商店客户端可缺省：未配置时相关接口返回“未配置”错误
        let shop_client: Option<Arc<dyn ShopOrderClient>> = match &config.shop_api {
            Some(shop_config) => match HttpShopOrderClient::new(shop_config.clone()) {
                Ok(client) => {
                    tracing::info!("远端商店 API 已配置: {}", shop_config.base_url);
                    Some(Arc::new(client))
                }
                Err(e) => {
                    tracing::warn!("远端商店客户端初始化失败: {}，远端订单接口不可用", e);
                    None
                }
            },
            None => {
                tracing::warn!("未配置 SHOP_API_BASE_URL，远端订单接口不可用");
                None
            }
        };
        let shop_order_api = Arc::new(ShopOrderApi::new(shop_client, metadata_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path: config.db_path.clone(),
            upload_api,
            checklist_api,
            shop_order_api,
        })
    }

    /// 获取数据库路径
    pub fn get_db_path(&self) -> &str {
        &self.db_path
    }
}

// 注意：AppState::new() 的测试需要真实的数据库文件
// 这些测试在集成测试中进行
