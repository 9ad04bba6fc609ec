// ==========================================
// 网店订单出货系统 - 核心库
// ==========================================
// 技术栈: Axum + Rust + SQLite
// 系统定位: 订单汇入、汇总与拣货支持后台
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 汇总业务规则
pub mod engine;

// 导入层 - 表格汇入管线
pub mod importer;

// 远端商店 API 客户端
pub mod shop;

// 配置层 - 环境变量配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - HTTP 服务集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ChecklistItem, OrderLineItem, OrderLineRecord, OrderSummary, PickingItem, ShopOrder,
    ShopOrderMetadata, UploadEvent,
};

// 汇入管线
pub use importer::{
    ColumnKey, HeaderDictionary, HeaderIndex, ImportError, ImportResult, OrderBatchImporter,
};

// 引擎
pub use engine::{build_order_summaries, build_picking_items};

// API
pub use api::{ChecklistApi, OrderUploadApi, ShopOrderApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "网店订单出货系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";
