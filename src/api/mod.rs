// ==========================================
// 网店订单出货系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口，供 HTTP 路由调用
// ==========================================

pub mod error;
pub mod checklist_api;
pub mod shop_order_api;
pub mod upload_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use checklist_api::ChecklistApi;
pub use shop_order_api::{ShopOrderApi, ShopOrderFilter};
pub use upload_api::OrderUploadApi;
