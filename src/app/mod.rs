// ==========================================
// 网店订单出货系统 - 应用层
// ==========================================
// 职责: 组装应用状态与 HTTP 路由
// ==========================================

pub mod routes;
pub mod state;

// 重导出
pub use routes::build_router;
pub use state::AppState;
