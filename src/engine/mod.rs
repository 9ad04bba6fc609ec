// ==========================================
// 网店订单出货系统 - 引擎层
// ==========================================
// 职责: 订单汇总与拣货清单的聚合规则
// 红线: Engine 不拼 SQL，纯函数可重放
// ==========================================

pub mod order_summary;
pub mod picking;

// 重导出核心引擎
pub use order_summary::build_order_summaries;
pub use picking::{build_picking_items, build_shop_picking_list};
