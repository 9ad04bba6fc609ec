// ==========================================
// 网店订单出货系统 - 领域层
// ==========================================
// 职责: 领域实体定义
// ==========================================

// 上传订单（汇入事实 + 派生视图）
pub mod order;

// 出货检查清单
pub mod checklist;

// 远端商店订单
pub mod shop_order;

// 重导出常用实体
pub use checklist::{ChecklistItem, ChecklistUpdate, NewChecklistItem};
pub use order::{OrderLineItem, OrderLineRecord, OrderSummary, PickingItem, UploadEvent};
pub use shop_order::{
    BillingInfo, MetaData, ShippingInfo, ShippingLine, ShopLineItem, ShopOrder,
    ShopOrderMetadata, ShopPickingItem,
};
