// ==========================================
// 网店订单出货系统 - 远端商店模块
// ==========================================

// 远端订单 REST 客户端
pub mod client;

pub use client::{
    ClientError, ClientResult, HttpShopOrderClient, ShopOrderClient, MAX_BATCH_ORDER_IDS,
};
