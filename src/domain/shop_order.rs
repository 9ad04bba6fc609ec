// ==========================================
// 网店订单出货系统 - 远端商店订单模型
// ==========================================
// 远端 REST API（WooCommerce 风格）的订单载荷，
// 附加本地维护的 ShopOrderMetadata（备注/标签/完成标记）。
// 远端字段在响应中原样透传，缺省字段容忍缺失。
// ==========================================

use serde::{Deserialize, Serialize};

/// 远端商店订单（处理中订单列表 / 单笔查询的载荷）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopOrder {
    pub id: i64,
    #[serde(default)]
    pub date_created: String,
    #[serde(default)]
    pub shipping: ShippingInfo,
    #[serde(default)]
    pub billing: BillingInfo,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub line_items: Vec<ShopLineItem>,
    #[serde(default)]
    pub meta_data: Vec<MetaData>,
    #[serde(default)]
    pub customer_note: String,
    #[serde(default)]
    pub shipping_lines: Vec<ShippingLine>,
    #[serde(default)]
    pub payment_method_title: String,
    /// 本地备注数据，查询后合并写入；远端载荷中不存在
    #[serde(default, skip_deserializing)]
    pub order_metadata: ShopOrderMetadata,
}

/// 账单联系信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// 收件信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingInfo {
    #[serde(default)]
    pub first_name: String,
}

/// 远端订单的商品行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopLineItem {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub total: String,
    #[serde(default)]
    pub meta_data: Vec<MetaData>,
}

/// 远端附加键值对（规格、客制选项等）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetaData {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub display_key: String,
    #[serde(default)]
    pub display_value: String,
}

/// 配送方式行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShippingLine {
    #[serde(default)]
    pub method_title: String,
}

// ==========================================
// ShopOrderMetadata - 本地订单备注
// ==========================================
// 以远端订单 id 为主键，存于本地库；tags 以 JSON 数组落库
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShopOrderMetadata {
    pub order_id: i64,
    #[serde(default)]
    pub remark: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl ShopOrderMetadata {
    /// 某订单尚无本地备注时的缺省行
    pub fn empty_for(order_id: i64) -> Self {
        Self {
            order_id,
            remark: String::new(),
            tags: Vec::new(),
            is_completed: false,
        }
    }
}

// ==========================================
// ShopPickingItem - 远端订单拣货汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopPickingItem {
    pub name: String,                  // 商品名称
    pub quantity: i64,                 // 数量合计
    pub order_ids: Vec<i64>,           // 涉及的远端订单 id（去重升序）
}
