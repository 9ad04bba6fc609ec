// ==========================================
// 网店订单出货系统 - 上传订单领域模型
// ==========================================
// 一行 OrderLineRecord 对应上传表格中的一个数据行，
// 落库后作为只追加事实，仅能整体清空，不做原地更新。
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// OrderLineRecord - 上传订单行
// ==========================================
// 九个逻辑栏位，必填栏位在汇入阶段已全部校验通过
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineRecord {
    pub order_no: String,              // 订单编号（非空）
    pub ordered_at: DateTime<Utc>,     // 订购时间
    pub receiver_name: String,         // 收件人姓名（非空）
    pub address: String,               // 取件地址（非空）
    pub product_name: String,          // 商品名称（非空）
    pub unit_price: f64,               // 单价
    pub discount_price: f64,           // 优惠价（实际成交价）
    pub qty: i64,                      // 数量
    pub note: String,                  // 备注（可为空字符串）
}

// ==========================================
// UploadEvent - 上传台账事件
// ==========================================
// 每次成功汇入追加一条，只增不改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadEvent {
    pub batch_id: String,              // 批次标识（UUID，用于日志关联）
    pub uploaded_at: DateTime<Utc>,    // 上传时间
}

impl UploadEvent {
    /// 以给定时间生成一条新事件（批次号自动分配）
    pub fn at(uploaded_at: DateTime<Utc>) -> Self {
        Self {
            batch_id: Uuid::new_v4().to_string(),
            uploaded_at,
        }
    }

    /// 以当前时间生成一条新事件
    pub fn now() -> Self {
        Self::at(Utc::now())
    }
}

// ==========================================
// OrderSummary - 订单维度汇总（派生，不落库）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub order_no: String,              // 订单编号
    pub ordered_at: DateTime<Utc>,     // 该订单最早的订购时间
    pub receiver_name: String,         // 收件人姓名（首个非空值）
    pub address: String,               // 取件地址（首个非空值）
    pub total_qty: i64,                // 数量合计
    pub total_amount: f64,             // 金额合计（Σ 优惠价 × 数量）
    pub items: Vec<OrderLineItem>,     // 明细（按原始遇到顺序）
}

/// 订单汇总中的单个明细行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_name: String,          // 商品名称
    pub unit_price: f64,               // 单价
    pub discount_price: f64,           // 优惠价
    pub qty: i64,                      // 数量
    pub note: String,                  // 备注
}

impl From<&OrderLineRecord> for OrderLineItem {
    fn from(record: &OrderLineRecord) -> Self {
        Self {
            product_name: record.product_name.clone(),
            unit_price: record.unit_price,
            discount_price: record.discount_price,
            qty: record.qty,
            note: record.note.clone(),
        }
    }
}

// ==========================================
// PickingItem - 商品维度拣货汇总（派生，不落库）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickingItem {
    pub product_name: String,          // 商品名称
    pub total_qty: i64,                // 全部订单的数量合计
    pub order_nos: Vec<String>,        // 涉及的订单编号（去重，字典序升序）
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_event_batch_id_unique() {
        let a = UploadEvent::now();
        let b = UploadEvent::now();
        assert_ne!(a.batch_id, b.batch_id);
    }

    #[test]
    fn test_order_line_item_from_record() {
        let record = OrderLineRecord {
            order_no: "A100".to_string(),
            ordered_at: Utc::now(),
            receiver_name: "王小明".to_string(),
            address: "台北市中正區一段1號".to_string(),
            product_name: "玫瑰花束".to_string(),
            unit_price: 350.0,
            discount_price: 300.0,
            qty: 2,
            note: "週五前到貨".to_string(),
        };
        let item = OrderLineItem::from(&record);
        assert_eq!(item.product_name, "玫瑰花束");
        assert_eq!(item.qty, 2);
        assert_eq!(item.note, "週五前到貨");
    }
}
