// ==========================================
// 网店订单出货系统 - 订单汇总引擎
// ==========================================
// 职责: 把订单明细按订单编号聚合成汇总视图
// 输入: 订单明细列表（遇到顺序即明细顺序）
// 输出: OrderSummary 列表，订购时间降序、同时间按订单编号升序
// 红线: 纯函数，不碰数据库
// ==========================================

use crate::domain::{OrderLineItem, OrderLineRecord, OrderSummary};
use std::collections::HashMap;

/// 构建订单维度汇总
///
/// 分组规则:
/// - 订单编号为空的明细不参与分组
/// - 订购时间取组内最早值
/// - 收件人、地址取组内首个非空值
/// - 数量合计 Σ qty，金额合计 Σ 优惠价 × 数量
/// - 明细按输入顺序进入 items
///
/// 输出排序固定为订购时间降序，同时间按订单编号升序。
pub fn build_order_summaries(records: &[OrderLineRecord]) -> Vec<OrderSummary> {
    let mut grouped: HashMap<String, OrderSummary> = HashMap::new();

    for record in records {
        if record.order_no.is_empty() {
            continue;
        }

        let summary = grouped
            .entry(record.order_no.clone())
            .or_insert_with(|| OrderSummary {
                order_no: record.order_no.clone(),
                ordered_at: record.ordered_at,
                receiver_name: record.receiver_name.clone(),
                address: record.address.clone(),
                total_qty: 0,
                total_amount: 0.0,
                items: Vec::new(),
            });

        if record.ordered_at < summary.ordered_at {
            summary.ordered_at = record.ordered_at;
        }
        if summary.receiver_name.is_empty() {
            summary.receiver_name = record.receiver_name.clone();
        }
        if summary.address.is_empty() {
            summary.address = record.address.clone();
        }

        summary.total_qty += record.qty;
        summary.total_amount += record.discount_price * record.qty as f64;
        summary.items.push(OrderLineItem::from(record));
    }

    let mut summaries: Vec<OrderSummary> = grouped.into_values().collect();
    summaries.sort_by(|a, b| {
        b.ordered_at
            .cmp(&a.ordered_at)
            .then_with(|| a.order_no.cmp(&b.order_no))
    });
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn ts(raw: &str) -> chrono::DateTime<chrono::Utc> {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
            .unwrap()
            .and_utc()
    }

    fn record(
        order_no: &str,
        ordered_at: &str,
        receiver: &str,
        address: &str,
        product: &str,
        discount_price: f64,
        qty: i64,
    ) -> OrderLineRecord {
        OrderLineRecord {
            order_no: order_no.to_string(),
            ordered_at: ts(ordered_at),
            receiver_name: receiver.to_string(),
            address: address.to_string(),
            product_name: product.to_string(),
            unit_price: discount_price,
            discount_price,
            qty,
            note: String::new(),
        }
    }

    #[test]
    fn test_totals_per_order() {
        // A100: 10×2 + 20×3 = 80，数量 5
        let records = vec![
            record("A100", "2024-01-15 10:00:00", "王小明", "台北市", "黑咖啡", 10.0, 2),
            record("A100", "2024-01-15 10:00:00", "王小明", "台北市", "拿鐵", 20.0, 3),
        ];

        let summaries = build_order_summaries(&records);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].order_no, "A100");
        assert_eq!(summaries[0].total_qty, 5);
        assert_eq!(summaries[0].total_amount, 80.0);
        assert_eq!(summaries[0].items.len(), 2);
        assert_eq!(summaries[0].items[0].product_name, "黑咖啡");
        assert_eq!(summaries[0].items[1].product_name, "拿鐵");
    }

    #[test]
    fn test_earliest_ordered_at_wins() {
        let records = vec![
            record("A100", "2024-01-16 09:00:00", "王小明", "台北市", "黑咖啡", 10.0, 1),
            record("A100", "2024-01-15 08:00:00", "王小明", "台北市", "拿鐵", 10.0, 1),
        ];

        let summaries = build_order_summaries(&records);
        assert_eq!(summaries[0].ordered_at, ts("2024-01-15 08:00:00"));
    }

    #[test]
    fn test_first_non_empty_receiver_and_address() {
        let records = vec![
            record("A100", "2024-01-15 10:00:00", "", "", "黑咖啡", 10.0, 1),
            record("A100", "2024-01-15 10:00:00", "王小明", "台北市", "拿鐵", 10.0, 1),
        ];

        let summaries = build_order_summaries(&records);
        assert_eq!(summaries[0].receiver_name, "王小明");
        assert_eq!(summaries[0].address, "台北市");
    }

    #[test]
    fn test_sorted_newest_first_with_order_no_tiebreak() {
        let records = vec![
            record("B200", "2024-01-15 10:00:00", "王", "台北", "咖啡", 10.0, 1),
            record("A100", "2024-01-15 10:00:00", "李", "台中", "拿鐵", 10.0, 1),
            record("C300", "2024-01-20 10:00:00", "陳", "高雄", "紅茶", 10.0, 1),
        ];

        let summaries = build_order_summaries(&records);
        let order: Vec<&str> = summaries.iter().map(|s| s.order_no.as_str()).collect();
        assert_eq!(order, vec!["C300", "A100", "B200"]);
    }

    #[test]
    fn test_empty_order_no_excluded() {
        let records = vec![
            record("", "2024-01-15 10:00:00", "王", "台北", "咖啡", 10.0, 1),
            record("A100", "2024-01-15 10:00:00", "李", "台中", "拿鐵", 10.0, 1),
        ];

        let summaries = build_order_summaries(&records);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].order_no, "A100");
    }
}
