// ==========================================
// 网店订单出货系统 - 拣货清单引擎
// ==========================================
// 职责: 把订单明细按商品聚合成拣货视图
// 输出排序: 数量降序，同数量按商品名升序
// 红线: 纯函数，不碰数据库
// ==========================================

use crate::domain::{OrderLineRecord, PickingItem, ShopOrder, ShopPickingItem};
use std::collections::{BTreeSet, HashMap};

/// 构建上传订单的拣货清单
///
/// 商品名去首尾空白后分组，空白商品名跳过。
/// 订单编号去重后按字典序升序；空订单编号计入数量但不入编号列表。
pub fn build_picking_items(records: &[OrderLineRecord]) -> Vec<PickingItem> {
    struct Accumulator {
        total_qty: i64,
        order_nos: BTreeSet<String>,
    }

    let mut by_product: HashMap<String, Accumulator> = HashMap::new();

    for record in records {
        let name = record.product_name.trim();
        if name.is_empty() {
            continue;
        }

        let acc = by_product
            .entry(name.to_string())
            .or_insert_with(|| Accumulator {
                total_qty: 0,
                order_nos: BTreeSet::new(),
            });

        acc.total_qty += record.qty;
        if !record.order_no.is_empty() {
            acc.order_nos.insert(record.order_no.clone());
        }
    }

    let mut items: Vec<PickingItem> = by_product
        .into_iter()
        .map(|(product_name, acc)| PickingItem {
            product_name,
            total_qty: acc.total_qty,
            order_nos: acc.order_nos.into_iter().collect(),
        })
        .collect();

    items.sort_by(|a, b| {
        b.total_qty
            .cmp(&a.total_qty)
            .then_with(|| a.product_name.cmp(&b.product_name))
    });
    items
}

/// 构建网店订单（远端）的拣货清单
///
/// 按商品名聚合所有处理中订单的明细行，
/// 订单 id 去重后升序。
pub fn build_shop_picking_list(orders: &[ShopOrder]) -> Vec<ShopPickingItem> {
    struct Accumulator {
        quantity: i64,
        order_ids: BTreeSet<i64>,
    }

    let mut by_name: HashMap<String, Accumulator> = HashMap::new();

    for order in orders {
        for line in &order.line_items {
            let acc = by_name.entry(line.name.clone()).or_insert_with(|| Accumulator {
                quantity: 0,
                order_ids: BTreeSet::new(),
            });
            acc.quantity += line.quantity;
            acc.order_ids.insert(order.id);
        }
    }

    let mut items: Vec<ShopPickingItem> = by_name
        .into_iter()
        .map(|(name, acc)| ShopPickingItem {
            name,
            quantity: acc.quantity,
            order_ids: acc.order_ids.into_iter().collect(),
        })
        .collect();

    items.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.name.cmp(&b.name))
    });
    items
}
