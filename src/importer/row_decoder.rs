// ==========================================
// 网店订单出货系统 - 数据行解码器
// ==========================================
// 职责: 按表头索引取单元格，校验必填栏位并
//       解析出一条订单明细
// 约定: 行号为工作表内的物理行号（1 起算），
//       错误信息据此定位
// ==========================================

use crate::domain::OrderLineRecord;
use crate::importer::cell_parser;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_map::{ColumnKey, HeaderIndex};

/// 取指定栏位的单元格文本（去首尾空白）
///
/// 表头索引缺该栏、或行尾单元格被裁掉时一律视为空串。
fn read_cell<'a>(row: &'a [String], index: &HeaderIndex, key: ColumnKey) -> &'a str {
    match index.position(key) {
        Some(pos) if pos < row.len() => row[pos].trim(),
        _ => "",
    }
}

/// 取必填文本栏位，为空即报 MissingRequiredField
fn required_text(
    row: &[String],
    index: &HeaderIndex,
    key: ColumnKey,
    row_number: usize,
) -> ImportResult<String> {
    let value = read_cell(row, index, key);
    if value.is_empty() {
        return Err(ImportError::MissingRequiredField {
            row: row_number,
            field: key.as_str().to_string(),
        });
    }
    Ok(value.to_string())
}

/// 把一行单元格解码为订单明细
///
/// 栏位按固定顺序校验，遇到首个问题立即返回：
/// 先查文本必填栏（订单编号、收件人、地址、商品名），
/// 再解析时间与数值栏。备注栏可空。
pub fn decode_row(
    row: &[String],
    index: &HeaderIndex,
    row_number: usize,
) -> ImportResult<OrderLineRecord> {
    let order_no = required_text(row, index, ColumnKey::OrderNo, row_number)?;
    let receiver_name = required_text(row, index, ColumnKey::ReceiverName, row_number)?;
    let address = required_text(row, index, ColumnKey::Address, row_number)?;
    let product_name = required_text(row, index, ColumnKey::ProductName, row_number)?;
    let note = read_cell(row, index, ColumnKey::Note).to_string();

    let ordered_at_raw = required_text(row, index, ColumnKey::OrderedAt, row_number)?;
    let ordered_at = cell_parser::parse_datetime(&ordered_at_raw)
        .map_err(|e| e.at_field(row_number, ColumnKey::OrderedAt.as_str()))?;

    let unit_price_raw = required_text(row, index, ColumnKey::UnitPrice, row_number)?;
    let unit_price = cell_parser::parse_number(&unit_price_raw)
        .map_err(|e| e.at_field(row_number, ColumnKey::UnitPrice.as_str()))?;

    let discount_price_raw = required_text(row, index, ColumnKey::DiscountPrice, row_number)?;
    let discount_price = cell_parser::parse_number(&discount_price_raw)
        .map_err(|e| e.at_field(row_number, ColumnKey::DiscountPrice.as_str()))?;

    let qty_raw = required_text(row, index, ColumnKey::Qty, row_number)?;
    let qty = cell_parser::parse_integer(&qty_raw)
        .map_err(|e| e.at_field(row_number, ColumnKey::Qty.as_str()))?;

    Ok(OrderLineRecord {
        order_no,
        ordered_at,
        receiver_name,
        address,
        product_name,
        unit_price,
        discount_price,
        qty,
        note,
    })
}
