// ==========================================
// 网店订单出货系统 - 表头行定位
// ==========================================
// 职责: 在整张表格中找到首个覆盖全部九栏的表头行
// 约定: 严格按行序探测，命中即停；全表无命中报 HeaderNotFound
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::header_map::{HeaderDictionary, HeaderIndex};
use tracing::debug;

/// 行内是否存在任何非空白单元格
pub fn row_has_data(row: &[String]) -> bool {
    row.iter().any(|cell| !cell.trim().is_empty())
}

/// 定位表头行
///
/// 跳过全空白行，对其余行构建栏位映射；
/// 返回首个九栏齐备的行下标（0 起）与映射。
///
/// # 返回
/// - Ok((row_idx, index)): 表头行下标与 栏位→列 映射
/// - Err(HeaderNotFound): 全表没有合格表头行
pub fn locate_header(
    dictionary: &HeaderDictionary,
    rows: &[Vec<String>],
) -> ImportResult<(usize, HeaderIndex)> {
    for (row_idx, row) in rows.iter().enumerate() {
        if !row_has_data(row) {
            continue;
        }

        let index = dictionary.build_index(row);
        if index.is_complete() {
            debug!(row = row_idx + 1, "表头行定位成功");
            return Ok((row_idx, index));
        }

        let missing: Vec<&str> = index.missing().iter().map(|k| k.as_str()).collect();
        debug!(row = row_idx + 1, missing = ?missing, "该行缺少必要栏位，继续探测");
    }

    Err(ImportError::HeaderNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::header_map::ColumnKey;

    fn as_row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn full_header() -> Vec<String> {
        as_row(&[
            "訂單編號",
            "訂購日期",
            "收件人姓名",
            "取件地址",
            "商品名稱",
            "單價",
            "優惠價",
            "數量",
            "備註",
        ])
    }

    #[test]
    fn test_locates_first_qualifying_row_after_junk() {
        let dict = HeaderDictionary::new();
        let rows = vec![
            as_row(&["門市出貨報表", "", ""]),
            as_row(&["", "", ""]),
            full_header(),
            as_row(&["A001", "2024/01/15", "王小明"]),
        ];

        let (row_idx, index) = locate_header(&dict, &rows).unwrap();
        assert_eq!(row_idx, 2);
        assert_eq!(index.position(ColumnKey::OrderNo), Some(0));
        assert_eq!(index.position(ColumnKey::Note), Some(8));
    }

    #[test]
    fn test_first_match_wins_over_later_header_rows() {
        let dict = HeaderDictionary::new();
        let rows = vec![full_header(), full_header()];

        let (row_idx, _) = locate_header(&dict, &rows).unwrap();
        assert_eq!(row_idx, 0);
    }

    #[test]
    fn test_header_not_found() {
        let dict = HeaderDictionary::new();
        let rows = vec![
            as_row(&["訂單編號", "數量"]), // 栏位不全
            as_row(&["A001", "3"]),
        ];

        let err = locate_header(&dict, &rows).unwrap_err();
        assert!(matches!(err, ImportError::HeaderNotFound));
    }

    #[test]
    fn test_empty_sheet_reports_header_not_found() {
        let dict = HeaderDictionary::new();
        let err = locate_header(&dict, &[]).unwrap_err();
        assert!(matches!(err, ImportError::HeaderNotFound));
    }
}
