// ==========================================
// 网店订单出货系统 - 表头归一化与栏位映射
// ==========================================
// 职责: 把各家表格五花八门的表头文字归一化，
//       映射到九个逻辑栏位之一
// 约定: 映射表在进程启动时构建一次，之后只读
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ==========================================
// ColumnKey - 九个逻辑栏位
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKey {
    OrderNo,       // 订单编号
    OrderedAt,     // 订购时间
    ReceiverName,  // 收件人姓名
    Address,       // 取件地址
    ProductName,   // 商品名称
    UnitPrice,     // 单价
    DiscountPrice, // 优惠价
    Qty,           // 数量
    Note,          // 备注
}

impl ColumnKey {
    /// 全部逻辑栏位（固定顺序，缺栏报告按此排序）
    pub const ALL: [ColumnKey; 9] = [
        ColumnKey::OrderNo,
        ColumnKey::OrderedAt,
        ColumnKey::ReceiverName,
        ColumnKey::Address,
        ColumnKey::ProductName,
        ColumnKey::UnitPrice,
        ColumnKey::DiscountPrice,
        ColumnKey::Qty,
        ColumnKey::Note,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKey::OrderNo => "order_no",
            ColumnKey::OrderedAt => "ordered_at",
            ColumnKey::ReceiverName => "receiver_name",
            ColumnKey::Address => "address",
            ColumnKey::ProductName => "product_name",
            ColumnKey::UnitPrice => "unit_price",
            ColumnKey::DiscountPrice => "discount_price",
            ColumnKey::Qty => "qty",
            ColumnKey::Note => "note",
        }
    }
}

impl fmt::Display for ColumnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 表头归一化
// ==========================================

/// 归一化表头文字
///
/// 去除首尾空白后转小写，再剔除常见装饰符号
/// （半角/全角括号、冒号、斜杠、点号、顿号、连字符、下划线与换行符）。
pub fn normalize_header(raw: &str) -> String {
    const STRIP_CHARS: &[char] = &[
        ' ', '_', '-', '：', ':', '(', ')', '（', '）', '.', '。', '、', '/', '／', '\n', '\r',
        '\t',
    ];
    raw.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !STRIP_CHARS.contains(c))
        .collect()
}

// ==========================================
// HeaderIndex - 逻辑栏位 → 列下标
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct HeaderIndex {
    positions: HashMap<ColumnKey, usize>,
}

impl HeaderIndex {
    /// 某逻辑栏位对应的列下标
    pub fn position(&self, key: ColumnKey) -> Option<usize> {
        self.positions.get(&key).copied()
    }

    /// 九个栏位是否全部覆盖
    pub fn is_complete(&self) -> bool {
        ColumnKey::ALL.iter().all(|k| self.positions.contains_key(k))
    }

    /// 尚未覆盖的栏位（按固定顺序）
    pub fn missing(&self) -> Vec<ColumnKey> {
        ColumnKey::ALL
            .iter()
            .filter(|k| !self.positions.contains_key(k))
            .copied()
            .collect()
    }
}

// ==========================================
// HeaderDictionary - 表头同义词映射表
// ==========================================
// 策略一: 归一化后精确匹配（多语言/多写法同义词）
// 策略二: 子串包含回退（带修饰文字的表头，如「商品名稱(規格)」）；
//         规则按序尝试，首个命中生效，且不覆盖已解析的栏位
pub struct HeaderDictionary {
    exact: HashMap<String, ColumnKey>,
    contains: Vec<(String, ColumnKey)>,
}

impl Default for HeaderDictionary {
    fn default() -> Self {
        // 同义词表涵盖繁体/简体/英文写法，条目以归一化后的形态入表
        let exact_entries: &[(&str, ColumnKey)] = &[
            ("orderno", ColumnKey::OrderNo),
            ("ordernumber", ColumnKey::OrderNo),
            ("訂單編號", ColumnKey::OrderNo),
            ("订单编号", ColumnKey::OrderNo),
            ("orderedat", ColumnKey::OrderedAt),
            ("ordereddatetime", ColumnKey::OrderedAt),
            ("ordereddate", ColumnKey::OrderedAt),
            ("orderedtime", ColumnKey::OrderedAt),
            ("訂購日期", ColumnKey::OrderedAt),
            ("訂單日期", ColumnKey::OrderedAt),
            ("订购日期", ColumnKey::OrderedAt),
            ("订单日期", ColumnKey::OrderedAt),
            ("receivername", ColumnKey::ReceiverName),
            ("收件人姓名", ColumnKey::ReceiverName),
            ("收件人", ColumnKey::ReceiverName),
            ("address", ColumnKey::Address),
            ("取件地址", ColumnKey::Address),
            ("地址", ColumnKey::Address),
            ("productname", ColumnKey::ProductName),
            ("商品名稱", ColumnKey::ProductName),
            ("商品名称", ColumnKey::ProductName),
            ("unitprice", ColumnKey::UnitPrice),
            ("單價", ColumnKey::UnitPrice),
            ("单价", ColumnKey::UnitPrice),
            ("discountprice", ColumnKey::DiscountPrice),
            ("discountedprice", ColumnKey::DiscountPrice),
            ("優惠價", ColumnKey::DiscountPrice),
            ("折扣後價格", ColumnKey::DiscountPrice),
            ("优惠价", ColumnKey::DiscountPrice),
            ("折扣后价格", ColumnKey::DiscountPrice),
            ("qty", ColumnKey::Qty),
            ("quantity", ColumnKey::Qty),
            ("數量", ColumnKey::Qty),
            ("数量", ColumnKey::Qty),
            ("note", ColumnKey::Note),
            ("備註", ColumnKey::Note),
            ("訂單備註", ColumnKey::Note),
            ("备注", ColumnKey::Note),
            ("订单备注", ColumnKey::Note),
        ];

        let mut exact = HashMap::new();
        for (spelling, key) in exact_entries {
            exact.insert(normalize_header(spelling), *key);
        }

        let contains = [
            ("商品名稱", ColumnKey::ProductName),
            ("商品名称", ColumnKey::ProductName),
            ("品名", ColumnKey::ProductName),
            ("規格", ColumnKey::ProductName),
            ("规格", ColumnKey::ProductName),
        ]
        .iter()
        .map(|(substr, key)| (normalize_header(substr), *key))
        .collect();

        Self { exact, contains }
    }
}

impl HeaderDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 归一化后精确查词典
    pub fn resolve_exact(&self, raw: &str) -> Option<ColumnKey> {
        self.exact.get(&normalize_header(raw)).copied()
    }

    /// 对一整行表头构建栏位下标映射
    ///
    /// 每个单元格先走精确匹配；未命中再按序尝试子串规则，
    /// 首个命中的规则生效（已解析过的栏位不被覆盖）。
    /// 无法识别的表头直接忽略，不构成错误。
    pub fn build_index(&self, header_row: &[String]) -> HeaderIndex {
        let mut index = HeaderIndex::default();

        for (col_idx, raw) in header_row.iter().enumerate() {
            let norm = normalize_header(raw);
            if norm.is_empty() {
                continue;
            }

            if let Some(key) = self.exact.get(&norm) {
                index.positions.insert(*key, col_idx);
                continue;
            }

            for (substr, key) in &self.contains {
                if !substr.is_empty() && norm.contains(substr.as_str()) {
                    index.positions.entry(*key).or_insert(col_idx);
                    break;
                }
            }
        }

        index
    }
}
