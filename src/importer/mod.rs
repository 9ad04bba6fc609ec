// ==========================================
// 网店订单出货系统 - 汇入层
// ==========================================
// 职责: 解析上传表格，校验并落库订单明细
// 支持: Excel (.xlsx) / CSV (.csv)
// ==========================================

// 模块声明
pub mod cell_parser;
pub mod error;
pub mod header_locator;
pub mod header_map;
pub mod order_importer;
pub mod row_decoder;
pub mod sheet_parser;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use header_locator::{locate_header, row_has_data};
pub use header_map::{ColumnKey, HeaderDictionary, HeaderIndex};
pub use order_importer::OrderBatchImporter;
pub use row_decoder::decode_row;
pub use sheet_parser::{CsvSheetParser, SheetParser, UniversalSheetParser, XlsxSheetParser};
