// ==========================================
// 网店订单出货系统 - 表格文件解析器
// ==========================================
// 职责: 把上传的文件字节解码为字符串网格
// 支持: Excel (.xlsx) / CSV (.csv)
// 约定: 网格保留工作表的物理行序（含前导空行），
//       表头定位与行号报错都依赖这一点
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_from_rs, Reader, Xlsx};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;

/// 表格解析器: 文件字节 → 字符串网格
pub trait SheetParser {
    fn parse_grid(&self, bytes: &[u8]) -> ImportResult<Vec<Vec<String>>>;
}

// ==========================================
// CSV 解析器
// ==========================================
pub struct CsvSheetParser;

impl SheetParser for CsvSheetParser {
    fn parse_grid(&self, bytes: &[u8]) -> ImportResult<Vec<Vec<String>>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut grid = Vec::new();
        for result in reader.records() {
            let record = result?;
            grid.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(grid)
    }
}

// ==========================================
// Excel 解析器
// ==========================================
pub struct XlsxSheetParser;

impl SheetParser for XlsxSheetParser {
    fn parse_grid(&self, bytes: &[u8]) -> ImportResult<Vec<Vec<String>>> {
        let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes))?;

        // 读取第一个工作表
        let sheet_names = workbook.sheet_names();
        let first_sheet = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&first_sheet)?;

        // calamine 的 Range 从首个有值单元格起算，
        // 这里补齐前导空行，保证网格下标即物理行号
        let leading_rows = range.start().map(|(row, _col)| row as usize).unwrap_or(0);

        let mut grid: Vec<Vec<String>> = Vec::with_capacity(leading_rows + range.height());
        for _ in 0..leading_rows {
            grid.push(Vec::new());
        }
        for row in range.rows() {
            grid.push(row.iter().map(|cell| cell.to_string()).collect());
        }

        Ok(grid)
    }
}

// ==========================================
// 通用解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalSheetParser;

impl UniversalSheetParser {
    pub fn parse(&self, file_name: &str, bytes: &[u8]) -> ImportResult<Vec<Vec<String>>> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvSheetParser.parse_grid(bytes),
            "xlsx" => XlsxSheetParser.parse_grid(bytes),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
