// ==========================================
// 网店订单出货系统 - 汇入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 行级错误一律整批拒绝，不做部分提交
// ==========================================

use thiserror::Error;

/// 汇入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 表头相关错误 =====
    #[error("找不到包含完整表头的行")]
    HeaderNotFound,

    // ===== 栏位解析错误（不带行号，由行解码器包装）=====
    #[error("无法解析数字: {value}")]
    InvalidNumber { value: String },

    #[error("数量必须为整数: {value}")]
    InvalidInteger { value: String },

    #[error("无法解析日期: {value}")]
    InvalidDate { value: String },

    // ===== 行级错误（带行号与栏位名）=====
    #[error("必填栏位为空 (行 {row}): {field}")]
    MissingRequiredField { row: usize, field: String },

    #[error("栏位解析失败 (行 {row}, 栏位 {field}): {source}")]
    FieldParseError {
        row: usize,
        field: String,
        #[source]
        source: Box<ImportError>,
    },

    // ===== 持久化错误 =====
    #[error("数据持久化失败: {0}")]
    PersistenceFailure(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 为解析器层错误补上行号与栏位名
    pub fn at_field(self, row: usize, field: &str) -> Self {
        ImportError::FieldParseError {
            row,
            field: field.to_string(),
            source: Box::new(self),
        }
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::XlsxError>
impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

// 实现 From<RepositoryError>：落库失败对汇入方不透明
impl From<crate::repository::error::RepositoryError> for ImportError {
    fn from(err: crate::repository::error::RepositoryError) -> Self {
        ImportError::PersistenceFailure(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
