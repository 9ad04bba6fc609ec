// ==========================================
// 网店订单出货系统 - API 层错误类型
// ==========================================
// 职责: 汇聚各内层错误，转换为带明确原因的业务错误
// 约定: HTTP 状态码映射在应用层完成，本层只描述错误种类
// ==========================================

use thiserror::Error;

use crate::importer::ImportError;
use crate::repository::RepositoryError;
use crate::shop::ClientError;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ===== 请求层错误 =====
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ===== 汇入错误（文件、表头、行级校验）=====
    #[error("文件汇入失败: {0}")]
    ImportError(String),

    // ===== 远端商店错误 =====
    #[error("远端商店 API 未配置")]
    ShopApiNotConfigured,

    #[error("远端商店请求失败: {0}")]
    ShopApiError(String),

    // ===== 数据访问错误 =====
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 从内层错误转换
// ==========================================

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::Other(err) => ApiError::Other(err),
            other => ApiError::DatabaseError(other.to_string()),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            // 落库失败属于服务端问题，与文件内容错误分开归类
            ImportError::PersistenceFailure(msg) => ApiError::DatabaseError(msg),
            ImportError::Other(err) => ApiError::Other(err),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotConfigured => ApiError::ShopApiNotConfigured,
            other => ApiError::ShopApiError(other.to_string()),
        }
    }
}
