// ==========================================
// 产品编码导入系统 - API层错误类型
// ==========================================
// 职责: 将 Repository/Import/分页错误转换为面向宿主的错误
// ==========================================

use crate::domain::{Partition, RecordId};
use crate::importer::ImportError;
use crate::read_model::PageError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("validation failed: {0}")]
    ValidationError(String),

    #[error("code {code} already exists in partition {partition}")]
    DuplicateCode { partition: Partition, code: String },

    #[error("record not found: partition={partition}, id={id}")]
    NotFound { partition: Partition, id: RecordId },

    #[error("{0}")]
    OutOfRange(String),

    // ==========================================
    // 并发控制错误
    // ==========================================
    #[error("an import is already running")]
    ImportInProgress,

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("cannot reach storage: {0}")]
    StorageUnavailable(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("import failed: {0}")]
    ImportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::DuplicateCode { partition, code } => {
                ApiError::DuplicateCode { partition, code }
            }
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::ValidationError(format!("unique constraint violated: {}", msg))
            }
            RepositoryError::NotFound { partition, id } => ApiError::NotFound { partition, id },
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::StoreUnavailable(msg) => ApiError::StorageUnavailable(msg),
            RepositoryError::LockError(msg) => {
                ApiError::StorageUnavailable(format!("database lock: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::Other(e) => ApiError::Other(e),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::StoreUnavailable { message, .. } => ApiError::StorageUnavailable(message),
            ImportError::FileNotFound(path) => {
                ApiError::InvalidInput(format!("file not found: {}", path))
            }
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

impl From<PageError> for ApiError {
    fn from(err: PageError) -> Self {
        ApiError::OutOfRange(err.to_string())
    }
}

/// API层Result类型别名
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// 是否为存储不可达
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, ApiError::StorageUnavailable(_))
    }
}
