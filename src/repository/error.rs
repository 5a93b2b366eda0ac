// ==========================================
// 产品编码导入系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分类: 重复(预期) / 未找到 / 校验 / 存储不可达(致命) / 其他查询错误
// ==========================================

use crate::domain::{CodeFormatError, Partition, RecordId};
use rusqlite::ErrorCode;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 约束错误 =====
    #[error("code {code} already exists in partition {partition}")]
    DuplicateCode { partition: Partition, code: String },

    /// 唯一约束冲突（尚未关联到具体分区/编码）
    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    // ===== 定位错误 =====
    #[error("record not found: partition={partition}, id={id}")]
    NotFound { partition: Partition, id: RecordId },

    // ===== 数据质量错误 =====
    #[error("validation failed: {0}")]
    ValidationError(String),

    // ===== 存储错误 =====
    #[error("cannot reach storage: {0}")]
    StoreUnavailable(String),

    #[error("database lock acquisition failed: {0}")]
    LockError(String),

    #[error("database query failed: {0}")]
    DatabaseQueryError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// 是否为致命错误（中止当前批次）
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RepositoryError::StoreUnavailable(_) | RepositoryError::LockError(_)
        )
    }

    /// 将未定位的唯一约束冲突关联到分区和编码
    pub(crate) fn with_duplicate_context(self, partition: Partition, code: &str) -> Self {
        match self {
            RepositoryError::UniqueConstraintViolation(_) => RepositoryError::DuplicateCode {
                partition,
                code: code.to_string(),
            },
            other => other,
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref e, ref msg) => {
                let text = msg.clone().unwrap_or_else(|| e.to_string());
                if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || (e.code == ErrorCode::ConstraintViolation && text.contains("UNIQUE"))
                {
                    return RepositoryError::UniqueConstraintViolation(text);
                }
                match e.code {
                    ErrorCode::CannotOpen
                    | ErrorCode::NotADatabase
                    | ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::DatabaseCorrupt
                    | ErrorCode::SystemIoFailure
                    | ErrorCode::DiskFull
                    | ErrorCode::PermissionDenied
                    | ErrorCode::ReadOnly
                    | ErrorCode::FileLockingProtocolFailed => RepositoryError::StoreUnavailable(text),
                    _ => RepositoryError::DatabaseQueryError(text),
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl From<CodeFormatError> for RepositoryError {
    fn from(err: CodeFormatError) -> Self {
        RepositoryError::ValidationError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
