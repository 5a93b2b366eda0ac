// ==========================================
// 产品编码导入系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 行级错误不走此类型（收集到 ImportSummary.errors），
//       这里只表达中止整次运行或文件读写失败的情况
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("failed to read file: {0}")]
    FileReadError(String),

    #[error("failed to write file: {0}")]
    FileWriteError(String),

    // ===== 存储错误（致命）=====
    /// 存储不可达，剩余行不再尝试
    #[error("cannot reach storage (aborted at line {line_no}): {message}")]
    StoreUnavailable { line_no: usize, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 由致命仓储错误构造（line_no = 0 表示运行开始前的连通性探测）
    pub(crate) fn store_unavailable(line_no: usize, err: &RepositoryError) -> Self {
        ImportError::StoreUnavailable {
            line_no,
            message: err.to_string(),
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
