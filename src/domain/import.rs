// ==========================================
// 产品编码导入系统 - 导入结果模型
// ==========================================
// 用途: 单次导入运行的汇总（不落库，仅返回给宿主）
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// LineError - 行级错误（行号从 1 开始）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineError {
    pub line_no: usize,
    pub message: String,
}

impl LineError {
    pub fn new(line_no: usize, message: impl Into<String>) -> Self {
        Self {
            line_no,
            message: message.into(),
        }
    }
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_no, self.message)
    }
}

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub run_id: String,          // 运行 ID（UUID v4）
    pub total_lines: usize,      // 输入总行数（含空行）
    pub inserted: usize,         // 新插入
    pub duplicates: usize,       // 分区内重复
    pub blank_lines: usize,      // 跳过的空行
    pub errors: Vec<LineError>,  // 行级错误（按行号顺序）
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u64,
}

impl ImportSummary {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// 错误消息列表，如 `Line 1: code too short '12345'`
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.to_string()).collect()
    }

    /// 状态栏文案
    pub fn status_line(&self) -> String {
        format!(
            "Import finished: {} inserted, {} duplicates, {} errors.",
            self.inserted,
            self.duplicates,
            self.errors.len()
        )
    }
}
