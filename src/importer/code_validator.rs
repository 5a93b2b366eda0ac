// ==========================================
// 产品编码导入系统 - 编码行校验器
// ==========================================
// 规则:
// - 空行/纯空白行: 静默跳过（不计错误，不计插入）
// - trim 后不足 13 字符: TooShort
// - 超过 13 字符: 截取前 13 字符；非全数字: NotNumeric
// 纯函数: 无副作用，无 I/O
// ==========================================

use crate::domain::{Code, LineError, CODE_LEN};
use std::fmt;

/// 拒绝原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// 携带 trim 后文本
    TooShort(String),
    /// 携带截取后的 13 字符
    NotNumeric(String),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::TooShort(text) => write!(f, "code too short '{}'", text),
            RejectReason::NotNumeric(text) => write!(f, "code non-numeric '{}'", text),
        }
    }
}

/// 单行校验结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineVerdict {
    Blank,
    Accepted(Code),
    Rejected { line_no: usize, reason: RejectReason },
}

impl LineVerdict {
    /// 拒绝时转为行级错误
    pub fn to_line_error(&self) -> Option<LineError> {
        match self {
            LineVerdict::Rejected { line_no, reason } => {
                Some(LineError::new(*line_no, reason.to_string()))
            }
            _ => None,
        }
    }
}

/// 校验一行原始文本
///
/// # 参数
/// - line_no: 行号（从 1 开始）
/// - raw: 原始行（可能带换行符或尾随空白）
pub fn validate_line(line_no: usize, raw: &str) -> LineVerdict {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return LineVerdict::Blank;
    }

    if trimmed.chars().count() < CODE_LEN {
        return LineVerdict::Rejected {
            line_no,
            reason: RejectReason::TooShort(trimmed.to_string()),
        };
    }

    let head: String = trimmed.chars().take(CODE_LEN).collect();
    match Code::parse(&head) {
        Ok(code) => LineVerdict::Accepted(code),
        Err(_) => LineVerdict::Rejected {
            line_no,
            reason: RejectReason::NotNumeric(head),
        },
    }
}
