// ==========================================
// 产品编码导入系统 - 编码值对象
// ==========================================
// 不变量: 恰好 13 个字符,全部为 ASCII 十进制数字
// ==========================================

use crate::domain::types::CODE_LEN;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 编码格式错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeFormatError {
    #[error("code must be exactly {expected} digits, got {actual} characters: '{text}'")]
    WrongLength {
        expected: usize,
        actual: usize,
        text: String,
    },

    #[error("code must contain only decimal digits: '{0}'")]
    NotNumeric(String),
}

/// 13 位数字编码
///
/// 只能经由 [`Code::parse`] 构造，构造成功即满足不变量。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// 严格解析（不做 trim，不做截断）
    pub fn parse(text: &str) -> Result<Self, CodeFormatError> {
        let actual = text.chars().count();
        if actual != CODE_LEN {
            return Err(CodeFormatError::WrongLength {
                expected: CODE_LEN,
                actual,
                text: text.to_string(),
            });
        }
        if !text.chars().all(|c| c.is_ascii_digit()) {
            return Err(CodeFormatError::NotNumeric(text.to_string()));
        }
        Ok(Self(text.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 前 n 位
    pub fn prefix(&self, n: usize) -> &str {
        // 全部为 ASCII，按字节切片安全
        &self.0[..n.min(CODE_LEN)]
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Code {
    type Err = CodeFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Code::parse(s)
    }
}

impl TryFrom<String> for Code {
    type Error = CodeFormatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Code::parse(&value)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
