// ==========================================
// 产品编码导入系统 - 领域类型定义
// ==========================================
// 职责: 分区枚举与固定业务常量
// 红线: 分区为封闭集合,不允许以字符串表达
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 编码固定长度
pub const CODE_LEN: usize = 13;

/// 主分区编码前缀
pub const PRIMARY_PREFIX: &str = "348094";

/// 分页大小（每页记录数）
pub const PAGE_SIZE: usize = 50;

/// 记录标识（由存储层在插入时分配，仅用于修改/删除定位）
pub type RecordId = i64;

// ==========================================
// 分区 (Partition)
// ==========================================
// 两个互斥的唯一约束集合
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    Primary,   // 前缀 348094
    Secondary, // 其余合法编码
}

impl Partition {
    /// 全部分区（导出顺序: 主分区在前）
    pub const ALL: [Partition; 2] = [Partition::Primary, Partition::Secondary];

    /// 分区对应的数据表名
    pub fn table_name(&self) -> &'static str {
        match self {
            Partition::Primary => "primary_codes",
            Partition::Secondary => "secondary_codes",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Partition::Primary => "primary",
            Partition::Secondary => "secondary",
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Partition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "primary" => Ok(Partition::Primary),
            "secondary" => Ok(Partition::Secondary),
            other => Err(format!("unknown partition '{}'", other)),
        }
    }
}
