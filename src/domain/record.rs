// ==========================================
// 产品编码导入系统 - 编码记录
// ==========================================

use crate::domain::code::Code;
use crate::domain::types::{Partition, RecordId};
use serde::{Deserialize, Serialize};

// ==========================================
// CodeRecord - 已落库的 (标识, 编码) 对
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRecord {
    pub id: RecordId,
    pub code: Code,
}

impl CodeRecord {
    pub fn new(id: RecordId, code: Code) -> Self {
        Self { id, code }
    }
}

// ==========================================
// CodeEdit - 修改结果（供宿主展示 旧 → 新）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEdit {
    pub partition: Partition,
    pub id: RecordId,
    pub previous: Code,
    pub current: Code,
}
