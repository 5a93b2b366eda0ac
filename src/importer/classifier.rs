// ==========================================
// 产品编码导入系统 - 分区分类器
// ==========================================
// 规则: 前 6 位等于 348094 → Primary，否则 Secondary
// ==========================================

use crate::domain::{Code, Partition, PRIMARY_PREFIX};

/// 编码所属分区
pub fn classify(code: &Code) -> Partition {
    if code.prefix(PRIMARY_PREFIX.len()) == PRIMARY_PREFIX {
        Partition::Primary
    } else {
        Partition::Secondary
    }
}
