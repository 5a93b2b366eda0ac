// ==========================================
// 产品编码导入系统 - 领域模型层
// ==========================================
// 职责: 定义编码值对象、分区、记录与导入结果
// 红线: 不含数据访问逻辑,不含导入流程
// ==========================================

pub mod code;
pub mod import;
pub mod record;
pub mod types;

// 重导出核心类型
pub use code::{Code, CodeFormatError};
pub use import::{ImportSummary, LineError};
pub use record::{CodeEdit, CodeRecord};
pub use types::{Partition, RecordId, CODE_LEN, PAGE_SIZE, PRIMARY_PREFIX};
