// ==========================================
// 产品编码导入系统 - 读模型层
// ==========================================
// 职责: 分区快照 + 固定页大小分页浏览
// 红线: 读模型不写存储
// ==========================================

pub mod paginator;

pub use paginator::{CodeBrowser, Page, PageError, PartitionView};
