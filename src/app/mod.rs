// ==========================================
// 产品编码导入系统 - 应用层
// ==========================================
// 职责: 组装存储与 API,供宿主持有
// ==========================================

pub mod state;

// 重导出
pub use crate::config::get_default_db_path;
pub use state::AppState;
