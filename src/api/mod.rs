// ==========================================
// 产品编码导入系统 - API 层
// ==========================================
// 职责: 提供导入与浏览维护接口,供宿主（控制台/界面）调用
// ==========================================

pub mod code_api;
pub mod error;
pub mod host;
pub mod import_api;

// 重导出核心类型
pub use code_api::CodeApi;
pub use error::{ApiError, ApiResult};
pub use host::{AlwaysConfirm, ConfirmPrompt, IgnoreResult, ResultSink};
pub use import_api::ImportApi;
