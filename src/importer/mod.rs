// ==========================================
// 产品编码导入系统 - 导入层
// ==========================================
// 职责: 文本行 → 校验 → 分类 → 落库
// 支持: UTF-8 纯文本（每行一个编码）
// ==========================================

// 模块声明
pub mod classifier;
pub mod code_importer;
pub mod code_validator;
pub mod error;
pub mod line_source;
pub mod progress;

// 重导出核心类型
pub use classifier::classify;
pub use code_importer::CodeImporter;
pub use code_validator::{validate_line, LineVerdict, RejectReason};
pub use error::{ImportError, ImportResult};
pub use line_source::{split_lines, LineSource, TextFileSource};
pub use progress::{progress_percent, ImportRunState, NoProgress, ProgressSink};
