// ==========================================
// 产品编码导入系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 13 位产品编码的导入、分区、浏览与维护
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值对象与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 校验/分类/落库
pub mod importer;

// 读模型层 - 分页浏览
pub mod read_model;

// 配置层 - 存储连接配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Code, CodeEdit, CodeRecord, ImportSummary, LineError, Partition, RecordId, CODE_LEN,
    PAGE_SIZE, PRIMARY_PREFIX,
};

// 导入与读模型
pub use importer::{classify, validate_line, CodeImporter, ImportRunState, LineVerdict};
pub use read_model::{CodeBrowser, Page, PartitionView};

// 存储
pub use repository::{CodeRepository, CodeStore};

// API
pub use api::{ApiError, CodeApi, ImportApi};
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "产品编码导入系统";
