// ==========================================
// 产品编码导入系统 - 配置层
// ==========================================
// 职责: 存储连接参数解析
// 说明: 业务常量（编码长度/前缀/页大小）固定在 domain::types
// ==========================================

pub mod store_config;

pub use store_config::{get_default_db_path, StoreConfig, CONFIG_PATH_ENV, DB_PATH_ENV};
