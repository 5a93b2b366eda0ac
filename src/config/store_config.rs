// ==========================================
// 产品编码导入系统 - 存储连接配置
// ==========================================
// 职责: 解析数据库连接参数（唯一允许持久化的配置）
// 优先级: 配置文件 > 环境变量 > 用户数据目录 > 当前目录
// ==========================================

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};

/// 配置文件路径环境变量（JSON）
pub const CONFIG_PATH_ENV: &str = "CODE_IMPORTER_CONFIG";

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "CODE_IMPORTER_DB_PATH";

const DB_FILE_NAME: &str = "code_importer.db";

// ==========================================
// StoreConfig - 存储连接参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// 数据库文件路径
    pub db_path: String,

    /// busy_timeout（毫秒）
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: get_default_db_path(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl StoreConfig {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    /// 从 JSON 文件读取
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: StoreConfig = serde_json::from_str(&raw)?;
        if config.db_path.trim().is_empty() {
            return Err("db_path must not be empty".into());
        }
        Ok(config)
    }

    /// 按优先级解析配置
    ///
    /// 1. CODE_IMPORTER_CONFIG 指向的 JSON 文件
    /// 2. CODE_IMPORTER_DB_PATH
    /// 3. 默认路径
    pub fn resolve() -> Result<Self, Box<dyn Error>> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                tracing::info!(config_path = %trimmed, "从配置文件加载存储配置");
                return Self::from_json_file(trimmed);
            }
        }
        Ok(Self::default())
    }
}

/// 默认数据库路径
///
/// 允许通过环境变量显式指定（便于调试/测试/CI），
/// 否则使用用户数据目录，拿不到时回退到当前目录。
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from(format!("./{}", DB_FILE_NAME));

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("code-importer");
        // best-effort: 建目录失败时回退当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}
