// ==========================================
// 产品编码导入系统 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// ==========================================

use std::sync::Arc;

use crate::api::{CodeApi, ImportApi};
use crate::config::StoreConfig;
use crate::db::CURRENT_SCHEMA_VERSION;
use crate::importer::{LineSource, TextFileSource};
use crate::repository::{CodeRepository, CodeStore};

/// 应用状态
///
/// 包含存储连接和所有API实例，宿主在进程生命周期内持有一份
pub struct AppState {
    /// 存储配置
    pub config: StoreConfig,

    /// 编码仓储（两个分区共用一条连接）
    pub store: Arc<CodeRepository>,

    /// 导入API
    pub import_api: Arc<ImportApi>,

    /// 浏览/修改/删除/导出API
    pub code_api: Arc<CodeApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 参数
    /// - config: 存储配置
    ///
    /// # 返回
    /// - Ok(AppState): 应用状态实例
    /// - Err(String): 初始化错误
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表
    /// 2. 检查 schema_version
    /// 3. 创建所有API实例
    pub fn new(config: StoreConfig) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", config.db_path);

        let repo = CodeRepository::with_timeout(&config.db_path, config.busy_timeout_ms)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        repo.ensure_schema()
            .map_err(|e| format!("无法初始化数据库结构: {}", e))?;

        match repo.schema_version() {
            Ok(Some(v)) if v == CURRENT_SCHEMA_VERSION => {}
            Ok(v) => tracing::warn!(
                found = ?v,
                expected = CURRENT_SCHEMA_VERSION,
                "schema_version 不匹配(将继续启动)"
            ),
            Err(e) => tracing::warn!("读取 schema_version 失败(将继续启动): {}", e),
        }

        let store = Arc::new(repo);
        let line_source: Arc<dyn LineSource> = Arc::new(TextFileSource);

        let import_api = Arc::new(ImportApi::new(store.clone(), line_source.clone()));
        let code_api = Arc::new(CodeApi::new(store.clone(), line_source));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            config,
            store,
            import_api,
            code_api,
        })
    }

    /// 使用默认配置创建（环境变量 / 用户数据目录）
    pub fn from_env() -> Result<Self, String> {
        let config = StoreConfig::resolve().map_err(|e| format!("无法加载存储配置: {}", e))?;
        Self::new(config)
    }
}
