// ==========================================
// 产品编码导入系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供两个编码分区的数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod code_repo;
pub mod code_store;
pub mod error;

// 重导出核心仓储
pub use code_repo::CodeRepository;
pub use code_store::CodeStore;
pub use error::{RepositoryError, RepositoryResult};
