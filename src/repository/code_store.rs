// ==========================================
// 产品编码导入系统 - 编码存储 Trait
// ==========================================
// 职责: 定义两个分区的数据访问接口（不包含业务逻辑）
// 红线: 重复判定以唯一约束为准，禁止先查后插
// ==========================================

use crate::domain::{Code, CodeRecord, Partition, RecordId};
use crate::repository::error::RepositoryResult;
use std::sync::Arc;

// ==========================================
// CodeStore Trait
// ==========================================
// 用途: 导入引擎与读模型访问持久化分区的唯一入口
// 实现者: CodeRepository（rusqlite）
pub trait CodeStore: Send + Sync {
    /// 幂等建表（两个分区 + schema_version）
    fn ensure_schema(&self) -> RepositoryResult<()>;

    /// 连通性探测
    ///
    /// # 返回
    /// - Err(StoreUnavailable): 存储不可达
    fn health_check(&self) -> RepositoryResult<()>;

    /// 插入编码，返回存储分配的标识
    ///
    /// # 错误
    /// - DuplicateCode: 分区内已存在（由唯一约束判定）
    /// - StoreUnavailable: 存储不可达
    fn insert(&self, partition: Partition, code: &Code) -> RepositoryResult<RecordId>;

    /// 分区全部记录，按编码升序
    fn list_all(&self, partition: Partition) -> RepositoryResult<Vec<CodeRecord>>;

    /// 按标识查询
    fn find_by_id(&self, partition: Partition, id: RecordId)
        -> RepositoryResult<Option<CodeRecord>>;

    /// 原地修改编码
    ///
    /// # 错误
    /// - ValidationError: new_code 不是恰好 13 位数字
    /// - DuplicateCode: 同分区其他记录已持有该编码
    /// - NotFound: 标识不存在
    fn update(&self, partition: Partition, id: RecordId, new_code: &str)
        -> RepositoryResult<CodeRecord>;

    /// 删除记录
    ///
    /// # 错误
    /// - NotFound: 标识不存在
    fn delete(&self, partition: Partition, id: RecordId) -> RepositoryResult<()>;

    /// 分区记录数
    fn count(&self, partition: Partition) -> RepositoryResult<usize>;
}

impl<T: CodeStore + ?Sized> CodeStore for Arc<T> {
    fn ensure_schema(&self) -> RepositoryResult<()> {
        (**self).ensure_schema()
    }

    fn health_check(&self) -> RepositoryResult<()> {
        (**self).health_check()
    }

    fn insert(&self, partition: Partition, code: &Code) -> RepositoryResult<RecordId> {
        (**self).insert(partition, code)
    }

    fn list_all(&self, partition: Partition) -> RepositoryResult<Vec<CodeRecord>> {
        (**self).list_all(partition)
    }

    fn find_by_id(
        &self,
        partition: Partition,
        id: RecordId,
    ) -> RepositoryResult<Option<CodeRecord>> {
        (**self).find_by_id(partition, id)
    }

    fn update(
        &self,
        partition: Partition,
        id: RecordId,
        new_code: &str,
    ) -> RepositoryResult<CodeRecord> {
        (**self).update(partition, id, new_code)
    }

    fn delete(&self, partition: Partition, id: RecordId) -> RepositoryResult<()> {
        (**self).delete(partition, id)
    }

    fn count(&self, partition: Partition) -> RepositoryResult<usize> {
        (**self).count(partition)
    }
}
