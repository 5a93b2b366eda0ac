// ==========================================
// 产品编码导入系统 - 编码分区仓储 (SQLite)
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有值使用参数化；表名只来自 Partition 枚举
// 说明: 每条写操作独立自动提交，不存在批次事务
// ==========================================

use crate::db::{open_sqlite_connection_with_timeout, CURRENT_SCHEMA_VERSION};
use crate::domain::{Code, CodeRecord, Partition, RecordId};
use crate::repository::code_store::CodeStore;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

// ==========================================
// CodeRepository - 编码分区仓储
// ==========================================
/// 职责: 管理 primary_codes / secondary_codes 两张表的 CRUD
pub struct CodeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CodeRepository {
    /// 创建新的 CodeRepository 实例
    ///
    /// # 错误
    /// - StoreUnavailable: 数据库无法打开
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        Self::with_timeout(db_path, crate::db::DEFAULT_BUSY_TIMEOUT_MS)
    }

    /// 创建实例（自定义 busy_timeout）
    pub fn with_timeout(db_path: &str, busy_timeout_ms: u64) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection_with_timeout(db_path, busy_timeout_ms)
            .map_err(|e| RepositoryError::StoreUnavailable(format!("{}: {}", db_path, e)))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 当前库的 schema_version
    pub fn schema_version(&self) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        Ok(crate::db::read_schema_version(&conn)?)
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<CodeRecord> {
    let id: RecordId = row.get(0)?;
    let raw: String = row.get(1)?;
    let code = Code::parse(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(CodeRecord::new(id, code))
}

impl CodeStore for CodeRepository {
    fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            "#,
        )?;

        for partition in Partition::ALL {
            conn.execute_batch(&format!(
                r#"
                CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    code TEXT NOT NULL UNIQUE CHECK (length(code) = 13)
                );
                "#,
                table = partition.table_name()
            ))?;
        }

        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            params![CURRENT_SCHEMA_VERSION],
        )?;

        info!("编码分区表已就绪");
        Ok(())
    }

    fn health_check(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
            .map_err(|e| RepositoryError::StoreUnavailable(e.to_string()))?;
        Ok(())
    }

    fn insert(&self, partition: Partition, code: &Code) -> RepositoryResult<RecordId> {
        let conn = self.get_conn()?;
        conn.execute(
            &format!("INSERT INTO {} (code) VALUES (?1)", partition.table_name()),
            params![code.as_str()],
        )
        .map_err(|e| RepositoryError::from(e).with_duplicate_context(partition, code.as_str()))?;

        let id = conn.last_insert_rowid();
        debug!(partition = %partition, id, code = %code, "编码已插入");
        Ok(id)
    }

    fn list_all(&self, partition: Partition) -> RepositoryResult<Vec<CodeRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, code FROM {} ORDER BY code ASC, id ASC",
            partition.table_name()
        ))?;

        let records = stmt
            .query_map([], map_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    fn find_by_id(
        &self,
        partition: Partition,
        id: RecordId,
    ) -> RepositoryResult<Option<CodeRecord>> {
        let conn = self.get_conn()?;
        let record = conn
            .query_row(
                &format!("SELECT id, code FROM {} WHERE id = ?1", partition.table_name()),
                params![id],
                map_record,
            )
            .optional()?;
        Ok(record)
    }

    fn update(
        &self,
        partition: Partition,
        id: RecordId,
        new_code: &str,
    ) -> RepositoryResult<CodeRecord> {
        let code = Code::parse(new_code)?;

        let conn = self.get_conn()?;
        let changed = conn
            .execute(
                &format!("UPDATE {} SET code = ?1 WHERE id = ?2", partition.table_name()),
                params![code.as_str(), id],
            )
            .map_err(|e| {
                RepositoryError::from(e).with_duplicate_context(partition, code.as_str())
            })?;

        if changed == 0 {
            return Err(RepositoryError::NotFound { partition, id });
        }

        debug!(partition = %partition, id, code = %code, "编码已修改");
        Ok(CodeRecord::new(id, code))
    }

    fn delete(&self, partition: Partition, id: RecordId) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1", partition.table_name()),
            params![id],
        )?;

        if changed == 0 {
            return Err(RepositoryError::NotFound { partition, id });
        }

        debug!(partition = %partition, id, "编码已删除");
        Ok(())
    }

    fn count(&self, partition: Partition) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", partition.table_name()),
            [],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }
}
