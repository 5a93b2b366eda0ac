// ==========================================
// 编码浏览与维护API
// ==========================================
// 职责: 快照/分页刷新、单条修改、单条删除、导出
// 说明: 修改不重新分类，记录留在原分区
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::host::ConfirmPrompt;
use crate::domain::{CodeEdit, CodeRecord, Partition, RecordId};
use crate::importer::LineSource;
use crate::read_model::{CodeBrowser, PartitionView};
use crate::repository::CodeStore;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// 编码API
pub struct CodeApi {
    store: Arc<dyn CodeStore>,
    line_source: Arc<dyn LineSource>,
}

impl CodeApi {
    /// 创建新的CodeApi实例
    pub fn new(store: Arc<dyn CodeStore>, line_source: Arc<dyn LineSource>) -> Self {
        Self { store, line_source }
    }

    /// 分区全部记录（按编码升序）
    pub fn list_codes(&self, partition: Partition) -> ApiResult<Vec<CodeRecord>> {
        Ok(self.store.list_all(partition)?)
    }

    /// 拉取分区快照
    pub fn snapshot(&self, partition: Partition) -> ApiResult<PartitionView> {
        Ok(PartitionView::snapshot(self.store.as_ref(), partition)?)
    }

    /// 刷新两个分区视图（导入/修改/删除之后调用）
    pub fn refresh(&self, browser: &mut CodeBrowser) -> ApiResult<()> {
        browser.refresh_all(self.store.as_ref())?;
        Ok(())
    }

    /// 修改编码
    ///
    /// # 参数
    /// - input: 宿主输入，先 trim 再校验
    ///
    /// # 返回
    /// - Ok(CodeEdit): 旧值与新值
    /// - Err(ValidationError / DuplicateCode / NotFound)
    #[instrument(skip(self))]
    pub fn update_code(
        &self,
        partition: Partition,
        id: RecordId,
        input: &str,
    ) -> ApiResult<CodeEdit> {
        let previous = self
            .store
            .find_by_id(partition, id)?
            .ok_or(ApiError::NotFound { partition, id })?;

        let updated = self.store.update(partition, id, input.trim())?;

        info!(
            partition = %partition,
            id,
            "Code updated: {} → {}",
            previous.code,
            updated.code
        );

        Ok(CodeEdit {
            partition,
            id,
            previous: previous.code,
            current: updated.code,
        })
    }

    /// 删除编码（先经宿主确认）
    ///
    /// # 返回
    /// - Ok(Some(record)): 已删除的记录
    /// - Ok(None): 用户取消
    /// - Err(NotFound): 标识不存在（幂等调用方可视为无操作）
    #[instrument(skip(self, confirm))]
    pub fn delete_code<C>(
        &self,
        partition: Partition,
        id: RecordId,
        confirm: &C,
    ) -> ApiResult<Option<CodeRecord>>
    where
        C: ConfirmPrompt + ?Sized,
    {
        let record = self
            .store
            .find_by_id(partition, id)?
            .ok_or(ApiError::NotFound { partition, id })?;

        if !confirm.confirm(&format!("Delete code {}?", record.code)) {
            info!("用户取消删除");
            return Ok(None);
        }

        self.store.delete(partition, id)?;
        info!(partition = %partition, id, code = %record.code, "编码已删除");
        Ok(Some(record))
    }

    /// 导出全部编码：主分区升序在前，次分区升序在后，覆盖目标文件
    ///
    /// # 返回
    /// - Ok(usize): 写出的编码数
    #[instrument(skip(self), fields(path = %path.display()))]
    pub async fn export_codes(&self, path: &Path) -> ApiResult<usize> {
        let store = self.store.clone();
        let lines = tokio::task::spawn_blocking(move || -> ApiResult<Vec<String>> {
            let mut lines = Vec::new();
            for partition in Partition::ALL {
                lines.extend(
                    store
                        .list_all(partition)?
                        .into_iter()
                        .map(|r| String::from(r.code)),
                );
            }
            Ok(lines)
        })
        .await
        .map_err(|e| ApiError::InternalError(format!("export worker failed: {}", e)))??;

        self.line_source.write_lines(path, &lines).await?;

        info!(count = lines.len(), "导出完成");
        Ok(lines.len())
    }
}
