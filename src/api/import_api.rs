// ==========================================
// 产品编码导入API
// ==========================================
// 职责: 读文件 → 确认 → 工作线程导入 → 进度/结果回传
// 并发: 同一时刻至多一个导入运行；进度经有界通道回到调用方
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::host::{ConfirmPrompt, ResultSink};
use crate::domain::ImportSummary;
use crate::importer::{CodeImporter, ImportRunState, LineSource, ProgressSink};
use crate::repository::CodeStore;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tracing::{error, info, instrument, warn};

/// 进度通道容量（载荷只是一个百分比）
const PROGRESS_CHANNEL_CAPACITY: usize = 64;

/// 导入API
pub struct ImportApi {
    store: Arc<dyn CodeStore>,
    line_source: Arc<dyn LineSource>,
    run_state: Arc<Mutex<ImportRunState>>,
}

// ==========================================
// RunGuard - 运行占位
// ==========================================
// 未调用 complete() 即释放时记为 Aborted
pub(crate) struct RunGuard {
    state: Arc<Mutex<ImportRunState>>,
    finished: bool,
}

impl RunGuard {
    fn complete(mut self) {
        if let Ok(mut state) = self.state.lock() {
            *state = ImportRunState::Completed;
        }
        self.finished = true;
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        if let Ok(mut state) = self.state.lock() {
            *state = ImportRunState::Aborted;
        }
    }
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(store: Arc<dyn CodeStore>, line_source: Arc<dyn LineSource>) -> Self {
        Self {
            store,
            line_source,
            run_state: Arc::new(Mutex::new(ImportRunState::Idle)),
        }
    }

    /// 当前运行状态（宿主据此禁用导入按钮）
    pub fn run_state(&self) -> ImportRunState {
        self.run_state
            .lock()
            .map(|s| *s)
            .unwrap_or(ImportRunState::Aborted)
    }

    pub fn is_running(&self) -> bool {
        self.run_state().is_running()
    }

    /// 占用运行槽位
    ///
    /// # 返回
    /// - Err(ImportInProgress): 已有运行
    pub(crate) fn begin_run(&self) -> ApiResult<RunGuard> {
        let mut state = self
            .run_state
            .lock()
            .map_err(|e| ApiError::InternalError(format!("run state lock poisoned: {}", e)))?;
        if state.is_running() {
            return Err(ApiError::ImportInProgress);
        }
        *state = ImportRunState::Running;
        Ok(RunGuard {
            state: self.run_state.clone(),
            finished: false,
        })
    }

    /// 导入前确认文案
    pub fn confirmation_message(line_count: usize, path: &Path) -> String {
        format!("Import {} codes from '{}'?", line_count, path.display())
    }

    /// 导入文本文件
    ///
    /// # 参数
    /// - path: 文件路径
    /// - confirm: 导入前确认
    /// - progress: 进度回调（在调用方任务上执行）
    /// - result_sink: 完成回调
    ///
    /// # 返回
    /// - Ok(Some(summary)): 导入完成
    /// - Ok(None): 用户取消
    /// - Err(StorageUnavailable): 存储不可达，无汇总
    #[instrument(skip(self, confirm, progress, result_sink), fields(path = %path.display()))]
    pub async fn import_file<C, P, R>(
        &self,
        path: &Path,
        confirm: &C,
        progress: &P,
        result_sink: &R,
    ) -> ApiResult<Option<ImportSummary>>
    where
        C: ConfirmPrompt + ?Sized,
        P: ProgressSink + ?Sized,
        R: ResultSink + ?Sized,
    {
        if self.is_running() {
            return Err(ApiError::ImportInProgress);
        }

        let lines = self.line_source.read_lines(path).await?;
        info!(lines = lines.len(), "文件读取完成");

        let message = Self::confirmation_message(lines.len(), path);
        if !confirm.confirm(&message) {
            info!("用户取消导入");
            return Ok(None);
        }

        let summary = self.import_lines(lines, progress, result_sink).await?;
        Ok(Some(summary))
    }

    /// 导入已读取的行
    ///
    /// 导入循环在阻塞工作线程上执行；进度值经通道回到当前任务后再调用 progress。
    pub async fn import_lines<P, R>(
        &self,
        lines: Vec<String>,
        progress: &P,
        result_sink: &R,
    ) -> ApiResult<ImportSummary>
    where
        P: ProgressSink + ?Sized,
        R: ResultSink + ?Sized,
    {
        let guard = self.begin_run()?;

        let (tx, mut rx) = mpsc::channel::<u8>(PROGRESS_CHANNEL_CAPACITY);
        let importer = CodeImporter::new(self.store.clone());

        // 运行槽位由工作线程持有，调用方放弃等待不会释放
        let worker = tokio::task::spawn_blocking(move || {
            let sink = move |percent: u8| {
                // 接收端已关闭时丢弃进度
                let _ = tx.blocking_send(percent);
            };
            let outcome = importer.run(lines.as_slice(), &sink);
            if outcome.is_ok() {
                guard.complete();
            }
            outcome
        });

        while let Some(percent) = rx.recv().await {
            progress.on_progress(percent);
        }

        let outcome = worker.await.map_err(|e| {
            error!(error = %e, "导入工作线程异常退出");
            ApiError::InternalError(format!("import worker failed: {}", e))
        })?;

        match outcome {
            Ok(summary) => {
                result_sink.on_complete(&summary);
                Ok(summary)
            }
            Err(e) => {
                warn!(error = %e, "导入中止");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::TextFileSource;
    use crate::repository::CodeRepository;
    use rusqlite::Connection;

    fn memory_api() -> ImportApi {
        let conn = Connection::open_in_memory().unwrap();
        let repo = CodeRepository::from_connection(Arc::new(Mutex::new(conn)));
        repo.ensure_schema().unwrap();
        ImportApi::new(Arc::new(repo), Arc::new(TextFileSource))
    }

    #[test]
    fn test_second_run_is_refused_while_running() {
        let api = memory_api();
        assert_eq!(api.run_state(), ImportRunState::Idle);

        let guard = api.begin_run().unwrap();
        assert!(api.is_running());
        assert!(matches!(api.begin_run(), Err(ApiError::ImportInProgress)));

        guard.complete();
        assert_eq!(api.run_state(), ImportRunState::Completed);
        assert!(api.begin_run().is_ok());
    }

    #[test]
    fn test_dropped_guard_marks_aborted() {
        let api = memory_api();
        {
            let _guard = api.begin_run().unwrap();
        }
        assert_eq!(api.run_state(), ImportRunState::Aborted);
    }

    #[test]
    fn test_confirmation_message() {
        let msg = ImportApi::confirmation_message(3, Path::new("codes.txt"));
        assert_eq!(msg, "Import 3 codes from 'codes.txt'?");
    }
}
