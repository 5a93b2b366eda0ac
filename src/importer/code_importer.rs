// ==========================================
// 产品编码导入系统 - 编码导入引擎
// ==========================================
// 流程: 校验 → 分类 → 落库 → 进度（逐行）
// ==========================================
// 说明:
// - 每条记录独立提交，中途失败时已插入的记录保留
// - 重复以唯一约束冲突判定，计入 duplicates，不算错误
// - 存储不可达时中止剩余行，返回单一致命错误
// ==========================================

use crate::domain::{ImportSummary, LineError};
use crate::importer::classifier::classify;
use crate::importer::code_validator::{validate_line, LineVerdict};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::progress::{progress_percent, ProgressSink};
use crate::repository::{CodeStore, RepositoryError};
use chrono::Utc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// CodeImporter - 编码导入引擎
// ==========================================
pub struct CodeImporter<S>
where
    S: CodeStore,
{
    store: S,
}

impl<S> CodeImporter<S>
where
    S: CodeStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 执行一次导入运行（同步、阻塞，应在工作线程上调用）
    ///
    /// # 参数
    /// - lines: 原始行序列
    /// - progress: 每处理一行回调一次
    ///
    /// # 返回
    /// - Ok(ImportSummary): 插入/重复/行级错误汇总
    /// - Err(StoreUnavailable): 存储不可达，剩余行未处理
    #[instrument(skip(self, lines, progress), fields(run_id, total_lines = lines.len()))]
    pub fn run<L, P>(&self, lines: &[L], progress: &P) -> ImportResult<ImportSummary>
    where
        L: AsRef<str>,
        P: ProgressSink + ?Sized,
    {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        let total = lines.len();
        info!(run_id = %run_id, total_lines = total, "开始导入编码");

        let mut summary = ImportSummary {
            run_id,
            total_lines: total,
            inserted: 0,
            duplicates: 0,
            blank_lines: 0,
            errors: Vec::new(),
            started_at: Utc::now(),
            elapsed_ms: 0,
        };

        if total == 0 {
            progress.on_progress(100);
            info!("输入为空，导入直接完成");
            return Ok(summary);
        }

        // 连通性探测，空输入不经过这里
        self.store.health_check().map_err(|e| {
            error!(error = %e, "存储不可达，导入未开始");
            ImportError::store_unavailable(0, &e)
        })?;

        for (idx, line) in lines.iter().enumerate() {
            let line_no = idx + 1;

            match validate_line(line_no, line.as_ref()) {
                LineVerdict::Blank => {
                    summary.blank_lines += 1;
                }
                verdict @ LineVerdict::Rejected { .. } => {
                    if let Some(line_error) = verdict.to_line_error() {
                        debug!(line_no, error = %line_error, "行校验失败");
                        summary.errors.push(line_error);
                    }
                }
                LineVerdict::Accepted(code) => {
                    let partition = classify(&code);
                    match self.store.insert(partition, &code) {
                        Ok(_) => summary.inserted += 1,
                        Err(RepositoryError::DuplicateCode { .. }) => {
                            debug!(line_no, partition = %partition, code = %code, "重复编码");
                            summary.duplicates += 1;
                        }
                        Err(e) if e.is_fatal() => {
                            error!(
                                line_no,
                                inserted = summary.inserted,
                                error = %e,
                                "存储不可达，中止剩余导入"
                            );
                            return Err(ImportError::store_unavailable(line_no, &e));
                        }
                        Err(e) => {
                            warn!(line_no, error = %e, "编码写入失败");
                            summary.errors.push(LineError::new(line_no, e.to_string()));
                        }
                    }
                }
            }

            progress.on_progress(progress_percent(line_no, total));
        }

        summary.elapsed_ms = start_time.elapsed().as_millis() as u64;

        info!(
            run_id = %summary.run_id,
            inserted = summary.inserted,
            duplicates = summary.duplicates,
            blank = summary.blank_lines,
            errors = summary.errors.len(),
            elapsed_ms = summary.elapsed_ms,
            "编码导入完成"
        );

        Ok(summary)
    }
}
