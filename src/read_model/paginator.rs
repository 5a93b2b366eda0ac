// ==========================================
// 产品编码导入系统 - 分区分页读模型
// ==========================================
// 职责: 持有分区全量快照，按固定页大小切窗口
// 说明: 快照为时点副本，存储变更后需显式 snapshot 刷新
// ==========================================

use crate::domain::{CodeRecord, Partition, PAGE_SIZE};
use crate::repository::{CodeStore, RepositoryResult};
use serde::Serialize;
use thiserror::Error;

/// 分页错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("page {requested} is out of range (1..={total_pages})")]
    OutOfRange { requested: usize, total_pages: usize },
}

// ==========================================
// Page - 单页窗口
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct Page<'a> {
    pub partition: Partition,
    /// 从 0 开始
    pub page_index: usize,
    pub page_size: usize,
    pub total_rows: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub rows: &'a [CodeRecord],
}

impl Page<'_> {
    /// 页码标签，如 `Page 1 / 3`
    pub fn label(&self) -> String {
        format!("Page {} / {}", self.page_index + 1, self.total_pages)
    }
}

// ==========================================
// PartitionView - 单分区视图状态
// ==========================================
#[derive(Debug, Clone)]
pub struct PartitionView {
    partition: Partition,
    rows: Vec<CodeRecord>,
    current_page: usize,
}

impl PartitionView {
    /// 空视图（1 页，0 行）
    pub fn new(partition: Partition) -> Self {
        Self::from_records(partition, Vec::new())
    }

    /// 由已排序的记录构造，页码归零
    pub fn from_records(partition: Partition, rows: Vec<CodeRecord>) -> Self {
        Self {
            partition,
            rows,
            current_page: 0,
        }
    }

    /// 从存储拉取一次全量快照
    pub fn snapshot<S>(store: &S, partition: Partition) -> RepositoryResult<Self>
    where
        S: CodeStore + ?Sized,
    {
        let rows = store.list_all(partition)?;
        Ok(Self::from_records(partition, rows))
    }

    pub fn partition(&self) -> Partition {
        self.partition
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn records(&self) -> &[CodeRecord] {
        &self.rows
    }

    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// max(1, ceil(total / PAGE_SIZE))
    pub fn total_pages(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 0
    }

    pub fn has_next(&self) -> bool {
        self.current_page + 1 < self.total_pages()
    }

    /// 当前页窗口
    pub fn page(&self) -> Page<'_> {
        let start = (self.current_page * PAGE_SIZE).min(self.rows.len());
        let end = (start + PAGE_SIZE).min(self.rows.len());
        Page {
            partition: self.partition,
            page_index: self.current_page,
            page_size: PAGE_SIZE,
            total_rows: self.rows.len(),
            total_pages: self.total_pages(),
            has_prev: self.has_prev(),
            has_next: self.has_next(),
            rows: &self.rows[start..end],
        }
    }

    /// 相对翻页；越界时不改变状态并返回 false
    pub fn move_by(&mut self, delta: isize) -> bool {
        let Some(target) = self.current_page.checked_add_signed(delta) else {
            return false;
        };
        if target >= self.total_pages() {
            return false;
        }
        self.current_page = target;
        true
    }

    /// 跳转到第 target 页（从 1 开始）
    pub fn goto(&mut self, target: usize) -> Result<(), PageError> {
        let total_pages = self.total_pages();
        if target < 1 || target > total_pages {
            return Err(PageError::OutOfRange {
                requested: target,
                total_pages,
            });
        }
        self.current_page = target - 1;
        Ok(())
    }
}

// ==========================================
// CodeBrowser - 两个分区的视图状态
// ==========================================
#[derive(Debug, Clone)]
pub struct CodeBrowser {
    primary: PartitionView,
    secondary: PartitionView,
}

impl Default for CodeBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeBrowser {
    pub fn new() -> Self {
        Self {
            primary: PartitionView::new(Partition::Primary),
            secondary: PartitionView::new(Partition::Secondary),
        }
    }

    pub fn view(&self, partition: Partition) -> &PartitionView {
        match partition {
            Partition::Primary => &self.primary,
            Partition::Secondary => &self.secondary,
        }
    }

    fn view_mut(&mut self, partition: Partition) -> &mut PartitionView {
        match partition {
            Partition::Primary => &mut self.primary,
            Partition::Secondary => &mut self.secondary,
        }
    }

    /// 替换某分区视图（宿主自行拉取快照时使用）
    pub fn replace(&mut self, view: PartitionView) {
        let partition = view.partition();
        *self.view_mut(partition) = view;
    }

    /// 重新拉取某分区快照，页码归零
    pub fn snapshot<S>(&mut self, store: &S, partition: Partition) -> RepositoryResult<()>
    where
        S: CodeStore + ?Sized,
    {
        let view = PartitionView::snapshot(store, partition)?;
        self.replace(view);
        Ok(())
    }

    /// 刷新两个分区
    pub fn refresh_all<S>(&mut self, store: &S) -> RepositoryResult<()>
    where
        S: CodeStore + ?Sized,
    {
        for partition in Partition::ALL {
            self.snapshot(store, partition)?;
        }
        Ok(())
    }

    pub fn page(&self, partition: Partition) -> Page<'_> {
        self.view(partition).page()
    }

    pub fn move_page(&mut self, partition: Partition, delta: isize) -> bool {
        self.view_mut(partition).move_by(delta)
    }

    pub fn goto(&mut self, partition: Partition, target: usize) -> Result<(), PageError> {
        self.view_mut(partition).goto(target)
    }
}
