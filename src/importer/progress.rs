// ==========================================
// 产品编码导入系统 - 导入进度与运行状态
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ProgressSink Trait
// ==========================================
// 用途: 接收 0..=100 的进度百分比（每处理一行调用一次）
pub trait ProgressSink {
    fn on_progress(&self, percent: u8);
}

impl<F> ProgressSink for F
where
    F: Fn(u8),
{
    fn on_progress(&self, percent: u8) {
        self(percent)
    }
}

/// 丢弃进度
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&self, _percent: u8) {}
}

/// 第 processed 行处理完毕后的进度
///
/// (processed * 100) / total，单调不减，最后一行恰好 100；
/// total 为 0 时视为已完成。
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let processed = processed.min(total) as u64;
    ((processed * 100) / total as u64) as u8
}

// ==========================================
// ImportRunState - 导入运行状态机
// ==========================================
// Idle → Running → Completed
//              └→ Aborted（存储不可达）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportRunState {
    Idle,
    Running,
    Completed,
    Aborted,
}

impl ImportRunState {
    pub fn is_running(&self) -> bool {
        matches!(self, ImportRunState::Running)
    }
}
