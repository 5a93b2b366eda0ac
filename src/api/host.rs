// ==========================================
// 产品编码导入系统 - 宿主协作接口
// ==========================================
// 职责: 确认对话框 / 结果回调（由宿主界面实现）
// 说明: 进度回调复用 importer::ProgressSink
// ==========================================

use crate::domain::ImportSummary;

/// 确认提示（导入前、删除前）
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// 总是确认（批处理/脚本场景）
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

/// 导入结果回调，每次运行恰好调用一次
pub trait ResultSink {
    fn on_complete(&self, summary: &ImportSummary);
}

impl<F> ResultSink for F
where
    F: Fn(&ImportSummary),
{
    fn on_complete(&self, summary: &ImportSummary) {
        self(summary)
    }
}

/// 丢弃结果
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreResult;

impl ResultSink for IgnoreResult {
    fn on_complete(&self, _summary: &ImportSummary) {}
}
