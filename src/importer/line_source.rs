// ==========================================
// 产品编码导入系统 - 文本行读写
// ==========================================
// 格式: UTF-8 纯文本，每行一个候选编码
// 换行: \n / \r\n / \r 均可；忽略开头 BOM
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// LineSource Trait
// ==========================================
// 用途: 导入读取与导出写入的文件协作方
// 实现者: TextFileSource
#[async_trait]
pub trait LineSource: Send + Sync {
    /// 读取全部行（不含行结束符，保留空行）
    async fn read_lines(&self, path: &Path) -> ImportResult<Vec<String>>;

    /// 覆盖写入（每行以 \n 结尾）
    async fn write_lines(&self, path: &Path, lines: &[String]) -> ImportResult<()>;
}

/// 本地文本文件
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFileSource;

#[async_trait]
impl LineSource for TextFileSource {
    async fn read_lines(&self, path: &Path) -> ImportResult<Vec<String>> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ImportError::FileReadError(format!("{}: {}", path.display(), e)))?;

        Ok(split_lines(&text))
    }

    async fn write_lines(&self, path: &Path, lines: &[String]) -> ImportResult<()> {
        let mut body = String::with_capacity(lines.len() * 14);
        for line in lines {
            body.push_str(line);
            body.push('\n');
        }

        tokio::fs::write(path, body)
            .await
            .map_err(|e| ImportError::FileWriteError(format!("{}: {}", path.display(), e)))
    }
}

/// 按任意换行符切分
///
/// 末尾换行不产生额外空行；中间空行保留（计入行号）
pub fn split_lines(text: &str) -> Vec<String> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(|l| l.to_string())
        .collect()
}
