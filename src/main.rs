// ==========================================
// 产品编码导入系统 - 控制台入口
// ==========================================
// 数据库路径: --db / CODE_IMPORTER_CONFIG / CODE_IMPORTER_DB_PATH / 用户数据目录
// ==========================================

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use code_importer::api::{AlwaysConfirm, ApiError, ConfirmPrompt, IgnoreResult};
use code_importer::config::StoreConfig;
use code_importer::{logging, AppState, CodeBrowser, ImportSummary, Partition, RecordId};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "code-importer")]
#[command(author, version, about = "13 位产品编码导入与分区管理", long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// 子命令
    #[command(subcommand)]
    command: Commands,

    /// 以 JSON 输出结果
    #[arg(long, global = true)]
    json: bool,

    /// 跳过确认提示
    #[arg(short, long, global = true)]
    yes: bool,

    /// 数据库文件路径（优先于环境变量与配置文件）
    #[arg(long, global = true)]
    db: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 从文本文件导入编码（每行一个）
    Import {
        /// 输入文件
        file: PathBuf,
    },

    /// 导出全部编码（主分区在前）
    Export {
        /// 输出文件（覆盖）
        file: PathBuf,
    },

    /// 分页浏览某个分区
    List {
        #[arg(value_parser = parse_partition)]
        partition: Partition,

        /// 页码（从 1 开始）
        #[arg(default_value_t = 1)]
        page: usize,
    },

    /// 修改一条编码
    Edit {
        #[arg(value_parser = parse_partition)]
        partition: Partition,

        id: RecordId,

        /// 新编码（13 位数字）
        code: String,
    },

    /// 删除一条编码
    Delete {
        #[arg(value_parser = parse_partition)]
        partition: Partition,

        id: RecordId,
    },
}

fn parse_partition(raw: &str) -> Result<Partition, String> {
    raw.parse()
}

/// 从标准输入读取 y/n
struct StdinConfirm;

impl ConfirmPrompt for StdinConfirm {
    fn confirm(&self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        let _ = std::io::stderr().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

impl Cli {
    fn confirm(&self) -> &dyn ConfirmPrompt {
        if self.yes {
            &AlwaysConfirm
        } else {
            &StdinConfirm
        }
    }

    fn open_state(&self) -> anyhow::Result<AppState> {
        let state = match &self.db {
            Some(path) if !path.trim().is_empty() => AppState::new(StoreConfig::new(path.trim())),
            _ => AppState::from_env(),
        };
        state.map_err(|e| anyhow!(e))
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_summary(summary: &ImportSummary) {
    println!("{}", summary.status_line());
    for message in summary.error_messages() {
        println!("  {}", message);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    tracing::info!(version = code_importer::VERSION, "{}", code_importer::APP_NAME);

    let state = cli.open_state()?;

    match &cli.command {
        Commands::Import { file } => {
            let progress = |percent: u8| {
                eprint!("\rprogress: {:>3}%", percent);
                if percent == 100 {
                    eprintln!();
                }
            };
            let summary = state
                .import_api
                .import_file(file, cli.confirm(), &progress, &IgnoreResult)
                .await?;

            match summary {
                None => println!("Import cancelled."),
                Some(summary) if cli.json => print_json(&summary)?,
                Some(summary) => print_summary(&summary),
            }
        }
        Commands::Export { file } => {
            let count = state.code_api.export_codes(file).await?;
            if cli.json {
                print_json(&serde_json::json!({ "path": file, "exported": count }))?;
            } else {
                println!("Exported {} codes to '{}'.", count, file.display());
            }
        }
        Commands::List { partition, page } => {
            let partition = *partition;
            let mut browser = CodeBrowser::new();
            browser.replace(state.code_api.snapshot(partition)?);
            browser.goto(partition, *page).map_err(ApiError::from)?;

            let page = browser.page(partition);
            if cli.json {
                print_json(&page)?;
            } else {
                println!("[{}] {} ({} codes)", partition, page.label(), page.total_rows);
                for record in page.rows {
                    println!("{:>8}  {}", record.id, record.code);
                }
            }
        }
        Commands::Edit { partition, id, code } => {
            let edit = state.code_api.update_code(*partition, *id, code)?;
            if cli.json {
                print_json(&edit)?;
            } else {
                println!("Code updated: {} → {}", edit.previous, edit.current);
            }
        }
        Commands::Delete { partition, id } => {
            match state.code_api.delete_code(*partition, *id, cli.confirm())? {
                Some(record) if cli.json => print_json(&record)?,
                Some(record) => println!("Deleted code {}.", record.code),
                None => println!("Delete cancelled."),
            }
        }
    }

    Ok(())
}
