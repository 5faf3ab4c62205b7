/// 日志工具模块
///
/// 初始化日志输出（标准输出 + 按天滚动的文件），并提供日志格式化辅助函数
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::{AppConfig, LOG_FILE_PREFIX};
use crate::orchestrator::RunReport;

/// 初始化日志
///
/// # 参数
/// - `log_dir`: 日志目录，不存在时自动创建
/// - `verbose`: 是否输出 debug 级别日志（RUST_LOG 优先）
///
/// # 返回
/// 返回文件写入线程的 guard，需要持有到程序结束
pub fn init(log_dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("无法创建日志目录: {}", log_dir.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stdout);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(non_blocking);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("日志系统初始化失败")?;

    Ok(guard)
}

/// 记录程序启动信息
pub fn log_startup(config: &AppConfig) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - arXiv 论文抓取");
    info!("⚙️ 配置文件: {}", config.config_path.display());
    info!("🏷️ 关键词表: {}", config.keywords_path.display());
    info!("📂 输出目录: {}", config.output_dir.display());
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(report: &RunReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 抓取完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📅 起始日期: {} ({})", report.window.start, report.window.source);
    info!("🔍 取回论文: {}", report.fetched);
    info!("🆕 新增论文: {}", report.summary.new_papers);
    info!("🔁 合并重复: {}", report.merged);
    info!("📚 语料总数: {}", report.corpus_size);
    for (category, count) in &report.summary.category_counts {
        info!("  - {}: {}", category, count);
    }
    info!("{}", "=".repeat(60));
    info!("\n语料已保存至: {}", report.corpus_path.display());
    info!("统计已保存至: {}", report.summary_path.display());
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
