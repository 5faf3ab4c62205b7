use std::path::PathBuf;

use clap::Parser;

use crate::config::AppConfig;
use crate::services::StartDateOverride;

/// 命令行参数，未指定的路径使用环境变量或默认值
#[derive(Parser, Debug)]
#[command(
    name = "paper_scraper",
    version,
    about = "按关键词抓取 arXiv 论文，去重、标注并统计分类"
)]
pub struct Cli {
    /// 起始日期：YYYY-MM-DD，或 -Nd 表示 N 天前
    #[arg(long, value_name = "YYYY-MM-DD|-Nd", allow_hyphen_values = true)]
    pub start_date: Option<StartDateOverride>,

    /// 抓取配置文件（YAML）
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 关键词分类文件（YAML）
    #[arg(long)]
    pub keywords: Option<PathBuf>,

    /// 输出目录
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// 日志目录
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// 输出 debug 日志
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Cli {
    /// 用命令行参数覆盖配置
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(path) = &self.config {
            config.config_path = path.clone();
        }
        if let Some(path) = &self.keywords {
            config.keywords_path = path.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = dir.clone();
        }
        if self.verbose {
            config.verbose_logging = true;
        }
    }
}
