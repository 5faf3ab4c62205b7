//! # Paper Scraper
//!
//! 按关键词定期抓取 arXiv 论文，去重后标注架构/应用标签，并维护分类统计
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure / Clients）
//! - `clients/` - `ArxivClient`，只暴露"取一页结果"的能力（`PreprintIndex`）
//! - `infrastructure/` - `Sleeper`（退避等待）与 `Clock`（今天的日期）
//!
//! ### ② 业务能力层（Services）
//! - `SearchService` - 构建查询、翻页、日期过滤、重试
//! - `CorpusIndex` - 身份键去重与"首见优先，分类取并集"合并
//! - `PaperTagger` - 摘要关键词标注
//! - `date_window` / `summary_service` - 起始日期解析与分类统计
//!
//! ### ③ 流程层（Workflow）
//! - `CategoryFlow` - "一个分类"的处理流程（查询 → 打分类标签）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_runner` - 一次完整运行：加载 → 抓取 → 合并 → 标注 → 保存
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{AppConfig, ScrapeConfig};
pub use error::{AppError, AppResult};
pub use models::{CategorySummary, Paper, Taxonomy};
pub use orchestrator::{App, AppDeps, RunReport};
pub use services::StartDateOverride;
