//! 批量抓取运行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，按固定顺序执行一次抓取：
//!
//! 1. **加载语料**：读取已有 JSON，缺失或损坏时从空语料开始
//! 2. **解析日期窗口**：命令行覆盖 > 最新发布日期减一天 > 配置默认值
//! 3. **按分类抓取**：依次委托 CategoryFlow，结果即时合并去重
//! 4. **关键词标注**：对全部语料重新计算架构/应用标签
//! 5. **排序与标记**：按发布日期倒序，标记 is_recent
//! 6. **持久化**：写语料，再写分类统计
//!
//! 任何阶段都不会回到之前的阶段；除查询重试外，错误直接中止本次运行。

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Days, NaiveDate};
use tracing::info;

use crate::clients::{ArxivClient, PreprintIndex};
use crate::config::{AppConfig, ScrapeConfig};
use crate::error::AppResult;
use crate::infrastructure::{Clock, Sleeper, SystemClock, TokioSleeper};
use crate::models::{load_corpus, load_scrape_config, load_taxonomy, write_json_pretty, CategorySummary};
use crate::services::{
    build_summary, resolve_start_date, CorpusIndex, DateWindow, MergeStats, PaperTagger,
    SearchService, StartDateOverride,
};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::workflow::{CategoryCtx, CategoryFlow};

/// 运行阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadCorpus,
    ResolveWindow,
    FetchPerCategory,
    Tag,
    SortAndAnnotate,
    PersistCorpus,
    PersistSummary,
    Done,
}

impl fmt::Display for RunStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RunStage::LoadCorpus => "加载语料",
            RunStage::ResolveWindow => "解析日期窗口",
            RunStage::FetchPerCategory => "按分类抓取并去重",
            RunStage::Tag => "关键词标注",
            RunStage::SortAndAnnotate => "排序并标记近期论文",
            RunStage::PersistCorpus => "保存语料",
            RunStage::PersistSummary => "保存分类统计",
            RunStage::Done => "完成",
        };
        f.write_str(label)
    }
}

/// 外部协作者：索引、等待、时钟
pub struct AppDeps {
    pub index: Arc<dyn PreprintIndex>,
    pub sleeper: Arc<dyn Sleeper>,
    pub clock: Arc<dyn Clock>,
}

/// 单次运行的结果
#[derive(Debug, Clone)]
pub struct RunReport {
    pub window: DateWindow,
    /// 所有查询取回的窗口内论文数（去重前）
    pub fetched: usize,
    pub inserted: usize,
    pub merged: usize,
    pub corpus_size: usize,
    pub summary: CategorySummary,
    pub corpus_path: PathBuf,
    pub summary_path: PathBuf,
}

/// 应用主结构
pub struct App {
    config: AppConfig,
    scrape: ScrapeConfig,
    tagger: PaperTagger,
    flow: CategoryFlow,
    clock: Arc<dyn Clock>,
    start_override: Option<StartDateOverride>,
}

impl App {
    /// 初始化应用：使用真实的 arXiv 客户端、tokio 定时器和系统时钟
    pub async fn initialize(config: AppConfig, start_override: Option<StartDateOverride>) -> AppResult<Self> {
        let index = Arc::new(ArxivClient::new(config.arxiv_api_url.clone())?);
        let deps = AppDeps {
            index,
            sleeper: Arc::new(TokioSleeper),
            clock: Arc::new(SystemClock),
        };
        Self::with_deps(config, start_override, deps).await
    }

    /// 使用指定协作者初始化应用
    pub async fn with_deps(
        config: AppConfig,
        start_override: Option<StartDateOverride>,
        deps: AppDeps,
    ) -> AppResult<Self> {
        log_startup(&config);

        let scrape = load_scrape_config(&config.config_path).await?;
        let taxonomy = load_taxonomy(&config.keywords_path).await?;
        let tagger = PaperTagger::new(&taxonomy)?;

        let request_delay = Duration::from_secs_f64(scrape.request_delay_secs.max(0.0));
        let search = SearchService::new(deps.index, deps.sleeper, scrape.max_results, request_delay);

        Ok(Self {
            config,
            scrape,
            tagger,
            flow: CategoryFlow::new(search),
            clock: deps.clock,
            start_override,
        })
    }

    /// 运行一次完整抓取
    pub async fn run(&self) -> AppResult<RunReport> {
        let today = self.clock.today();
        let corpus_path = self.config.corpus_path();
        let summary_path = self.config.summary_path();

        enter(RunStage::LoadCorpus);
        let existing = load_corpus(&corpus_path).await?;
        let mut corpus = CorpusIndex::from_papers(existing);
        let corpus_size_before = corpus.len();

        enter(RunStage::ResolveWindow);
        let window = resolve_start_date(
            self.start_override,
            corpus.latest_published(),
            self.scrape.default_start()?,
            today,
        );
        info!("📅 抓取起始日期: {} ({})", window.start, window.source);

        enter(RunStage::FetchPerCategory);
        let (fetched, stats) = self.fetch_all_categories(&window, &mut corpus).await;

        enter(RunStage::Tag);
        for paper in corpus.papers_mut() {
            self.tagger.tag_paper(paper);
        }

        enter(RunStage::SortAndAnnotate);
        let cutoff = recent_cutoff(today, self.scrape.recent_days);
        let mut papers = corpus.into_papers();
        for paper in &mut papers {
            paper.mark_recency(cutoff);
        }
        papers.sort_by(|a, b| b.published.cmp(&a.published));

        enter(RunStage::PersistCorpus);
        write_json_pretty(&corpus_path, &papers).await?;
        info!("💾 已保存 {} 篇论文到 {}", papers.len(), corpus_path.display());

        enter(RunStage::PersistSummary);
        let summary = build_summary(&papers, corpus_size_before, today);
        write_json_pretty(&summary_path, &summary).await?;
        info!("💾 分类统计已更新: {}", summary_path.display());

        enter(RunStage::Done);
        let report = RunReport {
            window,
            fetched,
            inserted: stats.inserted,
            merged: stats.merged,
            corpus_size: papers.len(),
            summary,
            corpus_path,
            summary_path,
        };
        print_final_stats(&report);

        Ok(report)
    }

    /// 依次处理所有分类，结果合并进语料
    async fn fetch_all_categories(&self, window: &DateWindow, corpus: &mut CorpusIndex) -> (usize, MergeStats) {
        let total = self.scrape.categories.len();
        let mut fetched = 0;
        let mut stats = MergeStats::default();

        for (idx, (name, category)) in self.scrape.categories.iter().enumerate() {
            let ctx = CategoryCtx::new(name.as_str(), idx + 1, total);
            let papers = self.flow.run(&ctx, category, window).await;
            fetched += papers.len();

            let merged = corpus.merge_all(papers);
            info!("{} 新增 {} 篇，合并 {} 篇", ctx, merged.inserted, merged.merged);
            stats.inserted += merged.inserted;
            stats.merged += merged.merged;
        }

        (fetched, stats)
    }
}

fn enter(stage: RunStage) {
    info!("▶ 阶段: {}", stage);
}

/// is_recent 的日期下限：今天往前 recent_days 天（含）
fn recent_cutoff(today: NaiveDate, recent_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(recent_days)))
        .unwrap_or(NaiveDate::MIN)
}
