//! 分类处理流程 - 流程层
//!
//! 核心职责：定义"一个分类"的完整处理流程
//!
//! 流程顺序：
//! 1. 依次执行分类下的每个关键词组查询
//! 2. 给返回的论文打上分类名

use tracing::{info, warn};

use crate::config::CategoryConfig;
use crate::models::paper::Paper;
use crate::services::{DateWindow, SearchService};
use crate::workflow::category_ctx::CategoryCtx;

/// 分类处理流程
///
/// - 编排单个分类的查询
/// - 不持有语料，不做去重
/// - 只依赖业务能力（services）
pub struct CategoryFlow {
    search: SearchService,
}

impl CategoryFlow {
    /// 创建新的分类处理流程
    pub fn new(search: SearchService) -> Self {
        Self { search }
    }

    pub async fn run(&self, ctx: &CategoryCtx, category: &CategoryConfig, window: &DateWindow) -> Vec<Paper> {
        if category.queries.is_empty() {
            warn!("{} ⚠️ 没有配置任何查询，跳过", ctx);
            return Vec::new();
        }

        info!("{} 🔎 开始搜索，共 {} 个查询", ctx, category.queries.len());

        let mut papers = self.search.search(&category.queries, window).await;
        for paper in &mut papers {
            paper.categories.insert(ctx.name.clone());
        }

        info!("{} ✓ 搜索完成，取回 {} 篇论文", ctx, papers.len());
        papers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::PreprintIndex;
    use crate::error::ApiError;
    use crate::infrastructure::RecordingSleeper;
    use crate::models::paper::IndexEntry;
    use crate::services::WindowSource;
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::Arc;
    use std::time::Duration;

    /// 对任何查询都返回同一篇论文
    struct SingleEntryIndex;

    #[async_trait]
    impl PreprintIndex for SingleEntryIndex {
        async fn fetch_page(&self, query: &str, _start: usize, _page_size: usize) -> Result<Vec<IndexEntry>, ApiError> {
            Ok(vec![IndexEntry {
                title: format!("Result for {query}"),
                entry_id: "http://arxiv.org/abs/2403.00001v1".to_string(),
                authors: vec!["Ada Lovelace".to_string()],
                published: Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).unwrap(),
                summary: String::new(),
            }])
        }
    }

    fn flow() -> CategoryFlow {
        let search = SearchService::new(
            Arc::new(SingleEntryIndex),
            Arc::new(RecordingSleeper::new()),
            10,
            Duration::ZERO,
        );
        CategoryFlow::new(search)
    }

    fn window() -> DateWindow {
        DateWindow {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            source: WindowSource::ConfigDefault,
        }
    }

    #[tokio::test]
    async fn stamps_category_name_on_every_result() {
        let category = CategoryConfig {
            queries: vec![vec!["agent".to_string()], vec!["planning".to_string()]],
        };
        let ctx = CategoryCtx::new("agents", 1, 1);

        let papers = flow().run(&ctx, &category, &window()).await;

        assert_eq!(papers.len(), 2);
        for paper in &papers {
            assert_eq!(paper.categories.iter().collect::<Vec<_>>(), vec!["agents"]);
        }
    }

    #[tokio::test]
    async fn category_without_queries_yields_nothing() {
        let ctx = CategoryCtx::new("empty", 1, 1);
        let papers = flow().run(&ctx, &CategoryConfig::default(), &window()).await;
        assert!(papers.is_empty());
    }

    #[test]
    fn ctx_display_shows_position_and_name() {
        assert_eq!(CategoryCtx::new("llm", 2, 5).to_string(), "[分类 2/5 llm]");
    }
}
