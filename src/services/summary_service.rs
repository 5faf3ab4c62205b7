//! 分类统计服务 - 业务能力层

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::paper::Paper;
use crate::models::summary::CategorySummary;

/// 统计每个分类下的论文数，属于 N 个分类的论文计入 N 次
pub fn count_categories(papers: &[Paper]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for category in papers.iter().flat_map(|p| p.categories.iter()) {
        *counts.entry(category.clone()).or_insert(0) += 1;
    }
    counts
}

/// 生成本次运行的分类统计
///
/// `corpus_size_before` 是本次运行前（去重后）的语料大小。
pub fn build_summary(papers: &[Paper], corpus_size_before: usize, scrape_date: NaiveDate) -> CategorySummary {
    CategorySummary {
        scrape_date,
        new_papers: papers.len().saturating_sub(corpus_size_before),
        category_counts: count_categories(papers),
    }
}
