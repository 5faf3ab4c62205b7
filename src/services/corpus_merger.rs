//! 语料合并服务 - 业务能力层
//!
//! 按身份键（标题, 第一作者）去重，并执行"首见优先，分类取并集"的合并规则

use std::collections::HashMap;

use tracing::debug;

use crate::models::paper::{Paper, PaperKey};

/// 合并规则：首见优先，分类取并集
///
/// 已有条目的标题、链接、作者、日期、摘要等字段保持首次见到的值，
/// 只有 `categories` 更新为新旧两者的并集。对同一论文重复应用结果不变。
pub fn merge_first_seen(existing: &mut Paper, incoming: &Paper) {
    existing
        .categories
        .extend(incoming.categories.iter().cloned());
}

/// 单次合并的统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    /// 新插入的论文数
    pub inserted: usize,
    /// 合并到已有条目的论文数
    pub merged: usize,
}

/// 已去重的语料，保持插入顺序
#[derive(Debug, Default, Clone)]
pub struct CorpusIndex {
    papers: Vec<Paper>,
    positions: HashMap<PaperKey, usize>,
}

impl CorpusIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// 由已有论文构建索引，重复键按合并规则折叠
    pub fn from_papers(papers: impl IntoIterator<Item = Paper>) -> Self {
        let mut index = Self::new();
        index.merge_all(papers);
        index
    }

    /// 合并一篇论文，返回是否为新插入
    pub fn merge(&mut self, paper: Paper) -> bool {
        let key = paper.key();
        match self.positions.get(&key) {
            Some(&pos) => {
                debug!("合并重复论文: {}", paper);
                merge_first_seen(&mut self.papers[pos], &paper);
                false
            }
            None => {
                self.positions.insert(key, self.papers.len());
                self.papers.push(paper);
                true
            }
        }
    }

    /// 合并一批论文
    pub fn merge_all(&mut self, papers: impl IntoIterator<Item = Paper>) -> MergeStats {
        let mut stats = MergeStats::default();
        for paper in papers {
            if self.merge(paper) {
                stats.inserted += 1;
            } else {
                stats.merged += 1;
            }
        }
        stats
    }

    pub fn len(&self) -> usize {
        self.papers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn papers_mut(&mut self) -> &mut [Paper] {
        &mut self.papers
    }

    /// 最近的发布日期
    pub fn latest_published(&self) -> Option<chrono::NaiveDate> {
        self.papers.iter().map(|p| p.published).max()
    }

    pub fn into_papers(self) -> Vec<Paper> {
        self.papers
    }
}
