use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 单次运行的分类统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub scrape_date: NaiveDate,
    /// 本次运行净增的论文数
    pub new_papers: usize,
    pub category_counts: BTreeMap<String, usize>,
}
