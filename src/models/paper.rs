use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::logging::truncate_text;

/// 论文记录（语料中的一条）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(deserialize_with = "deserialize_published")]
    pub published: NaiveDate,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
    /// 返回过这篇论文的所有分类（跨多次运行只增不减）
    #[serde(default)]
    pub categories: BTreeSet<String>,
    /// 摘要中命中的架构标签（按分类表顺序）
    #[serde(default)]
    pub architectures: Vec<String>,
    /// 摘要中命中的应用标签（按分类表顺序）
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub is_recent: bool,
}

/// 去重用的论文身份键：(标题, 第一作者)，均为小写且去掉首尾空白
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaperKey {
    pub title: String,
    pub first_author: String,
}

impl Paper {
    /// 计算身份键，没有作者时第一作者为空串
    pub fn key(&self) -> PaperKey {
        PaperKey {
            title: self.title.trim().to_lowercase(),
            first_author: self
                .authors
                .first()
                .map(|a| a.trim().to_lowercase())
                .unwrap_or_default(),
        }
    }

    /// 由索引返回的条目构造论文，分类与标签留空，由后续阶段填充
    pub fn from_entry(entry: IndexEntry) -> Self {
        Self {
            title: entry.title,
            url: entry.entry_id,
            authors: entry.authors,
            published: entry.published.date_naive(),
            abstract_text: entry.summary,
            categories: BTreeSet::new(),
            architectures: Vec::new(),
            applications: Vec::new(),
            is_recent: false,
        }
    }

    /// 发布日期不早于 cutoff 时标记为近期
    pub fn mark_recency(&mut self, cutoff: NaiveDate) {
        self.is_recent = self.published >= cutoff;
    }
}

impl std::fmt::Display for Paper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", truncate_text(&self.title, 80), self.published)
    }
}

/// 预印本索引返回的一条原始结果
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    pub title: String,
    pub entry_id: String,
    pub authors: Vec<String>,
    pub published: DateTime<Utc>,
    pub summary: String,
}

// 兼容旧语料：published 既可能是日期，也可能是完整的 ISO 时间戳
fn deserialize_published<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct PublishedVisitor;

    impl<'de> Visitor<'de> for PublishedVisitor {
        type Value = NaiveDate;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a YYYY-MM-DD date or an ISO 8601 timestamp")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            parse_published(value).ok_or_else(|| E::custom(format!("invalid published date: {value}")))
        }
    }

    deserializer.deserialize_str(PublishedVisitor)
}

/// 解析发布日期字符串
pub fn parse_published(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(title: &str, authors: &[&str]) -> Paper {
        Paper {
            title: title.to_string(),
            url: "http://arxiv.org/abs/2403.00001v1".to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            published: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            abstract_text: String::new(),
            categories: BTreeSet::new(),
            architectures: Vec::new(),
            applications: Vec::new(),
            is_recent: false,
        }
    }

    #[test]
    fn key_ignores_case_and_surrounding_whitespace() {
        let a = paper("  Attention Is All You Need ", &["Ashish Vaswani", "Noam Shazeer"]);
        let b = paper("attention is all you need", &[" ashish vaswani"]);
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn key_uses_empty_author_when_missing() {
        let p = paper("Anonymous", &[]);
        assert_eq!(p.key().first_author, "");
    }

    #[test]
    fn published_accepts_date_and_timestamp() {
        let json = r#"[
            {"title": "A", "url": "u", "authors": [], "published": "2024-03-10", "abstract": ""},
            {"title": "B", "url": "u", "authors": [], "published": "2024-03-11T17:59:59+00:00", "abstract": ""}
        ]"#;
        let papers: Vec<Paper> = serde_json::from_str(json).unwrap();

        assert_eq!(papers[0].published, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert_eq!(papers[1].published, NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert!(papers[1].categories.is_empty());
        assert!(!papers[1].is_recent);
    }

    #[test]
    fn serializes_published_as_plain_date() {
        let value = serde_json::to_value(paper("A", &["X"])).unwrap();
        assert_eq!(value["published"], "2024-03-10");
        assert!(value.get("abstract").is_some());
    }

    #[test]
    fn recency_cutoff_is_inclusive() {
        let mut p = paper("A", &["X"]);
        p.mark_recency(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        assert!(p.is_recent);
        p.mark_recency(NaiveDate::from_ymd_opt(2024, 3, 11).unwrap());
        assert!(!p.is_recent);
    }
}
