/// arXiv API 客户端
///
/// 封装对 arXiv Atom 查询接口的调用与响应解析
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::ApiError;
use crate::models::paper::IndexEntry;

/// 预印本索引的查询能力
///
/// 一次调用取回一页按提交时间倒序排列的结果，失败一律视为可重试错误。
#[async_trait]
pub trait PreprintIndex: Send + Sync {
    async fn fetch_page(
        &self,
        query: &str,
        start: usize,
        page_size: usize,
    ) -> Result<Vec<IndexEntry>, ApiError>;
}

/// arXiv Atom 响应
#[derive(Debug, Deserialize)]
struct ArxivFeed {
    #[serde(rename = "entry", default)]
    entries: Vec<ArxivEntry>,
}

#[derive(Debug, Deserialize)]
struct ArxivEntry {
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    published: Option<String>,
    #[serde(rename = "author", default)]
    authors: Vec<ArxivAuthor>,
}

#[derive(Debug, Deserialize)]
struct ArxivAuthor {
    name: String,
}

/// arXiv 客户端
pub struct ArxivClient {
    client: reqwest::Client,
    base_url: String,
}

impl ArxivClient {
    /// 创建新的 arXiv 客户端
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let client = reqwest::Client::builder()
            .user_agent(concat!("paper_scraper/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::request_failed(base_url.clone(), e))?;

        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl PreprintIndex for ArxivClient {
    async fn fetch_page(
        &self,
        query: &str,
        start: usize,
        page_size: usize,
    ) -> Result<Vec<IndexEntry>, ApiError> {
        let params = [
            ("search_query", query.to_string()),
            ("start", start.to_string()),
            ("max_results", page_size.to_string()),
            ("sortBy", "submittedDate".to_string()),
            ("sortOrder", "descending".to_string()),
        ];

        debug!("请求 arXiv: query={} start={} size={}", query, start, page_size);

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ApiError::request_failed(self.base_url.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadStatus {
                endpoint: self.base_url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::request_failed(self.base_url.clone(), e))?;

        parse_feed(&self.base_url, &body)
    }
}

/// 解析 Atom 响应为原始条目列表
fn parse_feed(endpoint: &str, xml: &str) -> Result<Vec<IndexEntry>, ApiError> {
    let feed: ArxivFeed =
        quick_xml::de::from_str(xml).map_err(|source| ApiError::FeedParseFailed {
            endpoint: endpoint.to_string(),
            source,
        })?;

    feed.entries.into_iter().map(into_index_entry).collect()
}

fn into_index_entry(entry: ArxivEntry) -> Result<IndexEntry, ApiError> {
    // arXiv 把查询错误包装成一个特殊条目返回
    if entry.id.contains("/api/errors") {
        return Err(ApiError::IndexReported {
            message: collapse_whitespace(&entry.summary),
        });
    }

    let raw_published = entry.published.unwrap_or_default();
    let published = DateTime::parse_from_rfc3339(raw_published.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ApiError::BadTimestamp {
            value: raw_published.clone(),
        })?;

    Ok(IndexEntry {
        title: collapse_whitespace(&entry.title),
        entry_id: entry.id.trim().to_string(),
        authors: entry
            .authors
            .into_iter()
            .map(|a| collapse_whitespace(&a.name))
            .collect(),
        published,
        summary: collapse_whitespace(&entry.summary),
    })
}

/// Atom 中的标题和摘要带有换行缩进，压缩为单个空格
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <link href="http://arxiv.org/api/query" rel="self" type="application/atom+xml"/>
  <title type="html">ArXiv Query: search_query=all:transformer</title>
  <id>http://arxiv.org/api/abc</id>
  <updated>2024-03-12T00:00:00-05:00</updated>
  <opensearch:totalResults xmlns:opensearch="http://a9.com/-/spec/opensearch/1.1/">2</opensearch:totalResults>
  <entry>
    <id>http://arxiv.org/abs/2403.01234v1</id>
    <updated>2024-03-11T17:59:59Z</updated>
    <published>2024-03-11T17:59:59Z</published>
    <title>Sparse Transformers
      for Robot Control</title>
    <summary>  We use transformers
      to control robots.
    </summary>
    <author>
      <name>Ada Lovelace</name>
    </author>
    <author>
      <name>Alan Turing</name>
    </author>
    <link href="http://arxiv.org/abs/2403.01234v1" rel="alternate" type="text/html"/>
    <category term="cs.RO" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2403.00001v2</id>
    <updated>2024-03-01T10:00:00Z</updated>
    <published>2024-03-01T10:00:00Z</published>
    <title>Another Paper</title>
    <summary>Nothing to see.</summary>
    <author>
      <name>Grace Hopper</name>
    </author>
  </entry>
</feed>"#;

    #[test]
    fn parses_entries_and_normalizes_text() {
        let entries = parse_feed("test", FEED).unwrap();

        assert_eq!(entries.len(), 2);
        let first = &entries[0];
        assert_eq!(first.title, "Sparse Transformers for Robot Control");
        assert_eq!(first.summary, "We use transformers to control robots.");
        assert_eq!(first.entry_id, "http://arxiv.org/abs/2403.01234v1");
        assert_eq!(first.authors, vec!["Ada Lovelace", "Alan Turing"]);
        assert_eq!(first.published.to_rfc3339(), "2024-03-11T17:59:59+00:00");
    }

    #[test]
    fn empty_feed_has_no_entries() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>empty</title></feed>"#;
        assert!(parse_feed("test", xml).unwrap().is_empty());
    }

    #[test]
    fn error_entry_becomes_api_error() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <id>http://arxiv.org/api/errors#incorrect_id_format_for_1234</id>
    <title>Error</title>
    <summary>incorrect id format for 1234</summary>
  </entry>
</feed>"#;
        let err = parse_feed("test", xml).unwrap_err();
        assert!(matches!(err, ApiError::IndexReported { .. }));
    }

    #[test]
    fn garbage_body_is_parse_error() {
        let err = parse_feed("test", "<feed><entry><id>http://arxiv.org/abs/1").unwrap_err();
        assert!(matches!(err, ApiError::FeedParseFailed { .. }));
    }
}
