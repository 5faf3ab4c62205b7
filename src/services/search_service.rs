/// 论文搜索服务
///
/// 负责构建查询、翻页、按日期窗口过滤，以及瞬时错误的重试
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, error, info, warn};

use crate::clients::PreprintIndex;
use crate::error::ApiError;
use crate::infrastructure::Sleeper;
use crate::models::paper::Paper;
use crate::services::date_window::DateWindow;

/// 单次请求的最大页大小
pub const PAGE_SIZE: usize = 100;

/// 重试策略：第 n 次失败后等待 `base^n` 秒加 `[0, max_jitter)` 秒随机抖动
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_secs: f64,
    pub max_jitter_secs: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_secs: 2.0,
            max_jitter_secs: 1.0,
        }
    }
}

impl RetryPolicy {
    /// 计算第 `attempt` 次失败后的等待时长，`jitter` 取值 `[0, 1)`
    pub fn backoff(&self, attempt: u32, jitter: f64) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.base_secs.powi(exponent) + jitter.clamp(0.0, 1.0) * self.max_jitter_secs;
        Duration::from_secs_f64(secs)
    }
}

/// 把一组关键词拼成"全部必须出现"的查询
pub fn build_query(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| term.trim())
        .filter(|term| !term.is_empty())
        .map(|term| format!("\"{}\"", term))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// 搜索服务
pub struct SearchService {
    index: Arc<dyn PreprintIndex>,
    sleeper: Arc<dyn Sleeper>,
    max_results: usize,
    request_delay: Duration,
    retry: RetryPolicy,
}

impl SearchService {
    /// 创建新的搜索服务
    pub fn new(
        index: Arc<dyn PreprintIndex>,
        sleeper: Arc<dyn Sleeper>,
        max_results: usize,
        request_delay: Duration,
    ) -> Self {
        Self {
            index,
            sleeper,
            max_results,
            request_delay,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// 依次执行每个关键词组的查询
    ///
    /// 重试耗尽的查询被放弃，只返回成功查询的结果。
    pub async fn search(&self, keyword_groups: &[Vec<String>], window: &DateWindow) -> Vec<Paper> {
        let mut all_results = Vec::new();

        for terms in keyword_groups {
            let query = build_query(terms);
            if query.is_empty() {
                warn!("⚠️ 跳过空查询");
                continue;
            }

            info!("🔍 执行查询: {}", query);
            if let Some(papers) = self.search_with_retry(&query, window).await {
                info!("✓ 查询返回 {} 篇窗口内论文", papers.len());
                all_results.extend(papers);
            }
        }

        all_results
    }

    /// 带重试的单个查询，失败的尝试不保留任何部分结果
    async fn search_with_retry(&self, query: &str, window: &DateWindow) -> Option<Vec<Paper>> {
        let mut attempt = 0;

        loop {
            match self.fetch_query(query, window).await {
                Ok(papers) => return Some(papers),
                Err(e) => {
                    attempt += 1;
                    warn!("第 {} 次尝试查询 '{}' 出错: {}", attempt, query, e);

                    if attempt >= self.retry.max_attempts {
                        error!("❌ 查询在 {} 次尝试后失败，已放弃: {}", self.retry.max_attempts, query);
                        return None;
                    }

                    let jitter: f64 = rand::thread_rng().gen();
                    let wait = self.retry.backoff(attempt, jitter);
                    info!("⏳ {:.2} 秒后重试...", wait.as_secs_f64());
                    self.sleeper.sleep(wait).await;
                }
            }
        }
    }

    /// 翻页取回结果并过滤到日期窗口内
    ///
    /// 结果按提交时间倒序，出现早于窗口的结果后不再翻页。
    async fn fetch_query(&self, query: &str, window: &DateWindow) -> Result<Vec<Paper>, ApiError> {
        let mut papers = Vec::new();
        let mut start = 0;

        while start < self.max_results {
            if start > 0 {
                self.sleeper.sleep(self.request_delay).await;
            }

            let page_size = PAGE_SIZE.min(self.max_results - start);
            let entries = self.index.fetch_page(query, start, page_size).await?;
            let received = entries.len();

            let mut reached_older = false;
            for entry in entries {
                if window.contains(entry.published.date_naive()) {
                    papers.push(Paper::from_entry(entry));
                } else {
                    reached_older = true;
                }
            }

            debug!(
                "分页 start={} 收到 {} 条，窗口内累计 {} 条",
                start,
                received,
                papers.len()
            );

            if received < page_size || reached_older {
                break;
            }
            start += received;
        }

        Ok(papers)
    }
}
