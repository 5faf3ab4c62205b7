//! 日期窗口服务 - 业务能力层
//!
//! 决定下一次抓取的发布日期下限（含当天）

use std::fmt;
use std::str::FromStr;

use chrono::{Days, NaiveDate};

use crate::error::ArgumentError;

/// 命令行指定的起始日期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDateOverride {
    /// `YYYY-MM-DD`
    Absolute(NaiveDate),
    /// `-Nd`：今天往前 N 天
    DaysAgo(u64),
}

impl StartDateOverride {
    pub fn resolve(self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Absolute(date) => date,
            Self::DaysAgo(days) => today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN),
        }
    }
}

impl FromStr for StartDateOverride {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let invalid = || ArgumentError::InvalidStartDate {
            value: s.to_string(),
        };

        if let Some(days) = value.strip_prefix('-').and_then(|v| v.strip_suffix('d')) {
            if days.is_empty() || !days.chars().all(|c| c.is_ascii_digit()) {
                return Err(invalid());
            }
            return days.parse().map(Self::DaysAgo).map_err(|_| invalid());
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self::Absolute)
            .map_err(|_| invalid())
    }
}

/// 起始日期的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowSource {
    /// 命令行覆盖
    Override,
    /// 已有语料中最新发布日期减一天
    LatestPublished,
    /// 配置中的默认起始日期
    ConfigDefault,
}

impl fmt::Display for WindowSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WindowSource::Override => "命令行指定",
            WindowSource::LatestPublished => "已有语料最新日期 - 1 天",
            WindowSource::ConfigDefault => "配置默认值",
        };
        f.write_str(label)
    }
}

/// 解析后的日期窗口
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub source: WindowSource,
}

impl DateWindow {
    /// 发布日期是否落在窗口内（含起始日）
    pub fn contains(&self, published: NaiveDate) -> bool {
        published >= self.start
    }
}

/// 按优先级解析起始日期：命令行覆盖 > 已有语料最新日期减一天 > 配置默认值
///
/// 减去的一天用于覆盖索引的延迟收录。
pub fn resolve_start_date(
    override_date: Option<StartDateOverride>,
    latest_published: Option<NaiveDate>,
    default_start: NaiveDate,
    today: NaiveDate,
) -> DateWindow {
    if let Some(override_date) = override_date {
        return DateWindow {
            start: override_date.resolve(today),
            source: WindowSource::Override,
        };
    }

    if let Some(latest) = latest_published {
        return DateWindow {
            start: latest.pred_opt().unwrap_or(latest),
            source: WindowSource::LatestPublished,
        };
    }

    DateWindow {
        start: default_start,
        source: WindowSource::ConfigDefault,
    }
}
