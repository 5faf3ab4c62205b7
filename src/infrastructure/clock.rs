//! 时钟能力 - 基础设施层
//!
//! 相对日期（-Nd）、is_recent 和 scrape_date 都以 Clock::today() 为准

use chrono::NaiveDate;

/// 提供"今天"的日期
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 本地系统时钟
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// 固定日期的时钟
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
