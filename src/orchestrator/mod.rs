//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责一次完整抓取的调度，是整个系统的"指挥中心"。
//!
//! ### `batch_runner` - 批量抓取运行器
//! - 管理应用生命周期（初始化、运行）
//! - 持有语料索引，负责合并、标注、排序和持久化
//! - 按顺序委托 `CategoryFlow` 处理每个分类
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_runner (处理所有分类 + 语料)
//!     ↓
//! workflow::CategoryFlow (处理单个分类)
//!     ↓
//! services (能力层：search / merge / tag / window / summary)
//!     ↓
//! clients + infrastructure (arXiv 客户端、Sleeper、Clock)
//! ```

pub mod batch_runner;

pub use batch_runner::{App, AppDeps, RunReport, RunStage};
