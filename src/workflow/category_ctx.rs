//! 分类处理上下文
//!
//! 封装"我正在处理第几个分类、叫什么"这一信息

use std::fmt::Display;

/// 分类处理上下文
#[derive(Debug, Clone)]
pub struct CategoryCtx {
    /// 分类名，写入论文的 categories
    pub name: String,

    /// 分类序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 分类总数
    pub total: usize,
}

impl CategoryCtx {
    /// 创建新的分类上下文
    pub fn new(name: impl Into<String>, index: usize, total: usize) -> Self {
        Self {
            name: name.into(),
            index,
            total,
        }
    }
}

impl Display for CategoryCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[分类 {}/{} {}]", self.index, self.total, self.name)
    }
}
