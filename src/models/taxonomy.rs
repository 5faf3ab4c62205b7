use serde::Deserialize;

/// 关键词分类表（来自 keywords.yaml）
///
/// 每个条目是逗号分隔的同义词列表，第一个词是规范标签名，例如
/// `"transformer,transformers,attention-based"`。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Taxonomy {
    pub architectures: Vec<String>,
    pub applications: Vec<String>,
}
