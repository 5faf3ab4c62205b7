use std::path::Path;

use serde::de::DeserializeOwned;
use tokio::fs;
use tracing::info;

use crate::config::ScrapeConfig;
use crate::error::{AppResult, ConfigError};
use crate::models::taxonomy::Taxonomy;

/// 读取并解析 YAML 文件，任何失败都是致命的配置错误
async fn load_yaml<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

    let value = serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParseFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(value)
}

/// 加载抓取配置，并校验默认起始日期
pub async fn load_scrape_config(path: &Path) -> AppResult<ScrapeConfig> {
    let config: ScrapeConfig = load_yaml(path).await?;
    config.default_start()?;

    info!(
        "✓ 已加载配置 {}: {} 个分类, max_results={}",
        path.display(),
        config.categories.len(),
        config.max_results
    );
    Ok(config)
}

/// 加载关键词分类表
pub async fn load_taxonomy(path: &Path) -> AppResult<Taxonomy> {
    let taxonomy: Taxonomy = load_yaml(path).await?;

    info!(
        "✓ 已加载关键词表 {}: {} 个架构组, {} 个应用组",
        path.display(),
        taxonomy.architectures.len(),
        taxonomy.applications.len()
    );
    Ok(taxonomy)
}
