use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ConfigError;

/// 语料输出文件名
pub const CORPUS_FILE_NAME: &str = "papers_with_specificities.json";
/// 分类统计输出文件名
pub const SUMMARY_FILE_NAME: &str = "category_counts.json";
/// 日志文件名前缀（按天滚动）
pub const LOG_FILE_PREFIX: &str = "scraper.log";

/// 程序运行配置（路径与外部端点）
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// 抓取配置文件（YAML）
    pub config_path: PathBuf,
    /// 关键词分类文件（YAML）
    pub keywords_path: PathBuf,
    /// 输出目录
    pub output_dir: PathBuf,
    /// 日志目录
    pub log_dir: PathBuf,
    /// arXiv 查询接口地址
    pub arxiv_api_url: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config.yaml"),
            keywords_path: PathBuf::from("keywords.yaml"),
            output_dir: PathBuf::from("output"),
            log_dir: PathBuf::from("logs"),
            arxiv_api_url: "https://export.arxiv.org/api/query".to_string(),
            verbose_logging: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            config_path: std::env::var("SCRAPER_CONFIG").map(PathBuf::from).unwrap_or(default.config_path),
            keywords_path: std::env::var("SCRAPER_KEYWORDS").map(PathBuf::from).unwrap_or(default.keywords_path),
            output_dir: std::env::var("SCRAPER_OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            log_dir: std::env::var("SCRAPER_LOG_DIR").map(PathBuf::from).unwrap_or(default.log_dir),
            arxiv_api_url: std::env::var("ARXIV_API_URL").unwrap_or(default.arxiv_api_url),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 语料文件路径
    pub fn corpus_path(&self) -> PathBuf {
        self.output_dir.join(CORPUS_FILE_NAME)
    }

    /// 分类统计文件路径
    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(SUMMARY_FILE_NAME)
    }
}

/// 抓取配置（来自 config.yaml）
#[derive(Clone, Debug, Deserialize)]
pub struct ScrapeConfig {
    /// 每个查询最多取回的结果数
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// 没有历史语料时的默认起始日期
    #[serde(default = "default_start_date")]
    pub start_date: String,
    /// 多少天内发布的论文标记为 is_recent
    #[serde(default = "default_recent_days")]
    pub recent_days: u32,
    /// 翻页请求之间的间隔（秒）
    #[serde(default = "default_request_delay_secs")]
    pub request_delay_secs: f64,
    /// 分类名 -> 查询列表
    pub categories: BTreeMap<String, CategoryConfig>,
}

/// 单个分类的查询配置
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CategoryConfig {
    /// 每个查询是一组必须同时出现的关键词
    #[serde(default)]
    pub queries: Vec<Vec<String>>,
}

fn default_max_results() -> usize {
    100
}

fn default_start_date() -> String {
    "2024-01-01".to_string()
}

fn default_recent_days() -> u32 {
    7
}

fn default_request_delay_secs() -> f64 {
    3.0
}

impl ScrapeConfig {
    /// 解析配置中的默认起始日期
    pub fn default_start(&self) -> Result<NaiveDate, ConfigError> {
        NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d").map_err(|_| {
            ConfigError::InvalidDate {
                field: "start_date",
                value: self.start_date.clone(),
            }
        })
    }
}
