use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// API 调用错误（可重试）
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 命令行参数错误
    #[error("参数错误: {0}")]
    Argument(#[from] ArgumentError),
}

/// API 调用错误
///
/// 搜索服务把这一类错误全部视为瞬时错误，按退避策略重试。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// API 返回非成功状态码
    #[error("API返回错误状态 ({endpoint}): HTTP {status}")]
    BadStatus { endpoint: String, status: u16 },
    /// Atom 响应解析失败
    #[error("Atom响应解析失败 ({endpoint}): {source}")]
    FeedParseFailed {
        endpoint: String,
        #[source]
        source: quick_xml::DeError,
    },
    /// 索引在响应中报告了查询错误
    #[error("索引返回错误: {message}")]
    IndexReported { message: String },
    /// 条目中的发布时间无法解析
    #[error("无法解析发布时间: {value}")]
    BadTimestamp { value: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({}): {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({}): {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON 序列化失败
    #[error("JSON序列化失败 ({}): {source}", path.display())]
    JsonSerializeFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件无法读取
    #[error("无法读取配置文件 ({}): {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// YAML 解析失败
    #[error("YAML解析失败 ({}): {source}", path.display())]
    YamlParseFailed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// 日期字段格式错误
    #[error("字段 {field} 的日期 '{value}' 无效，应为 YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },
    /// 关键词无法编译为正则
    #[error("关键词 '{keyword}' 无法编译: {source}")]
    InvalidKeyword {
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

/// 命令行参数错误
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// --start-date 格式错误
    #[error("无效的起始日期 '{value}'，应为 YYYY-MM-DD 或 -Nd")]
    InvalidStartDate { value: String },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }
}

impl ApiError {
    /// 创建网络请求失败错误
    pub fn request_failed(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_app_error() {
        let err: AppError = ConfigError::InvalidDate {
            field: "start_date",
            value: "2024-13-01".to_string(),
        }
        .into();

        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("2024-13-01"));
    }

    #[test]
    fn argument_error_mentions_both_forms() {
        let err = ArgumentError::InvalidStartDate {
            value: "yesterday".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("YYYY-MM-DD"));
        assert!(msg.contains("-Nd"));
    }
}
