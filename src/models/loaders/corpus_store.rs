use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use tokio::fs;
use tracing::{info, warn};

use crate::error::{AppError, AppResult, FileError};
use crate::models::paper::Paper;

/// 加载已有语料
///
/// 文件不存在或 JSON 损坏时返回空语料（损坏时记录警告），
/// 其余 I/O 错误向上传播。
pub async fn load_corpus(path: &Path) -> AppResult<Vec<Paper>> {
    let raw = match fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!("📁 未找到已有语料 {}，从空语料开始", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(AppError::file_read_failed(path, e)),
    };

    match serde_json::from_slice::<Vec<Paper>>(&raw) {
        Ok(papers) => {
            info!("✓ 已加载 {} 篇已有论文", papers.len());
            Ok(papers)
        }
        Err(e) => {
            warn!(
                "⚠️ 已有语料 {} 已损坏 ({})，从空语料重新开始",
                path.display(),
                e
            );
            Ok(Vec::new())
        }
    }
}

/// 以缩进格式写入 JSON，必要时创建父目录
pub async fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .map_err(|e| AppError::file_write_failed(parent, e))?;
    }

    let mut data = serde_json::to_vec_pretty(value).map_err(|source| FileError::JsonSerializeFailed {
        path: path.to_path_buf(),
        source,
    })?;
    data.push(b'\n');

    fs::write(path, data)
        .await
        .map_err(|e| AppError::file_write_failed(path, e))?;
    Ok(())
}
