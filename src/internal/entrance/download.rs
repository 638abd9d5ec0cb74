//! 核心入口函数：最常见的「给个 URL 下载到目录」用法。
//!
//! 需要更细的控制（并发、钩子、凭证、进度监听）时，
//! 请直接使用 [`ResumableDownload`] 的链式配置。

use std::path::Path;

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_outcome::DownloadOutcome;
use crate::internal::downloader::structs::resumable_download::ResumableDownload;

/// 用默认配置把 url 指向的文件下载到指定目录，自动续传、自动防撞改名。
pub async fn download_file(
    url: &str,
    save_dir: impl AsRef<Path>,
) -> Result<DownloadOutcome, DownloadError> {
    ResumableDownload::new(url)?
        .save_dir(save_dir)
        .send()
        .await
}
