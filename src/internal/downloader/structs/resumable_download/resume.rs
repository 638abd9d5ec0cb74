//! 断点续传：部分文件的当前大小就是续传游标。
//!
//! 游标比探测到的总大小还大说明远端在两次会话之间变短了，
//! 这种部分文件不可信，删掉从头来。

use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::local_file::destination::try_remove_file;

/// 续传检查结果：已完整可直接收尾，或从某偏移开始下载。
pub enum ResumeOutcome {
    AlreadyComplete,
    StartAt { offset: u64 },
}

/// 根据部分文件是否存在及大小，决定续传起点或已完整。
pub async fn compute_resume_offset(
    partial_path: &Path,
    resume: bool,
    total: u64,
) -> Result<ResumeOutcome, DownloadError> {
    if !resume {
        try_remove_file(partial_path)
            .await
            .map_err(DownloadError::RemovePartial)?;
        return Ok(ResumeOutcome::StartAt { offset: 0 });
    }

    let local_len = match fs::metadata(partial_path).await {
        Ok(meta) => meta.len(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => 0,
        Err(e) => return Err(DownloadError::PartialMetadata(e)),
    };

    if local_len > total {
        debug!(local_len, total, "部分文件比远端还大，删除后重新下载");
        fs::remove_file(partial_path)
            .await
            .map_err(DownloadError::RemovePartial)?;
        return Ok(ResumeOutcome::StartAt { offset: 0 });
    }

    if local_len == total && total > 0 {
        return Ok(ResumeOutcome::AlreadyComplete);
    }

    Ok(ResumeOutcome::StartAt { offset: local_len })
}
