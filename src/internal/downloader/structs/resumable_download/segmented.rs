//! 分段下载：批次严格按序执行，批内并发拉取，批间各写盘一次、上报一次进度。
//!
//! 写入永远从文件当前已有内容的末尾连续延伸，部分文件因此随时可以当续传游标用。

use std::path::Path;
use std::time::Instant;

use reqwest::{Client, Url};
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::internal::downloader::structs::download_config::DownloadConfig;
use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_hooks_container::DownloadHooksContainer;
use crate::internal::downloader::structs::download_progress::DownloadProgress;
use crate::internal::downloader::structs::range_planner::plan_batches;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::batch_executor::{execute_batch, ExecuteBatchParams};
use super::positional_write::write_at;
use super::progress_report::{emit_progress, EmitProgressParams};

/// 执行分段下载时的参数（形参超过 3 个，用 struct 承载）。
pub struct RunSegmentedParams<'a> {
    pub client: &'a Client,
    pub url: &'a Url,
    pub total: u64,
    /// 续传起点；全新下载为 0
    pub offset: u64,
    pub partial_path: &'a Path,
    pub config: &'a DownloadConfig,
    pub hooks: &'a mut DownloadHooksContainer,
    pub progress: &'a UnlockReactiveProperty<DownloadProgress>,
    pub started_at: Instant,
}

/// 分段下载入口：规划批次后逐批执行，返回本次会话写入的字节数。
///
/// 批 i+1 在批 i 落盘之前绝不开始，written 因此是可靠的单调游标。
pub(crate) async fn run_segmented_download(
    params: RunSegmentedParams<'_>,
) -> Result<u64, DownloadError> {
    let remaining = params.total - params.offset;
    let batches = plan_batches(
        remaining,
        params.config.batch_bytes,
        params.config.parallel_requests,
        params.offset,
    );

    debug!(
        bytes_to_fetch = remaining,
        batch_count = batches.len(),
        batch_bytes = params.config.batch_bytes,
        parallel = params.config.parallel_requests,
        "分段规划完成"
    );

    // 句柄整个会话只开一次，不截断已有内容
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(params.partial_path)
        .await
        .map_err(DownloadError::OpenFile)?;

    let mut written: u64 = 0;

    for ranges in &batches {
        let buffer = execute_batch(ExecuteBatchParams {
            client: params.client,
            url: params.url,
            ranges,
            max_retries: params.config.max_retries,
            retry_delay_ms: params.config.retry_delay_ms,
        })
        .await?;

        write_at(&mut file, &buffer, params.offset + written).await?;
        written += buffer.len() as u64;

        emit_progress(EmitProgressParams {
            hooks: &mut *params.hooks,
            progress: params.progress,
            total: params.total,
            transferred: params.offset + written,
            session_written: written,
            started_at: params.started_at,
        });
    }

    file.flush().await.map_err(DownloadError::FlushFile)?;

    Ok(written)
}
