//! 整流回退：服务器不支持 Range 时，从第 0 字节单连接流式下载。
//!
//! 这种模式没有续传可言，开始前总是丢弃旧的部分文件。

use std::path::Path;
use std::time::{Duration, Instant};

use futures_util::StreamExt;
use reqwest::{Client, Url};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_hooks_container::DownloadHooksContainer;
use crate::internal::downloader::structs::download_progress::DownloadProgress;
use crate::internal::local_file::destination::try_remove_file;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::progress_report::{emit_progress, EmitProgressParams};

/// 整流模式按时间间隔发进度，而不是按字节数。
const PROGRESS_INTERVAL_MS: u64 = 100;

/// 执行整流下载时的参数（形参超过 3 个，用 struct 承载）。
pub struct RunFullStreamParams<'a> {
    pub client: &'a Client,
    pub url: &'a Url,
    pub total: u64,
    pub partial_path: &'a Path,
    pub hooks: &'a mut DownloadHooksContainer,
    pub progress: &'a UnlockReactiveProperty<DownloadProgress>,
    pub started_at: Instant,
}

/// 整文件 GET，流式写入部分文件，返回写入的字节数。
pub(crate) async fn run_full_stream_download(
    params: RunFullStreamParams<'_>,
) -> Result<u64, DownloadError> {
    try_remove_file(params.partial_path)
        .await
        .map_err(DownloadError::RemovePartial)?;

    let mut file = File::create(params.partial_path)
        .await
        .map_err(DownloadError::OpenFile)?;

    let resp = params
        .client
        .get(params.url.clone())
        .send()
        .await?
        .error_for_status()?;

    let mut stream = resp.bytes_stream();
    let mut written: u64 = 0;
    let interval = Duration::from_millis(PROGRESS_INTERVAL_MS);
    let mut last_emit = Instant::now();

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result?;
        file.write_all(&chunk)
            .await
            .map_err(DownloadError::WriteFile)?;
        written += chunk.len() as u64;

        if last_emit.elapsed() >= interval {
            emit_progress(EmitProgressParams {
                hooks: &mut *params.hooks,
                progress: params.progress,
                total: params.total,
                transferred: written,
                session_written: written,
                started_at: params.started_at,
            });
            last_emit = Instant::now();
        }
    }

    file.flush().await.map_err(DownloadError::FlushFile)?;

    // 收尾再报一次，保证最终进度一定到位
    emit_progress(EmitProgressParams {
        hooks: &mut *params.hooks,
        progress: params.progress,
        total: params.total,
        transferred: written,
        session_written: written,
        started_at: params.started_at,
    });

    Ok(written)
}
