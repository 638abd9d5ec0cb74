//! 会话编排：探测 → 规划（含续传检测）→ 逐批拉取 → 收尾改名。
//!
//! 任何一步失败都立即终止；部分文件按当前偏移原样留在盘上，
//! 下次带着 resume 重跑即可从断点继续。

use std::time::Instant;

use reqwest::{Client, Url};
use tokio::fs;
use tracing::debug;

use crate::internal::downloader::structs::download_config::DownloadConfig;
use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_event::StartEvent;
use crate::internal::downloader::structs::download_hooks_container::DownloadHooksContainer;
use crate::internal::downloader::structs::download_outcome::DownloadOutcome;
use crate::internal::downloader::structs::download_phase::DownloadPhase;
use crate::internal::downloader::structs::download_progress::DownloadProgress;
use crate::internal::local_file::destination::{
    default_save_dir, try_remove_file, DestinationPaths,
};
use crate::internal::local_file::naming::{file_stem_and_extension, writable_file_name};
use crate::internal::resource::functions::probe::probe_resource;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::full_stream::{run_full_stream_download, RunFullStreamParams};
use super::resume::{compute_resume_offset, ResumeOutcome};
use super::segmented::{run_segmented_download, RunSegmentedParams};
use super::finalize::finalize_download;

/// 驱动一次会话时的参数（形参超过 3 个，用 struct 承载）。
pub struct DriveSessionParams<'a> {
    pub client: &'a Client,
    pub url: &'a Url,
    pub config: &'a DownloadConfig,
    pub hooks: &'a mut DownloadHooksContainer,
    pub progress: &'a UnlockReactiveProperty<DownloadProgress>,
    pub phase: &'a UnlockReactiveProperty<DownloadPhase>,
}

/// 完整跑一次下载会话。失败时直接上抛，错误钩子由调用方统一触发一次。
pub(crate) async fn drive_session(
    params: DriveSessionParams<'_>,
) -> Result<DownloadOutcome, DownloadError> {
    let started_at = Instant::now();

    params.hooks.run_before_start().await?;

    // 目标路径在会话开始前定死：防撞只看最终文件名，部分文件跟着主干名走
    let dir = params
        .config
        .save_dir
        .clone()
        .unwrap_or_else(default_save_dir);
    fs::create_dir_all(&dir)
        .await
        .map_err(DownloadError::CreateDir)?;
    let (stem, extension) =
        file_stem_and_extension(params.url).ok_or(DownloadError::NoFileName)?;
    let stem = writable_file_name(&dir, &stem, &extension).await;
    let paths = DestinationPaths::resolve(&dir, &stem, &extension);

    debug!(
        final_path = %paths.final_path.display(),
        partial_path = %paths.partial_path.display(),
        "目标路径确定"
    );

    let _ = params.phase.update(DownloadPhase::Probing);
    let descriptor = probe_resource(params.client, params.url).await?;
    let total = descriptor.total_length;

    let _ = params.phase.update(DownloadPhase::Planning);
    let resume_outcome = if descriptor.supports_ranges {
        compute_resume_offset(&paths.partial_path, params.config.resume, total)
            .await?
    } else {
        // 整流模式没有续传，旧的部分文件直接丢弃
        try_remove_file(&paths.partial_path)
            .await
            .map_err(DownloadError::RemovePartial)?;
        ResumeOutcome::StartAt { offset: 0 }
    };

    let resumed_from = match &resume_outcome {
        ResumeOutcome::AlreadyComplete => total,
        ResumeOutcome::StartAt { offset } => *offset,
    };

    let start_snapshot = DownloadProgress {
        transferred: resumed_from,
        total,
        speed_bps: 0.0,
    };
    params.hooks.run_on_start(&StartEvent {
        total_length: total,
        already_transferred: resumed_from,
        percentage: start_snapshot.pct(),
    });
    let _ = params.progress.update(start_snapshot);

    let written_bytes = match resume_outcome {
        ResumeOutcome::AlreadyComplete => {
            params
                .hooks
                .run_on_info("部分文件已完整，跳过拉取直接收尾");
            0
        }
        ResumeOutcome::StartAt { offset } => {
            if offset > 0 {
                params
                    .hooks
                    .run_on_info(&format!("从 {} 字节处续传", offset));
            }

            let _ = params.phase.update(DownloadPhase::Fetching);

            if descriptor.supports_ranges {
                run_segmented_download(RunSegmentedParams {
                    client: params.client,
                    url: params.url,
                    total,
                    offset,
                    partial_path: &paths.partial_path,
                    config: params.config,
                    hooks: &mut *params.hooks,
                    progress: params.progress,
                    started_at,
                })
                .await?
            } else {
                params
                    .hooks
                    .run_on_info("服务器不支持 Range 请求，改用整流下载");
                run_full_stream_download(RunFullStreamParams {
                    client: params.client,
                    url: params.url,
                    total,
                    partial_path: &paths.partial_path,
                    hooks: &mut *params.hooks,
                    progress: params.progress,
                    started_at,
                })
                .await?
            }
        }
    };

    let _ = params.phase.update(DownloadPhase::Finalizing);
    finalize_download(&paths.partial_path, &paths.final_path).await?;

    let _ = params.phase.update(DownloadPhase::Completed);
    params.hooks.run_after_complete().await;

    Ok(DownloadOutcome {
        file_path: paths.final_path,
        total_length: total,
        resumed_from,
        written_bytes,
        content_type: descriptor.content_type,
    })
}
