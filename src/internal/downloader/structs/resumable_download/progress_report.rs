//! 进度上报：同一份数字同时喂给钩子和响应式属性。

use std::time::Instant;

use crate::internal::downloader::structs::download_event::ProgressEvent;
use crate::internal::downloader::structs::download_hooks_container::DownloadHooksContainer;
use crate::internal::downloader::structs::download_progress::DownloadProgress;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

/// 上报一次进度时的参数（形参超过 3 个，用 struct 承载）。
pub struct EmitProgressParams<'a> {
    pub hooks: &'a mut DownloadHooksContainer,
    pub progress: &'a UnlockReactiveProperty<DownloadProgress>,
    pub total: u64,
    /// 含续传起点的累计字节数
    pub transferred: u64,
    /// 本次会话写入的字节数，速度只按它算
    pub session_written: u64,
    pub started_at: Instant,
}

/// 触发一次进度钩子并刷新响应式进度。
pub fn emit_progress(params: EmitProgressParams<'_>) {
    let elapsed = params.started_at.elapsed().as_secs_f64();
    let speed_bps = if elapsed > 0.0 {
        params.session_written as f64 / elapsed
    } else {
        0.0
    };

    let snapshot = DownloadProgress {
        transferred: params.transferred,
        total: params.total,
        speed_bps,
    };
    let event = ProgressEvent {
        total_length: params.total,
        transferred: params.transferred,
        speed_bps,
        percentage: snapshot.pct(),
    };

    params.hooks.run_on_progress(&event);
    let _ = params.progress.update(snapshot);
}
