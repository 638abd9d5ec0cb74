//! 下载相关 trait：钩子接口，供下载器领域模块调用。
//!
//! 事件顺序是契约：`before_start → on_start → on_progress* →
//! (after_complete | on_error)`；`on_error` 至多触发一次，终态之后不再有事件。

use async_trait::async_trait;

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_event::{ProgressEvent, StartEvent};

/// 钩子执行时请求中止下载时使用的错误。
#[derive(Debug, Clone)]
pub struct HookAbort;

impl std::fmt::Display for HookAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("下载被钩子中止")
    }
}

impl std::error::Error for HookAbort {}

/// 下载流程钩子：在「开始前 / 规划后 / 进度 / 诊断 / 失败 / 完成后」插入自定义逻辑。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用 `with_before_start_hook` / `with_on_start_hook` /
///   `with_on_progress_hook` / `with_on_info_hook` / `with_on_error_hook` /
///   `with_after_complete_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过下载器的 `with_hook` 注册。
#[async_trait]
pub trait DownloadHook: Send + Sync {
    /// 下载开始前调用（如：加锁、校验路径）。返回 `Err` 则中止本次下载。
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        Ok(())
    }

    /// 规划完成后调用一次，带上总大小与续传起点。
    fn on_start(&mut self, _event: &StartEvent) {}

    /// 进度更新。分段模式下每批写盘后调用，整流回退模式下按时间间隔调用。
    fn on_progress(&mut self, _event: &ProgressEvent) {}

    /// 非致命的诊断信息（如回退到整流下载、续传起点）。
    fn on_info(&mut self, _message: &str) {}

    /// 终止性失败，至多调用一次；之后不再有任何事件。
    fn on_error(&mut self, _error: &DownloadError) {}

    /// 下载成功结束后调用（清理、解锁等）。
    async fn after_complete(&mut self) {}
}
