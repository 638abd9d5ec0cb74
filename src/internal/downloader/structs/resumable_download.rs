//! 可续传下载器
//!
//! 本模块实现了对单个大文件的 HTTP(S) 下载，支持分段并发与整流两种模式。
//!
//! ## 功能特性
//!
//! - **分段并发下载**：服务器支持 Range 时，把剩余字节切成区间分批并发拉取，
//!   每批按区间顺序拼接后一次性写到目标偏移
//! - **断点续传**：部分文件的当前大小就是续传游标，中断后重跑即可从断点继续
//! - **整流回退**：服务器不支持 Range 时退化为单连接流式下载（此模式无续传）
//! - **响应式进度**：通过 `progress()` / `phase()` 获取可监听的进度与会话阶段
//! - **钩子机制**：支持在下载各阶段插入自定义逻辑（开始前、进度更新、失败、完成后等）
//! - **文件名防撞**：最终文件名已存在时自动追加 ` (1)`、` (2)` 版本号后缀
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use resume_dl::download::ResumableDownload;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // 默认配置：续传开启，10 路并发，单批缓冲 4MB
//! let outcome = ResumableDownload::new("https://example.com/big.iso")?
//!     .save_dir("/tmp/downloads")
//!     .send()
//!     .await?;
//!
//! // 自定义并发与缓冲，并监听进度
//! let download = ResumableDownload::new("https://example.com/big.iso")?
//!     .parallel_requests(4)
//!     .batch_bytes(1024 * 1024)
//!     .with_on_progress_hook(|event| {
//!         println!("{:.1}%  {:.0} B/s", event.percentage, event.speed_bps);
//!     });
//! let outcome = download.send().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## 内存与连接上界
//!
//! - 一次只在内存缓冲一批，峰值内存 ≤ `batch_bytes`
//! - 批内并发数 ≤ `parallel_requests`，不会对整个文件无界展开
//! - 批间严格串行：批 i+1 在批 i 落盘之前不会发出任何请求
//!
//! ## 内部实现说明
//!
//! - `session` 子模块：会话编排（探测 → 规划 → 拉取 → 收尾）
//! - `segmented` / `full_stream` 子模块：两种下载模式的执行体
//! - `resume` 子模块：续传游标检测
//! - `batch_executor` / `range_fetch` / `positional_write` 子模块：
//!   批执行、单段拉取（含重试）、偏移写盘

mod batch_executor;
mod finalize;
mod full_stream;
mod positional_write;
mod progress_report;
mod range_fetch;
mod resume;
mod segmented;
mod session;

use std::path::Path;

use reqwest::Client;
use url::Url;

use crate::internal::auth::structs::download_auth::DownloadAuth;
use crate::internal::downloader::structs::download_config::DownloadConfig;
use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_event::{ProgressEvent, StartEvent};
use crate::internal::downloader::structs::download_hooks_container::DownloadHooksContainer;
use crate::internal::downloader::structs::download_outcome::DownloadOutcome;
use crate::internal::downloader::structs::download_phase::DownloadPhase;
use crate::internal::downloader::structs::download_progress::DownloadProgress;
use crate::internal::downloader::structs::hook_adapters::{
    AfterCompleteHookAdapter, BeforeStartHookAdapter, OnErrorHookAdapter,
    OnInfoHookAdapter, OnProgressHookAdapter, OnStartHookAdapter,
};
use crate::internal::downloader::traits::download::{DownloadHook, HookAbort};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use session::{drive_session, DriveSessionParams};

/// 可续传下载器
///
/// 拥有响应式属性：`progress()` 返回进度句柄，`phase()` 返回会话阶段句柄。
/// 不实现 Clone：一旦开始下载就不应存在第二份同目标的下载器，否则部分文件会被写花。
pub struct ResumableDownload {
    url: Url,
    client: Client,
    config: DownloadConfig,
    hooks: DownloadHooksContainer,
    progress_state: UnlockReactiveProperty<DownloadProgress>,
    phase_state: UnlockReactiveProperty<DownloadPhase>,
}

impl ResumableDownload {
    /// 创建匿名下载器（不带凭证）。
    pub fn new(url: &str) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .http1_only()
            .build()
            .map_err(DownloadError::BuildClient)?;
        Self::from_client(url, client)
    }

    /// 创建带凭证的下载器；探测与每个 Range 请求都带同一份凭证头。
    pub fn with_auth(
        url: &str,
        auth: &DownloadAuth,
    ) -> Result<Self, DownloadError> {
        Self::from_client(url, auth.client.clone())
    }

    fn from_client(url: &str, client: Client) -> Result<Self, DownloadError> {
        let url = Url::parse(url)?;

        Ok(Self {
            url,
            client,
            config: DownloadConfig::default(),
            hooks: Default::default(),
            progress_state: UnlockReactiveProperty::new(
                DownloadProgress::default(),
            ),
            phase_state: UnlockReactiveProperty::new(DownloadPhase::Probing),
        })
    }

    /// 设置保存目录；不调用则用系统下载目录（取不到时退回当前目录）。
    pub fn save_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.save_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// 是否从已有的部分文件续传，默认开启。
    pub fn resume(mut self, resume: bool) -> Self {
        self.config.resume = resume;
        self
    }

    /// 设置最大并发 Range 请求数（同时也是单批的区间数上限）。
    pub fn parallel_requests(mut self, n: usize) -> Self {
        self.config.parallel_requests = n.max(1);
        self
    }

    /// 设置单批缓冲的字节上限；单区间大小 = 本值 / 并发数。
    pub fn batch_bytes(mut self, bytes: u64) -> Self {
        self.config.batch_bytes = bytes.max(1);
        self
    }

    /// 设置单区间失败最大重试次数。
    pub fn max_retries(mut self, max_retries: usize) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// 设置重试延迟（毫秒）。
    pub fn retry_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.retry_delay_ms = delay_ms;
        self
    }

    /// 注册「开始前」钩子；闭包返回 `Err(HookAbort)` 会中止本次下载。
    pub fn with_before_start_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), HookAbort>>
            + Send
            + 'static,
    {
        self.hooks.add(BeforeStartHookAdapter(f));
        self
    }

    /// 注册「规划后」钩子；参数为总大小与续传起点。
    pub fn with_on_start_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&StartEvent) + Send + Sync + 'static,
    {
        self.hooks.add(OnStartHookAdapter(f));
        self
    }

    /// 注册「进度」钩子；分段模式每批触发一次，整流模式按时间间隔触发。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&ProgressEvent) + Send + Sync + 'static,
    {
        self.hooks.add(OnProgressHookAdapter(f));
        self
    }

    /// 注册「诊断信息」钩子；非致命提示（回退整流、续传起点等）。
    pub fn with_on_info_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&str) + Send + Sync + 'static,
    {
        self.hooks.add(OnInfoHookAdapter(f));
        self
    }

    /// 注册「失败」钩子；终止性错误至多触发一次。
    pub fn with_on_error_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(&DownloadError) + Send + Sync + 'static,
    {
        self.hooks.add(OnErrorHookAdapter(f));
        self
    }

    /// 注册「完成后」钩子；下载成功结束后调用。
    pub fn with_after_complete_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.hooks.add(AfterCompleteHookAdapter(f));
        self
    }

    /// 添加完整钩子，在下载各阶段插入逻辑。
    pub fn with_hook(mut self, hook: impl DownloadHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 内置的下载进度状态；返回可共享句柄，`.watch()` 后 `changed().await` 监听进度。
    pub fn progress(&self) -> UnlockReactiveProperty<DownloadProgress> {
        self.progress_state.clone()
    }

    /// 会话阶段状态；返回可共享句柄，可监听 `Probing → … → Completed | Failed` 的流转。
    pub fn phase(&self) -> UnlockReactiveProperty<DownloadPhase> {
        self.phase_state.clone()
    }

    /// 执行下载。成功时部分文件已改名为最终文件；失败时部分文件原样保留供续传。
    pub async fn send(mut self) -> Result<DownloadOutcome, DownloadError> {
        let result = drive_session(DriveSessionParams {
            client: &self.client,
            url: &self.url,
            config: &self.config,
            hooks: &mut self.hooks,
            progress: &self.progress_state,
            phase: &self.phase_state,
        })
        .await;

        match result {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                // 终止性失败只对外宣告一次，之后不再发任何事件
                self.hooks.run_on_error(&error);
                let _ = self.phase_state.update(DownloadPhase::Failed);
                Err(error)
            }
        }
    }
}
