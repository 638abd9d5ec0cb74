//! 单阶段钩子适配器：将闭包包装成 [`DownloadHook`]，供 `with_xx_hook` 使用。

use std::future::Future;

use async_trait::async_trait;

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_event::{ProgressEvent, StartEvent};
use crate::internal::downloader::traits::download::{DownloadHook, HookAbort};

/// 仅实现「开始前」的钩子适配器。
pub(crate) struct BeforeStartHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> DownloadHook for BeforeStartHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HookAbort>> + Send + 'static,
{
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        (self.0)().await
    }
}

/// 仅实现「规划后」的钩子适配器。
pub(crate) struct OnStartHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DownloadHook for OnStartHookAdapter<F>
where
    F: FnMut(&StartEvent) + Send + Sync + 'static,
{
    fn on_start(&mut self, event: &StartEvent) {
        (self.0)(event);
    }
}

/// 仅实现「进度」的钩子适配器。
pub(crate) struct OnProgressHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DownloadHook for OnProgressHookAdapter<F>
where
    F: FnMut(&ProgressEvent) + Send + Sync + 'static,
{
    fn on_progress(&mut self, event: &ProgressEvent) {
        (self.0)(event);
    }
}

/// 仅实现「诊断信息」的钩子适配器。
pub(crate) struct OnInfoHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DownloadHook for OnInfoHookAdapter<F>
where
    F: FnMut(&str) + Send + Sync + 'static,
{
    fn on_info(&mut self, message: &str) {
        (self.0)(message);
    }
}

/// 仅实现「失败」的钩子适配器。
pub(crate) struct OnErrorHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F> DownloadHook for OnErrorHookAdapter<F>
where
    F: FnMut(&DownloadError) + Send + Sync + 'static,
{
    fn on_error(&mut self, error: &DownloadError) {
        (self.0)(error);
    }
}

/// 仅实现「完成后」的钩子适配器。
pub(crate) struct AfterCompleteHookAdapter<F>(pub(crate) F);

#[async_trait]
impl<F, Fut> DownloadHook for AfterCompleteHookAdapter<F>
where
    F: FnMut() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    async fn after_complete(&mut self) {
        (self.0)().await
    }
}
