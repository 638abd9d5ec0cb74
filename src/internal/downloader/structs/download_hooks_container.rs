use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_event::{ProgressEvent, StartEvent};
use crate::internal::downloader::traits::download::{DownloadHook, HookAbort};

/// 钩子容器：保存多个钩子，按添加顺序依次执行。
#[derive(Default)]
pub struct DownloadHooksContainer {
    hooks: Vec<Box<dyn DownloadHook>>,
}

impl DownloadHooksContainer {
    /// 添加一个下载钩子；支持多次调用以注册多个钩子，按添加顺序依次执行。
    pub fn add(&mut self, hook: impl DownloadHook + 'static) {
        self.hooks.push(Box::new(hook));
    }

    pub async fn run_before_start(&mut self) -> Result<(), HookAbort> {
        for h in self.hooks.iter_mut() {
            h.before_start().await?;
        }
        Ok(())
    }

    pub fn run_on_start(&mut self, event: &StartEvent) {
        for h in self.hooks.iter_mut() {
            h.on_start(event);
        }
    }

    pub fn run_on_progress(&mut self, event: &ProgressEvent) {
        for h in self.hooks.iter_mut() {
            h.on_progress(event);
        }
    }

    pub fn run_on_info(&mut self, message: &str) {
        for h in self.hooks.iter_mut() {
            h.on_info(message);
        }
    }

    pub fn run_on_error(&mut self, error: &DownloadError) {
        for h in self.hooks.iter_mut() {
            h.on_error(error);
        }
    }

    pub async fn run_after_complete(&mut self) {
        for h in self.hooks.iter_mut() {
            h.after_complete().await;
        }
    }
}
