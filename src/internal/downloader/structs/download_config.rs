use std::path::PathBuf;

/// 默认最大并发 Range 请求数
pub const DEFAULT_PARALLEL_REQUESTS: usize = 10;

/// 默认单批缓冲上限（4MB）；单区间大小 = 本值 / 并发数
pub const DEFAULT_BATCH_BYTES: u64 = 4 * 1024 * 1024;

/// 默认重试次数
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// 默认重试延迟（毫秒）
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// 本次下载的配置。
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// 是否从已有的部分文件续传
    pub resume: bool,
    /// 最大并发 Range 请求数（也是单批的区间数上限）
    pub parallel_requests: usize,
    /// 单批缓冲的字节上限
    pub batch_bytes: u64,
    /// 单区间失败最大重试次数
    pub max_retries: usize,
    /// 重试延迟（毫秒）
    pub retry_delay_ms: u64,
    /// 保存目录；未设置时用系统下载目录
    pub save_dir: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            resume: true,
            parallel_requests: DEFAULT_PARALLEL_REQUESTS,
            batch_bytes: DEFAULT_BATCH_BYTES,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            save_dir: None,
        }
    }
}
