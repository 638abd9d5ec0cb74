//! 下载相关错误类型。

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::internal::downloader::traits::download::HookAbort;
use crate::internal::resource::functions::probe::ProbeError;

/// 单个 Range 请求的失败原因。是否值得重试由 [`RangeFetchError::is_retryable`] 判定。
#[derive(Debug, Error)]
pub enum RangeFetchError {
    #[error("Range 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Range 请求返回非成功状态: {0}")]
    BadStatus(StatusCode),

    #[error("Range {requested} 应返回 {expected} 字节，实际返回 {got} 字节")]
    LengthMismatch {
        requested: String,
        expected: u64,
        got: u64,
    },
}

impl RangeFetchError {
    /// 传输层错误和 408/429/5xx 可以重试；其余 4xx 和长度不符不重试。
    pub fn is_retryable(&self) -> bool {
        match self {
            RangeFetchError::Request(_) => true,
            RangeFetchError::BadStatus(status) => {
                status.is_server_error()
                    || *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
            }
            RangeFetchError::LengthMismatch { .. } => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("资源探测失败: {0}")]
    Probe(#[from] ProbeError),

    #[error("URL 无效: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("URL 中没有可用的文件名")]
    NoFileName,

    #[error("构建 HTTP 客户端失败: {0}")]
    BuildClient(reqwest::Error),

    #[error("整流下载请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("分段 {range} 下载失败，已重试 {retries} 次: {source}")]
    RangeFetch {
        range: String,
        retries: usize,
        #[source]
        source: RangeFetchError,
    },

    #[error("批次长度不一致：计划 {expected} 字节，实际取得 {got} 字节")]
    BatchLengthMismatch { expected: u64, got: u64 },

    #[error("创建保存目录失败: {0}")]
    CreateDir(std::io::Error),

    #[error("打开目标文件失败: {0}")]
    OpenFile(std::io::Error),

    #[error("文件定位失败: {0}")]
    SeekFile(tokio::io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(tokio::io::Error),

    #[error("写入不完整：应写 {expected} 字节，实际写入 {written} 字节")]
    ShortWrite { expected: u64, written: u64 },

    #[error("刷新文件失败: {0}")]
    FlushFile(tokio::io::Error),

    #[error("读取部分文件大小失败: {0}")]
    PartialMetadata(std::io::Error),

    #[error("删除过期的部分文件失败: {0}")]
    RemovePartial(std::io::Error),

    #[error("目标文件已存在，拒绝覆盖: {}", .0.display())]
    DestinationExists(PathBuf),

    #[error("重命名完成文件失败: {0}")]
    Rename(std::io::Error),

    /// 钩子在 before_start 中返回错误，中止下载。
    #[error("{0}")]
    HookAbort(#[from] HookAbort),
}
