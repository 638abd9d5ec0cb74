//! 分段下载：发起单段 Range 请求，整段读入内存并校验长度，失败时按策略重试。

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::RANGE;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::internal::downloader::structs::download_error::{
    DownloadError, RangeFetchError,
};
use crate::internal::downloader::structs::range_planner::ByteRange;

/// 发起 Range 请求时的参数（形参超过 3 个，用 struct 承载）。
pub struct FetchRangeParams<'a> {
    pub client: &'a Client,
    pub url: &'a Url,
    pub range: ByteRange,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

/// 单次 Range GET：校验状态码，把 body 收进一个连续缓冲并校验长度。
///
/// 返回 200 整文件（服务器无视了 Range 头）会在长度校验处被拦下。
async fn fetch_range_once(
    client: &Client,
    url: &Url,
    range: ByteRange,
) -> Result<Bytes, RangeFetchError> {
    let resp = client
        .get(url.clone())
        .header(RANGE, range.header_value())
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(RangeFetchError::BadStatus(status));
    }

    let body = resp.bytes().await?;

    let expected = range.len();
    let got = body.len() as u64;
    if got != expected {
        return Err(RangeFetchError::LengthMismatch {
            requested: range.header_value(),
            expected,
            got,
        });
    }

    Ok(body)
}

/// 带重试的单段下载：传输层错误与 408/429/5xx 重试，重试耗尽后上抛。
pub async fn fetch_range(
    params: FetchRangeParams<'_>,
) -> Result<Bytes, DownloadError> {
    debug!(range = %params.range.header_value(), "下载分段");

    let mut attempt = 0;
    loop {
        match fetch_range_once(params.client, params.url, params.range).await {
            Ok(body) => return Ok(body),
            Err(e) if e.is_retryable() && attempt < params.max_retries => {
                attempt += 1;
                warn!(
                    range = %params.range.header_value(),
                    attempt,
                    error = %e,
                    "分段下载失败，准备重试"
                );
                tokio::time::sleep(Duration::from_millis(params.retry_delay_ms))
                    .await;
            }
            Err(e) => {
                return Err(DownloadError::RangeFetch {
                    range: params.range.header_value(),
                    retries: attempt,
                    source: e,
                });
            }
        }
    }
}
