//! 分段下载：并发执行一批 Range 请求，按区间顺序拼接成一个连续缓冲。
//!
//! 一批要么全部成功，要么整批失败；批内并发数等于区间数，不会超过配置的并发上限。

use futures_util::future::join_all;
use reqwest::{Client, Url};

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::range_planner::ByteRange;

use super::range_fetch::{fetch_range, FetchRangeParams};

/// 执行一批区间时的参数（形参超过 3 个，用 struct 承载）。
pub struct ExecuteBatchParams<'a> {
    pub client: &'a Client,
    pub url: &'a Url,
    pub ranges: &'a [ByteRange],
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

/// 并发取一批区间并拼接。
///
/// 拼接顺序严格等于区间顺序而不是完成顺序：请求延迟无序，
/// 但写盘偏移依赖区间顺序的字节拼接。
pub async fn execute_batch(
    params: ExecuteBatchParams<'_>,
) -> Result<Vec<u8>, DownloadError> {
    let fetches = params.ranges.iter().map(|range| {
        fetch_range(FetchRangeParams {
            client: params.client,
            url: params.url,
            range: *range,
            max_retries: params.max_retries,
            retry_delay_ms: params.retry_delay_ms,
        })
    });

    // join_all 保持输入顺序，fan-in 即拼接顺序
    let results = join_all(fetches).await;

    let planned: u64 = params.ranges.iter().map(|r| r.len()).sum();
    let mut buffer = Vec::with_capacity(planned as usize);
    for result in results {
        buffer.extend_from_slice(&result?);
    }

    // 单段已各自校验过长度，这里再对整批收口一次
    if buffer.len() as u64 != planned {
        return Err(DownloadError::BatchLengthMismatch {
            expected: planned,
            got: buffer.len() as u64,
        });
    }

    Ok(buffer)
}
