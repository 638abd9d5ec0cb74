//! 资源能力探测：一次 HEAD 请求，只取响应头，不传任何 body。

use chrono::DateTime;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, CONTENT_TYPE, LAST_MODIFIED};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::internal::resource::structs::resource_descriptor::ResourceDescriptor;

/// 探测失败。拿不到资源长度时 Range 规划无从谈起，整个会话只能中止。
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("探测请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("探测请求返回非成功状态: {0}")]
    BadStatus(StatusCode),

    #[error("响应缺少 content-length，无法确定资源大小")]
    MissingLength,

    #[error("content-length 无法解析: {0}")]
    InvalidLength(String),
}

/// 探测远程资源：总大小、MIME 类型、是否支持 Range、最后修改时间。
///
/// 凭证随 client 的默认请求头一起发出，与后续每个 Range 请求完全一致。
pub async fn probe_resource(
    client: &Client,
    url: &Url,
) -> Result<ResourceDescriptor, ProbeError> {
    let resp = client.head(url.clone()).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ProbeError::BadStatus(status));
    }

    let headers = resp.headers();

    let raw_length = headers
        .get(CONTENT_LENGTH)
        .ok_or(ProbeError::MissingLength)?;
    let raw_length = raw_length
        .to_str()
        .map_err(|_| ProbeError::InvalidLength("<非 ASCII 字节>".to_string()))?;
    let total_length = raw_length
        .parse::<u64>()
        .map_err(|_| ProbeError::InvalidLength(raw_length.to_string()))?;

    let supports_ranges = headers
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.eq_ignore_ascii_case("bytes"))
        .unwrap_or(false);

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    let last_modified = headers
        .get(LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok());

    let descriptor = ResourceDescriptor {
        total_length,
        content_type,
        supports_ranges,
        last_modified,
    };

    debug!(?descriptor, %url, "资源探测完成");

    Ok(descriptor)
}
