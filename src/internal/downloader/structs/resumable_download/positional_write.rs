//! 分段下载：把缓冲写到目标文件的指定偏移，绝不使用隐式追加。

use tokio::fs::File;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};

use crate::internal::downloader::structs::download_error::DownloadError;

/// 从 `offset` 起写入整个缓冲，返回写入的字节数。
///
/// 写不满视作存储层故障（ShortWrite），不重试；
/// 续传场景下 `offset` 之前的已有内容不会被碰。
pub async fn write_at(
    file: &mut File,
    buffer: &[u8],
    offset: u64,
) -> Result<u64, DownloadError> {
    file.seek(std::io::SeekFrom::Start(offset))
        .await
        .map_err(DownloadError::SeekFile)?;

    let mut written = 0usize;
    while written < buffer.len() {
        let n = file
            .write(&buffer[written..])
            .await
            .map_err(DownloadError::WriteFile)?;
        if n == 0 {
            return Err(DownloadError::ShortWrite {
                expected: buffer.len() as u64,
                written: written as u64,
            });
        }
        written += n;
    }

    Ok(written as u64)
}
