//! 收尾：把部分文件重命名成最终文件名。
//!
//! 重命名失败时部分文件原样保留，已下载的数据不会丢。

use std::path::Path;

use tokio::fs;
use tracing::debug;

use crate::internal::downloader::structs::download_error::DownloadError;

/// 把部分文件改名为最终文件。目标路径已被占用是错误，撞名应在会话开始前解决。
pub(crate) async fn finalize_download(
    partial_path: &Path,
    final_path: &Path,
) -> Result<(), DownloadError> {
    if let Ok(true) = fs::try_exists(final_path).await {
        return Err(DownloadError::DestinationExists(final_path.to_path_buf()));
    }

    fs::rename(partial_path, final_path)
        .await
        .map_err(DownloadError::Rename)?;

    debug!(path = %final_path.display(), "文件已保存");

    Ok(())
}
