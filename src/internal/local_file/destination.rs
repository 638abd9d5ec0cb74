//! 目标路径：最终文件与进行中的部分文件。
//!
//! 部分文件与最终文件同主干名，扩展名换成 `in-progress` 标记；
//! 它的当前大小就是续传游标，不存在单独的元数据文件。

use std::path::{Path, PathBuf};

use tokio::fs;

use super::naming::join_file_name;

/// 部分文件使用的扩展名标记。
pub const IN_PROGRESS_EXTENSION: &str = "in-progress";

/// 一次下载的目标路径对。
#[derive(Debug, Clone)]
pub struct DestinationPaths {
    /// 下载完成后重命名到的最终路径
    pub final_path: PathBuf,
    /// 下载过程中写入的部分文件路径
    pub partial_path: PathBuf,
}

impl DestinationPaths {
    /// 由目录 + 主干名 + 扩展名算出两个路径。主干名需已做好防撞处理。
    pub fn resolve(dir: &Path, stem: &str, extension: &str) -> Self {
        Self {
            final_path: dir.join(join_file_name(stem, extension)),
            partial_path: dir.join(join_file_name(stem, IN_PROGRESS_EXTENSION)),
        }
    }
}

/// 默认保存目录：系统下载目录，取不到时退回当前目录。
pub fn default_save_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// 删除文件；文件本就不存在不算错误。
pub async fn try_remove_file(path: &Path) -> Result<(), std::io::Error> {
    match fs::remove_file(path).await {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
