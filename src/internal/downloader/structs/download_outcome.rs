use std::path::PathBuf;

/// 一次成功下载的结果。
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    /// 重命名后的最终文件路径
    pub file_path: PathBuf,
    /// 资源总大小（字节）
    pub total_length: u64,
    /// 续传起点；全新下载时为 0
    pub resumed_from: u64,
    /// 本次会话实际写入的字节数
    pub written_bytes: u64,
    /// 探测得到的 MIME 类型
    pub content_type: Option<String>,
}
