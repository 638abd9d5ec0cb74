/// 会话阶段（由下载器内部推进，外部只读监听）。
///
/// 正常流转：`Probing → Planning → Fetching → Finalizing → Completed`；
/// 任何非终态都可能直接进入 `Failed`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadPhase {
    Probing,
    Planning,
    Fetching,
    Finalizing,
    Completed,
    Failed,
}
