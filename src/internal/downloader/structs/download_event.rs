//! 钩子收到的事件载荷。
//!
//! 事件顺序是对外契约：`before_start → on_start → on_progress* →
//! (after_complete | on_error)`，终态之后不再有任何事件。

/// 规划完成后发出一次：总大小、已有的字节数（续传起点）、起始百分比。
#[derive(Debug, Clone)]
pub struct StartEvent {
    pub total_length: u64,
    pub already_transferred: u64,
    pub percentage: f64,
}

/// 每批写盘后发出（整流回退模式下按时间间隔发出）。
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub total_length: u64,
    /// 含续传起点在内的累计字节数
    pub transferred: u64,
    /// 本次会话的平均速度（字节/秒），不含续传起点之前的部分
    pub speed_bps: f64,
    pub percentage: f64,
}
