use chrono::{DateTime, FixedOffset};

/// 远程资源的能力描述，由一次 HEAD 探测得到，会话期间不可变。
///
/// `total_length` 是权威值，后续所有 Range 规划都以它为边界。
#[derive(Debug, Clone)]
pub struct ResourceDescriptor {
    pub total_length: u64,                            // 资源总大小（字节），探测必须拿到
    pub content_type: Option<String>,                 // MIME 类型
    pub supports_ranges: bool,                        // 是否支持 Range 请求
    pub last_modified: Option<DateTime<FixedOffset>>, // 原始时间
}
