//! Range 规划：把剩余字节切成连续不重叠的闭区间，再按并发度分批。
//!
//! 纯函数，无 I/O；批次内存上限与并发上限都由这里的切分保证。

/// 一个闭区间字节范围 `[start, end]`，与 HTTP Range 头的语义一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// 区间覆盖的字节数（闭区间，含两端）。
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// 生成 Range 请求头的值：`bytes=start-end`。
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

/// 把 `[offset, offset + remaining - 1]` 切成至多 `range_size` 大小的连续区间。
///
/// - 余数不足一个整区间时，单独成一个恰好覆盖剩余字节的区间；
/// - `remaining` 小于 `range_size` 时，只产出一个精确区间；
/// - `remaining` 为 0 时产出空列表。
pub fn generate_ranges(
    remaining: u64,
    range_size: u64,
    offset: u64,
) -> Vec<ByteRange> {
    if remaining == 0 {
        return Vec::new();
    }
    let range_size = range_size.max(1);

    let full_ranges = remaining / range_size;
    let balance = remaining % range_size;

    let mut ranges =
        Vec::with_capacity((full_ranges + u64::from(balance > 0)) as usize);

    for index in 0..full_ranges {
        let start = offset + index * range_size;
        ranges.push(ByteRange {
            start,
            end: start + range_size - 1,
        });
    }

    if balance > 0 {
        let start = offset + full_ranges * range_size;
        ranges.push(ByteRange {
            start,
            end: start + balance - 1,
        });
    }

    ranges
}

/// 规划批次：单区间大小 = `batch_bytes / parallel`（向下取整，至少 1 字节），
/// 每批至多 `parallel` 个区间，批内与批间都保持偏移升序。
///
/// 一次只在内存里缓冲一批，峰值内存由 `batch_bytes` 封顶，
/// 峰值连接数由 `parallel` 封顶。
pub fn plan_batches(
    remaining: u64,
    batch_bytes: u64,
    parallel: usize,
    offset: u64,
) -> Vec<Vec<ByteRange>> {
    let parallel = parallel.max(1);
    let range_size = (batch_bytes / parallel as u64).max(1);

    generate_ranges(remaining, range_size, offset)
        .chunks(parallel)
        .map(|batch| batch.to_vec())
        .collect()
}
