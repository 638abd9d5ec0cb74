//! Range 规划纯函数测试：精确切分、余数处理、覆盖性、批次分组。

use crate::download::{generate_ranges, plan_batches, ByteRange};

#[test]
fn ranges_with_remainder() {
    let ranges = generate_ranges(10000, 3000, 0);

    assert_eq!(
        ranges,
        vec![
            ByteRange { start: 0, end: 2999 },
            ByteRange { start: 3000, end: 5999 },
            ByteRange { start: 6000, end: 8999 },
            ByteRange { start: 9000, end: 9999 },
        ]
    );
}

#[test]
fn ranges_exact_multiple_has_no_remainder_range() {
    let ranges = generate_ranges(9000, 3000, 0);

    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[2], ByteRange { start: 6000, end: 8999 });
}

#[test]
fn ranges_smaller_than_one_range() {
    let ranges = generate_ranges(500, 3000, 0);

    assert_eq!(ranges, vec![ByteRange { start: 0, end: 499 }]);
}

#[test]
fn ranges_with_resume_offset() {
    let ranges = generate_ranges(10000, 3000, 5000);

    assert_eq!(ranges.len(), 4);
    assert_eq!(ranges[0], ByteRange { start: 5000, end: 7999 });
    assert_eq!(ranges[3], ByteRange { start: 14000, end: 14999 });
}

#[test]
fn ranges_zero_remaining_is_empty() {
    assert!(generate_ranges(0, 3000, 123).is_empty());
}

/// 覆盖性：任意输入下区间连续、不重叠、并集恰好等于 `[offset, offset+remaining-1]`。
#[test]
fn ranges_cover_exactly_without_gap_or_overlap() {
    let cases = [
        (1u64, 1u64, 0u64),
        (7, 3, 0),
        (4096, 1000, 0),
        (100_000, 4096, 12_345),
        (999_999, 1, 0),
        (10_000, 3_000, 5_000),
    ];

    for (remaining, range_size, offset) in cases {
        let ranges = generate_ranges(remaining, range_size, offset);
        let mut expected_next = offset;

        for range in &ranges {
            assert_eq!(
                range.start, expected_next,
                "区间必须从上一个的下一字节开始: {:?}",
                (remaining, range_size, offset)
            );
            assert!(range.len() <= range_size, "区间不能超过 range_size");
            expected_next = range.end + 1;
        }

        assert_eq!(
            expected_next,
            offset + remaining,
            "并集必须恰好覆盖到结尾: {:?}",
            (remaining, range_size, offset)
        );
    }
}

#[test]
fn batches_group_by_parallelism() {
    // 单区间 = 10000 / 4 = 2500，共 40 个区间 → 10 批，每批 4 个
    let batches = plan_batches(100_000, 10_000, 4, 0);

    assert_eq!(batches.len(), 10);
    assert!(batches.iter().all(|batch| batch.len() == 4));
}

#[test]
fn batch_count_is_ceil_of_ranges_over_parallelism() {
    // 单区间 = 400 / 4 = 100，共 25 个区间 → ceil(25/4) = 7 批，最后一批 1 个
    let batches = plan_batches(2500, 400, 4, 0);

    assert_eq!(batches.len(), 7);
    assert_eq!(batches.last().map(|b| b.len()), Some(1));
}

#[test]
fn batches_preserve_range_order_across_batches() {
    let batches = plan_batches(100_000, 10_000, 4, 777);

    let mut expected_next = 777;
    for batch in &batches {
        for range in batch {
            assert_eq!(range.start, expected_next);
            expected_next = range.end + 1;
        }
    }
    assert_eq!(expected_next, 777 + 100_000);
}

#[test]
fn range_size_clamps_to_one_byte() {
    // batch_bytes / parallel 向下取整为 0 时退化到 1 字节区间，而不是 0 字节死循环
    let batches = plan_batches(10, 2, 8, 0);

    let ranges: Vec<_> = batches.into_iter().flatten().collect();
    assert_eq!(ranges.len(), 10);
    assert!(ranges.iter().all(|r| r.len() == 1));
}
