//! Splitting index ranges into contiguous worker spans

use std::ops::Range;

use super::config::MaxParallelism;

/// Number of hardware threads currently available to this process
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, |n| n.get())
}

/// Span count for one phase: `min(available, limit)`, never more than `items`
pub fn span_count(limit: MaxParallelism, items: usize) -> usize {
    limit.resolve(available_parallelism()).min(items)
}

/// Split `0..total` into `spans` contiguous, non-overlapping ranges.
///
/// Each range gets `total / spans` elements and the first `total % spans`
/// ranges get one more, so every index is covered exactly once. Asking for
/// more spans than elements yields one span per element; zero elements or
/// zero spans yield no ranges.
pub fn split_spans(total: usize, spans: usize) -> Vec<Range<usize>> {
    let spans = spans.min(total);
    if spans == 0 {
        return Vec::new();
    }

    let base = total / spans;
    let remainder = total % spans;
    let mut ranges = Vec::with_capacity(spans);
    let mut start = 0;
    for i in 0..spans {
        let len = base + usize::from(i < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    debug_assert_eq!(start, total);
    ranges
}
