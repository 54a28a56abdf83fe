pub mod pool;

pub use pool::WorkerPool;

/// Split `total` items into `batch_count` contiguous ranges for progress
/// reporting over parallel work.
pub fn batch_ranges(total: usize, batch_count: usize) -> Vec<std::ops::Range<usize>> {
    if total == 0 || batch_count == 0 {
        return Vec::new();
    }
    let batch_count = batch_count.min(total);
    let base = total / batch_count;
    let remainder = total % batch_count;
    let mut ranges = Vec::with_capacity(batch_count);
    let mut start = 0;
    for batch in 0..batch_count {
        let len = base + usize::from(batch < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_ranges_even_split() {
        assert_eq!(batch_ranges(100, 4), vec![0..25, 25..50, 50..75, 75..100]);
    }

    #[test]
    fn batch_ranges_with_remainder() {
        assert_eq!(batch_ranges(10, 3), vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn batch_ranges_more_batches_than_items() {
        assert_eq!(batch_ranges(3, 10), vec![0..1, 1..2, 2..3]);
    }

    #[test]
    fn batch_ranges_empty() {
        assert!(batch_ranges(0, 5).is_empty());
        assert!(batch_ranges(10, 0).is_empty());
    }
}
