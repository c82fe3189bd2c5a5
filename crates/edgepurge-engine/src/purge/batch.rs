use std::num::NonZeroUsize;

/// Number of URLs echoed in progress output for each batch.
pub const SAMPLE_SIZE: usize = 3;

/// One purge request worth of URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeBatch<'a> {
    /// 1-based position of the batch in send order
    pub index: usize,
    pub urls: &'a [String],
}

impl<'a> PurgeBatch<'a> {
    /// The first few URLs of the batch, for progress output.
    pub fn sample(&self) -> &'a [String] {
        &self.urls[..self.urls.len().min(SAMPLE_SIZE)]
    }
}

/// Partition `urls` into contiguous, non-overlapping batches in input order.
///
/// Every batch holds `batch_size` URLs except possibly the last.
pub fn plan_batches(urls: &[String], batch_size: NonZeroUsize) -> Vec<PurgeBatch<'_>> {
    urls.chunks(batch_size.get())
        .enumerate()
        .map(|(i, urls)| PurgeBatch { index: i + 1, urls })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("https://ex.com/{}", i)).collect()
    }

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_sixty_five_by_thirty() {
        let all = urls(65);
        let batches = plan_batches(&all, size(30));
        let sizes: Vec<_> = batches.iter().map(|b| b.urls.len()).collect();
        assert_eq!(sizes, vec![30, 30, 5]);
        assert_eq!(
            batches.iter().map(|b| b.index).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(batches[2].urls[0], "https://ex.com/60");
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let all = urls(60);
        assert_eq!(plan_batches(&all, size(30)).len(), 2);
    }

    #[test]
    fn test_empty_input_has_no_batches() {
        assert!(plan_batches(&[], size(30)).is_empty());
    }

    #[test]
    fn test_sample_is_capped() {
        let all = urls(5);
        let batches = plan_batches(&all, size(30));
        assert_eq!(batches[0].sample().len(), SAMPLE_SIZE);
        let small = urls(2);
        assert_eq!(plan_batches(&small, size(30))[0].sample().len(), 2);
    }
}
