//! Staging-table suffix generation.

use uuid::Uuid;

/// Length of a generated staging-table suffix.
const SUFFIX_LEN: usize = 8;

/// Source of staging-table name suffixes for incremental strategies.
///
/// Injected into the [`Materializer`](crate::Materializer) at construction.
/// Closures implement it, so tests swap in a deterministic stub:
///
/// ```
/// use keel_materialize::Materializer;
///
/// let m = Materializer::new().with_suffix_generator(|| "abc".to_string());
/// ```
pub trait SuffixGenerator: Send + Sync {
    /// Produce one suffix. Concurrent calls must yield distinct values with
    /// overwhelming probability.
    fn generate(&self) -> String;
}

impl<F> SuffixGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Default generator: the first 8 hex chars of a fresh UUID v4 per call.
pub struct RandomSuffix;

impl SuffixGenerator for RandomSuffix {
    fn generate(&self) -> String {
        let mut suffix = Uuid::new_v4().simple().to_string();
        suffix.truncate(SUFFIX_LEN);
        suffix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_suffix_shape() {
        let suffix = RandomSuffix.generate();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_random_suffixes_are_distinct() {
        let seen: HashSet<String> = (0..100).map(|_| RandomSuffix.generate()).collect();
        assert_eq!(seen.len(), 100);
    }

    #[test]
    fn test_closures_are_generators() {
        let stub = || "abc".to_string();
        assert_eq!(stub.generate(), "abc");
    }
}
