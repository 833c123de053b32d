use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Granularity, PeriodBucket};

/// Runtime metrics exposed by the in-engine aggregation cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AggregationCacheStats {
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) struct AggregationCacheKey {
    pub(super) data_version: u64,
    pub(super) granularity: Granularity,
}

/// Single-entry memo of the last aggregation.
#[derive(Debug, Default)]
pub(super) struct AggregationCache {
    key: Option<AggregationCacheKey>,
    buckets: Vec<PeriodBucket>,
    stats: AggregationCacheStats,
}

impl AggregationCache {
    pub(super) fn get_or_compute(
        &mut self,
        key: AggregationCacheKey,
        compute: impl FnOnce() -> Vec<PeriodBucket>,
    ) -> &[PeriodBucket] {
        if self.key == Some(key) {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
            self.buckets = compute();
            trace!(
                data_version = key.data_version,
                granularity = ?key.granularity,
                buckets = self.buckets.len(),
                "aggregation recomputed"
            );
            self.key = Some(key);
        }
        &self.buckets
    }

    pub(super) fn clear(&mut self) {
        self.key = None;
        self.buckets.clear();
    }

    pub(super) fn stats(&self) -> AggregationCacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_lookup_with_same_key_hits() {
        let mut cache = AggregationCache::default();
        let key = AggregationCacheKey {
            data_version: 1,
            granularity: Granularity::Month,
        };

        let _ = cache.get_or_compute(key, Vec::new);
        let _ = cache.get_or_compute(key, || panic!("must not recompute"));
        assert_eq!(cache.stats(), AggregationCacheStats { hits: 1, misses: 1 });

        let other = AggregationCacheKey {
            granularity: Granularity::Year,
            ..key
        };
        let _ = cache.get_or_compute(other, Vec::new);
        assert_eq!(cache.stats().misses, 2);
    }
}
