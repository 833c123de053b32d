use serde::{Deserialize, Serialize};

use crate::core::{DataExtent, Granularity, PeriodBucket, QuickRangeState, ViewportRange};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{ScrollMode, ThumbGeometry};

use super::{AggregationCacheStats, TimelineEngine};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub zoom_level: i32,
    pub granularity: Granularity,
    pub extent: Option<DataExtent>,
    pub visible_range: Option<ViewportRange>,
    pub thumb: Option<ThumbGeometry>,
    pub scroll_mode: ScrollMode,
    pub quick_ranges: Vec<QuickRangeState>,
    pub visible_buckets: Vec<PeriodBucket>,
    pub transactions_len: usize,
    pub skipped_records: usize,
    pub aggregation_cache: AggregationCacheStats,
}

impl TimelineEngine {
    pub fn snapshot(&mut self) -> TimelineSnapshot {
        let visible_buckets = self.visible_buckets();
        TimelineSnapshot {
            zoom_level: self.zoom_level(),
            granularity: self.granularity(),
            extent: self.extent,
            visible_range: self.visible,
            thumb: self.thumb_geometry(),
            scroll_mode: self.scroll_mode(),
            quick_ranges: self.quick_ranges(),
            visible_buckets,
            transactions_len: self.transactions.len(),
            skipped_records: self.skipped_records,
            aggregation_cache: self.aggregation_cache_stats(),
        }
    }

    pub fn snapshot_json_pretty(&mut self) -> TimelineResult<String> {
        serde_json::to_string_pretty(&self.snapshot())
            .map_err(|err| TimelineError::InvalidData(format!("snapshot json: {err}")))
    }
}
