use chrono::{Datelike, Utc};
use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    DataExtent, Granularity, PeriodBucket, QuickRange, SeriesPoint, Transaction, ViewportRange,
    ZoomLevel, aggregate_with_label, buckets_in_window,
};
use crate::error::TimelineResult;
use crate::extensions::{RangeChangeSource, TimelineContext, TimelineEvent, TimelineObserver};
use crate::interaction::{ScrollController, ScrollMode, ThumbGeometry};

use super::TimelineEngineConfig;
use super::aggregation_cache::{AggregationCache, AggregationCacheKey, AggregationCacheStats};

/// Stateful facade wiring aggregation, viewport, quick ranges and the scrollbar.
///
/// Every mutation that changes the visible window notifies registered
/// observers with a [`TimelineEvent::VisibleRangeChanged`].
pub struct TimelineEngine {
    pub(super) config: TimelineEngineConfig,
    pub(super) transactions: Vec<Transaction>,
    pub(super) skipped_records: usize,
    pub(super) data_version: u64,
    pub(super) extent: Option<DataExtent>,
    pub(super) zoom_level: ZoomLevel,
    pub(super) visible: Option<ViewportRange>,
    pub(super) quick_ranges: Vec<QuickRange>,
    pub(super) scroll: ScrollController,
    pub(super) cache: AggregationCache,
    pub(super) observers: IndexMap<String, Box<dyn TimelineObserver>>,
}

impl TimelineEngine {
    pub fn new(config: TimelineEngineConfig) -> TimelineResult<Self> {
        config.validate()?;
        Ok(Self {
            zoom_level: config.initial_zoom(),
            scroll: ScrollController::new(config.scroll_tuning()),
            config,
            transactions: Vec::new(),
            skipped_records: 0,
            data_version: 0,
            extent: None,
            visible: None,
            quick_ranges: Vec::new(),
            cache: AggregationCache::default(),
            observers: IndexMap::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TimelineEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of host records dropped by the last raw load.
    #[must_use]
    pub fn skipped_records(&self) -> usize {
        self.skipped_records
    }

    #[must_use]
    pub fn extent(&self) -> Option<DataExtent> {
        self.extent
    }

    #[must_use]
    pub fn full_range(&self) -> Option<ViewportRange> {
        self.extent.map(DataExtent::full_range)
    }

    #[must_use]
    pub fn visible_range(&self) -> Option<ViewportRange> {
        self.visible
    }

    #[must_use]
    pub fn zoom_level(&self) -> i32 {
        self.zoom_level.value()
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.zoom_level.granularity()
    }

    #[must_use]
    pub fn scroll_mode(&self) -> ScrollMode {
        self.scroll.mode()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.scroll.is_dragging()
    }

    #[must_use]
    pub fn thumb_geometry(&self) -> Option<ThumbGeometry> {
        let full = self.full_range()?;
        let visible = self.visible?;
        Some(self.scroll.thumb_geometry(full, visible))
    }

    /// Calendar year used for month windows and quick ranges.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.config
            .reference_year
            .unwrap_or_else(|| Utc::now().year())
    }

    /// Buckets for every transaction at the current granularity (memoized).
    pub fn buckets(&mut self) -> &[PeriodBucket] {
        let key = AggregationCacheKey {
            data_version: self.data_version,
            granularity: self.granularity(),
        };
        let transactions = &self.transactions;
        let label = self.config.uncategorized_label.as_str();
        self.cache
            .get_or_compute(key, || aggregate_with_label(transactions, key.granularity, label))
    }

    /// Buckets overlapping the visible range; empty when no data is loaded.
    pub fn visible_buckets(&mut self) -> Vec<PeriodBucket> {
        let granularity = self.granularity();
        let Some(visible) = self.visible else {
            return Vec::new();
        };
        buckets_in_window(self.buckets(), granularity, visible)
    }

    /// Chart series for the visible buckets.
    pub fn visible_series(&mut self) -> TimelineResult<Vec<SeriesPoint>> {
        self.visible_buckets()
            .iter()
            .map(PeriodBucket::to_series_point)
            .collect()
    }

    #[must_use]
    pub fn aggregation_cache_stats(&self) -> AggregationCacheStats {
        self.cache.stats()
    }

    pub(super) fn context(&self) -> TimelineContext {
        TimelineContext {
            zoom_level: self.zoom_level.value(),
            granularity: self.granularity(),
            visible_range: self.visible,
            scroll_mode: self.scroll.mode(),
            transactions_len: self.transactions.len(),
        }
    }

    /// Stores `range` as the visible window and notifies observers on change.
    pub(super) fn apply_visible_range(
        &mut self,
        range: Option<ViewportRange>,
        source: RangeChangeSource,
    ) -> bool {
        if range == self.visible {
            return false;
        }
        self.visible = range;
        match range {
            Some(range) => {
                debug!(
                    start = %range.start(),
                    end = %range.end(),
                    ?source,
                    "visible range changed"
                );
                self.emit_event(TimelineEvent::VisibleRangeChanged { range, source });
            }
            None => {
                debug!(?source, "visible range cleared");
                self.emit_event(TimelineEvent::VisibleRangeCleared);
            }
        }
        true
    }
}

impl Drop for TimelineEngine {
    fn drop(&mut self) {
        let _ = self.end_drag_if_active();
    }
}
