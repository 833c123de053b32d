use tracing::debug;

use crate::core::{
    DataExtent, RawTransaction, Transaction, parse_transactions, quick_ranges_for_extent,
    visible_range_for_extent,
};
use crate::extensions::{RangeChangeSource, TimelineEvent};

use super::TimelineEngine;

impl TimelineEngine {
    /// Replaces the transaction set and recomputes extent, quick ranges and viewport.
    pub fn set_transactions(&mut self, transactions: Vec<Transaction>) {
        self.load(transactions, 0);
    }

    /// Parses and loads host records. Malformed records are skipped.
    ///
    /// Returns the number of skipped records.
    pub fn set_raw_transactions(&mut self, records: &[RawTransaction]) -> usize {
        let parsed = parse_transactions(records);
        let skipped = parsed.skipped;
        self.load(parsed.transactions, skipped);
        skipped
    }

    /// Drops all data. The viewport becomes `None`.
    pub fn clear(&mut self) {
        self.load(Vec::new(), 0);
    }

    fn load(&mut self, transactions: Vec<Transaction>, skipped: usize) {
        self.end_drag_if_active();

        self.extent = DataExtent::from_transactions(&transactions);
        self.transactions = transactions;
        self.skipped_records = skipped;
        self.data_version = self.data_version.wrapping_add(1);
        self.cache.clear();

        let current_year = self.current_year();
        self.quick_ranges = self
            .extent
            .map(|extent| quick_ranges_for_extent(extent, current_year))
            .unwrap_or_default();

        debug!(
            count = self.transactions.len(),
            skipped,
            quick_ranges = self.quick_ranges.len(),
            data_version = self.data_version,
            "set transactions"
        );
        self.emit_event(TimelineEvent::TransactionsUpdated {
            count: self.transactions.len(),
            skipped,
        });

        let visible =
            visible_range_for_extent(self.extent, self.zoom_level.value(), current_year);
        self.apply_visible_range(visible, RangeChangeSource::DataReload);
    }
}
