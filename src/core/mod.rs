pub mod aggregation;
pub mod primitives;
pub mod quick_range;
pub mod transaction;
pub mod types;
pub mod viewport;
pub mod windowing;

pub use aggregation::{
    DEFAULT_UNCATEGORIZED_LABEL, PeriodBucket, SeriesPoint, aggregate, aggregate_with_label,
};
pub use quick_range::{
    DEFAULT_ACTIVE_TOLERANCE_DAYS, QuickRange, QuickRangeState, active_index, is_active,
    is_active_with_tolerance, quick_ranges, quick_ranges_for_extent,
};
pub use transaction::{
    MainCategory, ParsedTransactions, RawAmount, RawTransaction, Transaction, parse_transactions,
};
pub use types::{DataExtent, Granularity, LOOKAHEAD_YEARS, ViewportRange, ZoomLevel};
pub use viewport::{MONTH_WINDOW_YEARS, visible_range, visible_range_for_extent};
pub use windowing::{buckets_in_window, transactions_in_window};
