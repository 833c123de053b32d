use crate::core::aggregation::PeriodBucket;
use crate::core::primitives::start_of_day;
use crate::core::transaction::Transaction;
use crate::core::types::{Granularity, ViewportRange};

/// Returns buckets whose period overlaps the window.
///
/// Partial periods at either edge are kept so the chart does not drop the
/// first or last bar of a window that starts mid-period.
#[must_use]
pub fn buckets_in_window(
    buckets: &[PeriodBucket],
    granularity: Granularity,
    window: ViewportRange,
) -> Vec<PeriodBucket> {
    buckets
        .iter()
        .filter(|bucket| {
            let starts_before_window_end = bucket.period_start_time() <= window.end();
            let ends_after_window_start = bucket
                .period_end(granularity)
                .is_none_or(|end| start_of_day(end) > window.start());
            starts_before_window_end && ends_after_window_start
        })
        .cloned()
        .collect()
}

/// Returns transactions whose timestamp falls inside an inclusive window.
#[must_use]
pub fn transactions_in_window(
    transactions: &[Transaction],
    window: ViewportRange,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| window.contains(transaction.date))
        .cloned()
        .collect()
}
