use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

#[cfg(feature = "parallel-aggregation")]
use rayon::prelude::*;

use crate::core::primitives::{decimal_to_f64, start_of_day};
use crate::core::transaction::{MainCategory, Transaction};
use crate::core::types::Granularity;
use crate::error::TimelineResult;

pub const DEFAULT_UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Per-period totals with per-category breakdowns.
///
/// Amounts are absolute values, and each total equals the sum of its
/// category map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBucket {
    pub period_start: NaiveDate,
    pub income: Decimal,
    pub expenses: Decimal,
    pub transfers: Decimal,
    pub income_by_category: BTreeMap<String, Decimal>,
    pub expenses_by_category: BTreeMap<String, Decimal>,
    pub transfers_by_category: BTreeMap<String, Decimal>,
    /// Every transaction in the period, including unrecognized main categories.
    pub transaction_count: usize,
}

impl PeriodBucket {
    #[must_use]
    pub fn empty(period_start: NaiveDate) -> Self {
        Self {
            period_start,
            income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            transfers: Decimal::ZERO,
            income_by_category: BTreeMap::new(),
            expenses_by_category: BTreeMap::new(),
            transfers_by_category: BTreeMap::new(),
            transaction_count: 0,
        }
    }

    #[must_use]
    pub fn total(&self, category: MainCategory) -> Decimal {
        match category {
            MainCategory::Income => self.income,
            MainCategory::Expenses => self.expenses,
            MainCategory::Transfers => self.transfers,
        }
    }

    #[must_use]
    pub fn by_category(&self, category: MainCategory) -> &BTreeMap<String, Decimal> {
        match category {
            MainCategory::Income => &self.income_by_category,
            MainCategory::Expenses => &self.expenses_by_category,
            MainCategory::Transfers => &self.transfers_by_category,
        }
    }

    /// Income minus expenses; transfers are neutral.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.income - self.expenses
    }

    #[must_use]
    pub fn period_start_time(&self) -> DateTime<Utc> {
        start_of_day(self.period_start)
    }

    /// Exclusive end of the period.
    #[must_use]
    pub fn period_end(&self, granularity: Granularity) -> Option<NaiveDate> {
        granularity.next_period_start(self.period_start)
    }

    #[must_use]
    pub fn label(&self, granularity: Granularity) -> String {
        granularity.label(self.period_start)
    }

    pub fn to_series_point(&self) -> TimelineResult<SeriesPoint> {
        Ok(SeriesPoint {
            time_millis: self.period_start_time().timestamp_millis(),
            income: decimal_to_f64(self.income, "income")?,
            expenses: decimal_to_f64(self.expenses, "expenses")?,
            transfers: decimal_to_f64(self.transfers, "transfers")?,
        })
    }

    fn record(&mut self, transaction: &Transaction, uncategorized_label: &str) {
        self.transaction_count += 1;
        let Some(main_category) = transaction.main_category else {
            return;
        };

        let amount = transaction.amount.abs();
        let name = transaction.category_or(uncategorized_label);
        let period_start = self.period_start;
        let (total, by_category) = self.slot_mut(main_category);
        let subtotal = by_category.get(name).copied().unwrap_or(Decimal::ZERO);
        let (Some(next_total), Some(next_subtotal)) =
            (total.checked_add(amount), subtotal.checked_add(amount))
        else {
            warn!(
                %period_start,
                category = main_category.as_str(),
                %amount,
                "bucket total overflowed; amount left out of sums"
            );
            return;
        };
        *total = next_total;
        by_category.insert(name.to_owned(), next_subtotal);
    }

    #[cfg(feature = "parallel-aggregation")]
    fn merge(&mut self, other: PeriodBucket) {
        self.transaction_count += other.transaction_count;
        let period_start = self.period_start;
        for category in MainCategory::ALL {
            let other_total = other.total(category);
            let (total, by_category) = self.slot_mut(category);
            let Some(next_total) = total.checked_add(other_total) else {
                warn!(
                    %period_start,
                    category = category.as_str(),
                    "bucket total overflowed while merging; partial sums left out"
                );
                continue;
            };
            let merged: Option<Vec<(String, Decimal)>> = other
                .by_category(category)
                .iter()
                .map(|(name, amount)| {
                    let current = by_category.get(name).copied().unwrap_or(Decimal::ZERO);
                    current
                        .checked_add(*amount)
                        .map(|sum| (name.clone(), sum))
                })
                .collect();
            if let Some(merged) = merged {
                *total = next_total;
                by_category.extend(merged);
            }
        }
    }

    fn slot_mut(
        &mut self,
        category: MainCategory,
    ) -> (&mut Decimal, &mut BTreeMap<String, Decimal>) {
        match category {
            MainCategory::Income => (&mut self.income, &mut self.income_by_category),
            MainCategory::Expenses => (&mut self.expenses, &mut self.expenses_by_category),
            MainCategory::Transfers => (&mut self.transfers, &mut self.transfers_by_category),
        }
    }
}

/// Chart-ready projection of a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time_millis: i64,
    pub income: f64,
    pub expenses: f64,
    pub transfers: f64,
}

/// Buckets transactions by period using the default uncategorized label.
#[must_use]
pub fn aggregate(transactions: &[Transaction], granularity: Granularity) -> Vec<PeriodBucket> {
    aggregate_with_label(transactions, granularity, DEFAULT_UNCATEGORIZED_LABEL)
}

/// Buckets transactions by period, ascending by period start.
///
/// Total over any input: empty input yields an empty vector, and an amount
/// that would overflow a bucket total is logged and left out of the sums.
#[must_use]
pub fn aggregate_with_label(
    transactions: &[Transaction],
    granularity: Granularity,
    uncategorized_label: &str,
) -> Vec<PeriodBucket> {
    #[cfg(feature = "parallel-aggregation")]
    {
        transactions
            .par_iter()
            .fold(BTreeMap::new, |mut buckets, transaction| {
                record_into(&mut buckets, transaction, granularity, uncategorized_label);
                buckets
            })
            .reduce(BTreeMap::new, merge_bucket_maps)
            .into_values()
            .collect()
    }

    #[cfg(not(feature = "parallel-aggregation"))]
    {
        let mut buckets = BTreeMap::new();
        for transaction in transactions {
            record_into(&mut buckets, transaction, granularity, uncategorized_label);
        }
        buckets.into_values().collect()
    }
}

fn record_into(
    buckets: &mut BTreeMap<NaiveDate, PeriodBucket>,
    transaction: &Transaction,
    granularity: Granularity,
    uncategorized_label: &str,
) {
    let period_start = granularity.period_start(transaction.date.date_naive());
    buckets
        .entry(period_start)
        .or_insert_with(|| PeriodBucket::empty(period_start))
        .record(transaction, uncategorized_label);
}

#[cfg(feature = "parallel-aggregation")]
fn merge_bucket_maps(
    mut left: BTreeMap<NaiveDate, PeriodBucket>,
    right: BTreeMap<NaiveDate, PeriodBucket>,
) -> BTreeMap<NaiveDate, PeriodBucket> {
    for (period_start, bucket) in right {
        match left.get_mut(&period_start) {
            Some(existing) => existing.merge(bucket),
            None => {
                left.insert(period_start, bucket);
            }
        }
    }
    left
}
