use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::primitives::{add_years, datetime_from_millis, millis_between};
use crate::core::transaction::Transaction;
use crate::error::{TimelineError, TimelineResult};

/// Calendar years appended after the last transaction for forward planning.
pub const LOOKAHEAD_YEARS: u32 = 2;

/// Time-bucket size used for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Granularity {
    Year,
    Quarter,
    Month,
}

impl Granularity {
    /// `<= -1` maps to years, `0` to quarters, `>= 1` to months.
    #[must_use]
    pub fn from_zoom_level(zoom_level: i32) -> Self {
        match zoom_level {
            i32::MIN..=-1 => Self::Year,
            0 => Self::Quarter,
            _ => Self::Month,
        }
    }

    /// Normalizes a calendar date to the first day of its containing period.
    #[must_use]
    pub fn period_start(self, date: NaiveDate) -> NaiveDate {
        let month = match self {
            Self::Year => 1,
            Self::Quarter => (date.month0() / 3) * 3 + 1,
            Self::Month => date.month(),
        };
        NaiveDate::from_ymd_opt(date.year(), month, 1).unwrap_or(date)
    }

    /// First day of the period following the one starting at `period_start`.
    #[must_use]
    pub fn next_period_start(self, period_start: NaiveDate) -> Option<NaiveDate> {
        let months = match self {
            Self::Year => 12,
            Self::Quarter => 3,
            Self::Month => 1,
        };
        period_start.checked_add_months(chrono::Months::new(months))
    }

    /// Human-readable period label: `2024`, `Q1 2024` or `Jan 2024`.
    #[must_use]
    pub fn label(self, period_start: NaiveDate) -> String {
        match self {
            Self::Year => period_start.format("%Y").to_string(),
            Self::Quarter => format!("Q{} {}", period_start.month0() / 3 + 1, period_start.year()),
            Self::Month => period_start.format("%b %Y").to_string(),
        }
    }
}

/// Discrete zoom state controlled by zoom-in/out/reset buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ZoomLevel(i32);

impl ZoomLevel {
    pub const MIN: i32 = -1;
    pub const MAX: i32 = 1;

    #[must_use]
    pub fn new(level: i32) -> Self {
        Self(level.clamp(Self::MIN, Self::MAX))
    }

    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0.saturating_add(1))
    }

    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0.saturating_sub(1))
    }

    #[must_use]
    pub fn granularity(self) -> Granularity {
        Granularity::from_zoom_level(self.0)
    }
}

/// A visible date window. Always satisfies `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewportRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ViewportRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> TimelineResult<Self> {
        if start >= end {
            return Err(TimelineError::InvalidData(format!(
                "viewport start {start} must be before end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds a range from unix milliseconds, returning `None` for empty or
    /// unrepresentable windows.
    #[must_use]
    pub fn from_millis(start_millis: i64, end_millis: i64) -> Option<Self> {
        if start_millis >= end_millis {
            return None;
        }
        Some(Self {
            start: datetime_from_millis(start_millis)?,
            end: datetime_from_millis(end_millis)?,
        })
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn start_millis(self) -> i64 {
        self.start.timestamp_millis()
    }

    #[must_use]
    pub fn end_millis(self) -> i64 {
        self.end.timestamp_millis()
    }

    #[must_use]
    pub fn span_millis(self) -> i64 {
        millis_between(self.start, self.end)
    }

    #[must_use]
    pub fn contains(self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }

    #[must_use]
    pub fn contains_range(self, other: ViewportRange) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// Intersection with `other`, or `None` when they do not overlap.
    #[must_use]
    pub fn intersect(self, other: ViewportRange) -> Option<ViewportRange> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Self { start, end })
    }
}

/// Full data extent: first transaction through last transaction plus the
/// lookahead pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataExtent {
    start: DateTime<Utc>,
    data_end: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DataExtent {
    pub fn new(start: DateTime<Utc>, data_end: DateTime<Utc>) -> TimelineResult<Self> {
        if start > data_end {
            return Err(TimelineError::InvalidData(
                "data extent start must not be after its end".to_owned(),
            ));
        }
        let end = add_years(data_end, LOOKAHEAD_YEARS).ok_or_else(|| {
            TimelineError::InvalidData("padded data extent end is out of range".to_owned())
        })?;
        Ok(Self {
            start,
            data_end,
            end,
        })
    }

    /// Computes the extent of a transaction set.
    ///
    /// `None` when the set is empty or the padded end is out of range; the
    /// latter is logged.
    #[must_use]
    pub fn from_transactions(transactions: &[Transaction]) -> Option<Self> {
        let mut dates = transactions.iter().map(|transaction| transaction.date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        });
        match Self::new(min, max) {
            Ok(extent) => Some(extent),
            Err(err) => {
                warn!(
                    start = %min,
                    data_end = %max,
                    error = %err,
                    "transactions have no usable extent"
                );
                None
            }
        }
    }

    #[must_use]
    pub fn start(self) -> DateTime<Utc> {
        self.start
    }

    /// Latest transaction timestamp, without the lookahead pad.
    #[must_use]
    pub fn data_end(self) -> DateTime<Utc> {
        self.data_end
    }

    /// Padded end (`data_end` plus [`LOOKAHEAD_YEARS`]).
    #[must_use]
    pub fn end(self) -> DateTime<Utc> {
        self.end
    }

    #[must_use]
    pub fn full_range(self) -> ViewportRange {
        ViewportRange {
            start: self.start,
            end: self.end,
        }
    }
}
