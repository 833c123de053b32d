use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{MILLIS_PER_DAY, millis_between, year_end, year_start};
use crate::core::types::{DataExtent, LOOKAHEAD_YEARS, ViewportRange};
use crate::core::viewport::MONTH_WINDOW_YEARS;

pub const DEFAULT_ACTIVE_TOLERANCE_DAYS: i64 = 31;

/// Precomputed two-year navigation shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickRange {
    pub label: String,
    pub range: ViewportRange,
}

impl QuickRange {
    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.range.start()
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.range.end()
    }
}

/// Quick range plus whether it matches the current viewport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickRangeState {
    pub range: QuickRange,
    pub active: bool,
}

/// Generates the two-year windows covering the data plus one future window.
///
/// Windows start at `full_start.year`, step by two years and stop once the
/// start year passes `min(full_end.year - 2, current_year) + 2`. Each window
/// spans `[Y-01-01, (Y+1)-12-31]` as calendar years; callers clamp a selected
/// window into the extent. An empty extent yields no windows.
#[must_use]
pub fn quick_ranges(
    full_start: DateTime<Utc>,
    full_end: DateTime<Utc>,
    current_year: i32,
) -> Vec<QuickRange> {
    if full_start >= full_end {
        return Vec::new();
    }

    let first_year = full_start.year();
    let last_year =
        (full_end.year() - LOOKAHEAD_YEARS as i32).min(current_year) + MONTH_WINDOW_YEARS;

    (first_year..=last_year)
        .step_by(MONTH_WINDOW_YEARS as usize)
        .filter_map(|year| {
            let last = year + MONTH_WINDOW_YEARS - 1;
            let range = ViewportRange::new(year_start(year)?, year_end(last)?).ok()?;
            Some(QuickRange {
                label: format!("{year}-{last}"),
                range,
            })
        })
        .collect()
}

#[must_use]
pub fn quick_ranges_for_extent(extent: DataExtent, current_year: i32) -> Vec<QuickRange> {
    quick_ranges(extent.start(), extent.end(), current_year)
}

/// Fuzzy match with the default 31-day tolerance on both boundaries.
#[must_use]
pub fn is_active(range: &QuickRange, visible: ViewportRange) -> bool {
    is_active_with_tolerance(range, visible, DEFAULT_ACTIVE_TOLERANCE_DAYS)
}

/// Both boundaries must lie within `tolerance_days` of the visible range.
#[must_use]
pub fn is_active_with_tolerance(
    range: &QuickRange,
    visible: ViewportRange,
    tolerance_days: i64,
) -> bool {
    let tolerance_millis = tolerance_days.max(0).saturating_mul(MILLIS_PER_DAY);
    let start_gap = millis_between(range.start(), visible.start()).saturating_abs();
    let end_gap = millis_between(range.end(), visible.end()).saturating_abs();
    start_gap <= tolerance_millis && end_gap <= tolerance_millis
}

/// Index of the first range matching `visible`, if any.
#[must_use]
pub fn active_index(
    ranges: &[QuickRange],
    visible: ViewportRange,
    tolerance_days: i64,
) -> Option<usize> {
    ranges
        .iter()
        .position(|range| is_active_with_tolerance(range, visible, tolerance_days))
}
