use chrono::{DateTime, Datelike, Utc};

use crate::core::primitives::{year_end, year_start};
use crate::core::types::{DataExtent, Granularity, LOOKAHEAD_YEARS, ViewportRange};

/// Width of the month-granularity window, in calendar years.
pub const MONTH_WINDOW_YEARS: i32 = 2;

/// Resolves the visible date window for a zoom level.
///
/// - `None` when either extent bound is missing or the extent is empty.
/// - Year/Quarter granularity shows the whole `[full_start, full_end]`.
/// - Month granularity shows an even-aligned two-year window ending no later
///   than `min(current_year, full_end.year - 2)`, clamped into the extent.
///
/// `full_end` is expected to already carry the lookahead pad.
#[must_use]
pub fn visible_range(
    full_start: Option<DateTime<Utc>>,
    full_end: Option<DateTime<Utc>>,
    zoom_level: i32,
    current_year: i32,
) -> Option<ViewportRange> {
    let full = ViewportRange::new(full_start?, full_end?).ok()?;

    match Granularity::from_zoom_level(zoom_level) {
        Granularity::Year | Granularity::Quarter => Some(full),
        Granularity::Month => Some(month_window(full, current_year).unwrap_or(full)),
    }
}

/// Convenience wrapper over [`visible_range`] for a computed [`DataExtent`].
#[must_use]
pub fn visible_range_for_extent(
    extent: Option<DataExtent>,
    zoom_level: i32,
    current_year: i32,
) -> Option<ViewportRange> {
    visible_range(
        extent.map(DataExtent::start),
        extent.map(DataExtent::end),
        zoom_level,
        current_year,
    )
}

/// First year of the even-aligned window containing `year`.
#[must_use]
pub fn aligned_window_start_year(year: i32) -> i32 {
    year - year.rem_euclid(MONTH_WINDOW_YEARS)
}

fn month_window(full: ViewportRange, current_year: i32) -> Option<ViewportRange> {
    let data_end_year = full.end().year() - LOOKAHEAD_YEARS as i32;
    let target_year = current_year.min(data_end_year);
    let window_start_year = aligned_window_start_year(target_year);

    let window = ViewportRange::new(
        year_start(window_start_year)?,
        year_end(window_start_year + MONTH_WINDOW_YEARS - 1)?,
    )
    .ok()?;
    window.intersect(full)
}
