use tracing::{debug, warn};

use crate::core::{
    Granularity, QuickRange, QuickRangeState, ViewportRange, ZoomLevel, is_active_with_tolerance,
};
use crate::error::{TimelineError, TimelineResult};
use crate::extensions::{RangeChangeSource, TimelineEvent};
use crate::interaction::ModeTransition;

use super::TimelineEngine;

impl TimelineEngine {
    /// Raw quick ranges for the loaded extent, without active flags.
    #[must_use]
    pub fn quick_range_list(&self) -> &[QuickRange] {
        &self.quick_ranges
    }

    /// Quick ranges with their active flag.
    ///
    /// Outside month granularity nothing is reported as active.
    #[must_use]
    pub fn quick_ranges(&self) -> Vec<QuickRangeState> {
        let visible = self
            .visible
            .filter(|_| self.granularity() == Granularity::Month);
        let tolerance_days = self.config.active_range_tolerance_days;

        self.quick_ranges
            .iter()
            .map(|range| QuickRangeState {
                active: visible
                    .is_some_and(|visible| is_active_with_tolerance(range, visible, tolerance_days)),
                range: range.clone(),
            })
            .collect()
    }

    /// Jumps to the quick range at `index`, switching to month granularity first
    /// when needed.
    ///
    /// The calendar window is clamped into the full extent; the clamped window
    /// is returned.
    pub fn select_quick_range(&mut self, index: usize) -> TimelineResult<ViewportRange> {
        let Some(window) = self.quick_ranges.get(index).map(|quick| quick.range) else {
            return Err(TimelineError::InvalidData(format!(
                "quick range index {index} out of bounds ({} available)",
                self.quick_ranges.len()
            )));
        };
        let full = self.full_range().ok_or_else(|| {
            TimelineError::InvalidData("quick range selected without loaded data".to_owned())
        })?;
        let range = window.intersect(full).unwrap_or(full);

        if self.granularity() != Granularity::Month {
            self.apply_zoom_level(ZoomLevel::new(ZoomLevel::MAX));
        }
        self.apply_visible_range(Some(range), RangeChangeSource::QuickRange);
        Ok(range)
    }

    /// Pans so the instant at `click_fraction` of the track becomes the window
    /// center. The span is kept and the window is clamped into the extent.
    pub fn track_click(&mut self, click_fraction: f64) -> Option<ViewportRange> {
        let full = self.full_range()?;
        let visible = self.visible?;
        let Some(target) = self.scroll.track_click(full, visible, click_fraction) else {
            warn!(click_fraction, "ignoring unusable track click");
            return None;
        };
        self.apply_visible_range(Some(target), RangeChangeSource::TrackClick);
        Some(target)
    }

    /// Begins a thumb drag at `pointer_x` (track-local units).
    pub fn drag_start(&mut self, pointer_x: f64) -> ModeTransition {
        let (Some(full), Some(visible)) = (self.full_range(), self.visible) else {
            return ModeTransition::unchanged(self.scroll.mode());
        };

        let transition = self.scroll.start_drag(pointer_x, full, visible);
        if transition.drag_started() {
            debug!(pointer_x, "scroll drag started");
            self.emit_event(TimelineEvent::DragStarted);
        }
        transition
    }

    /// Updates the viewport from a pointer move during a drag.
    ///
    /// `pointer_x` and `track_width_px` must share units. Moves outside the
    /// track are still honored.
    pub fn drag_move(&mut self, pointer_x: f64, track_width_px: f64) -> Option<ViewportRange> {
        let full = self.full_range()?;
        let target = self.scroll.pointer_move(pointer_x, track_width_px, full)?;
        self.apply_visible_range(Some(target), RangeChangeSource::Drag);
        Some(target)
    }

    /// Ends the current drag, if any.
    pub fn drag_end(&mut self) -> ModeTransition {
        self.end_drag_if_active()
    }

    /// Tears down an active drag, e.g. when the host view is destroyed.
    pub fn cancel_drag(&mut self) -> ModeTransition {
        self.end_drag_if_active()
    }

    pub(super) fn end_drag_if_active(&mut self) -> ModeTransition {
        let transition = self.scroll.pointer_up();
        if transition.drag_ended() {
            debug!("scroll drag ended");
            self.emit_event(TimelineEvent::DragEnded);
        }
        transition
    }
}
