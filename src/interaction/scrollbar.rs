use serde::{Deserialize, Serialize};

use crate::core::ViewportRange;

use super::{ModeTransition, ScrollMode};

/// Smallest thumb width, as a fraction of the track, so tiny windows stay grabbable.
pub const DEFAULT_MIN_THUMB_WIDTH_FRACTION: f64 = 0.08;

/// Thumb placement as fractions of the track width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThumbGeometry {
    pub width_fraction: f64,
    pub left_fraction: f64,
}

impl ThumbGeometry {
    /// Full-width thumb at the left edge, used for degenerate extents.
    pub const FULL: Self = Self {
        width_fraction: 1.0,
        left_fraction: 0.0,
    };

    #[must_use]
    pub fn right_fraction(self) -> f64 {
        self.left_fraction + self.width_fraction
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollTuning {
    pub min_thumb_width_fraction: f64,
}

impl Default for ScrollTuning {
    fn default() -> Self {
        Self {
            min_thumb_width_fraction: DEFAULT_MIN_THUMB_WIDTH_FRACTION,
        }
    }
}

/// Captured at drag start, dropped on pointer release.
///
/// Panning is computed from `origin_start_millis`; the thumb fractions only
/// describe what was drawn when the gesture began.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragState {
    pub origin_pointer_x: f64,
    pub origin_left_fraction: f64,
    pub width_fraction: f64,
    pub origin_start_millis: i64,
    pub span_millis: i64,
}

/// Computes thumb width and offset for `visible` inside `full`.
#[must_use]
pub fn thumb_geometry(
    full: ViewportRange,
    visible: ViewportRange,
    min_width_fraction: f64,
) -> ThumbGeometry {
    let full_span = full.span_millis() as f64;
    if full_span <= 0.0 {
        return ThumbGeometry::FULL;
    }

    let min_width = if min_width_fraction.is_finite() && min_width_fraction > 0.0 {
        min_width_fraction.min(1.0)
    } else {
        DEFAULT_MIN_THUMB_WIDTH_FRACTION
    };

    let width_fraction = (visible.span_millis() as f64 / full_span).clamp(min_width, 1.0);
    let offset = (visible.start_millis() - full.start_millis()) as f64;
    let left_fraction = (offset / full_span).clamp(0.0, 1.0 - width_fraction);

    ThumbGeometry {
        width_fraction,
        left_fraction,
    }
}

/// Fits a window of `span_millis` starting near `start_millis` into `full`.
///
/// The span is preserved unless it exceeds the extent, in which case the
/// whole extent is returned.
#[must_use]
pub fn clamp_range_to_extent(
    start_millis: i64,
    span_millis: i64,
    full: ViewportRange,
) -> Option<ViewportRange> {
    if span_millis <= 0 {
        return None;
    }
    if span_millis >= full.span_millis() {
        return Some(full);
    }

    let start = start_millis.clamp(full.start_millis(), full.end_millis() - span_millis);
    ViewportRange::from_millis(start, start + span_millis)
}

/// Rebuilds a window of `span_millis` whose start sits at `left_fraction` of `full`.
#[must_use]
pub fn range_from_thumb(
    full: ViewportRange,
    left_fraction: f64,
    span_millis: i64,
) -> Option<ViewportRange> {
    if !left_fraction.is_finite() {
        return None;
    }
    let offset = (left_fraction.clamp(0.0, 1.0) * full.span_millis() as f64).round() as i64;
    clamp_range_to_extent(full.start_millis() + offset, span_millis, full)
}

/// Centers the current visible span on the instant at `click_fraction` of the track.
#[must_use]
pub fn center_range_at_fraction(
    full: ViewportRange,
    visible: ViewportRange,
    click_fraction: f64,
) -> Option<ViewportRange> {
    if !click_fraction.is_finite() {
        return None;
    }
    let fraction = click_fraction.clamp(0.0, 1.0);
    let target = full.start_millis() + (full.span_millis() as f64 * fraction).round() as i64;
    let span = visible.span_millis();
    clamp_range_to_extent(target - span / 2, span, full)
}

/// Drag-to-pan state machine over the scrollbar track: `Idle -> Dragging -> Idle`.
///
/// All inputs are plain numbers; the host measures the track and forwards
/// pointer events, including moves outside the track once a drag started.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollController {
    tuning: ScrollTuning,
    drag: Option<DragState>,
}

impl ScrollController {
    #[must_use]
    pub fn new(tuning: ScrollTuning) -> Self {
        Self { tuning, drag: None }
    }

    #[must_use]
    pub fn tuning(&self) -> ScrollTuning {
        self.tuning
    }

    #[must_use]
    pub fn mode(&self) -> ScrollMode {
        if self.drag.is_some() {
            ScrollMode::Dragging
        } else {
            ScrollMode::Idle
        }
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn drag_state(&self) -> Option<DragState> {
        self.drag
    }

    #[must_use]
    pub fn thumb_geometry(&self, full: ViewportRange, visible: ViewportRange) -> ThumbGeometry {
        thumb_geometry(full, visible, self.tuning.min_thumb_width_fraction)
    }

    #[must_use]
    pub fn track_click(
        &self,
        full: ViewportRange,
        visible: ViewportRange,
        click_fraction: f64,
    ) -> Option<ViewportRange> {
        center_range_at_fraction(full, visible, click_fraction)
    }

    /// Captures the pointer origin and current thumb offset.
    ///
    /// A second call while dragging re-captures the origin.
    pub fn start_drag(
        &mut self,
        pointer_x: f64,
        full: ViewportRange,
        visible: ViewportRange,
    ) -> ModeTransition {
        let previous = self.mode();
        if !pointer_x.is_finite() {
            return ModeTransition::unchanged(previous);
        }

        let geometry = self.thumb_geometry(full, visible);
        self.drag = Some(DragState {
            origin_pointer_x: pointer_x,
            origin_left_fraction: geometry.left_fraction,
            width_fraction: geometry.width_fraction,
            origin_start_millis: visible.start_millis(),
            span_millis: visible.span_millis(),
        });
        ModeTransition::new(previous, ScrollMode::Dragging)
    }

    /// Maps the pointer displacement since drag start to a new window.
    ///
    /// The track stands for the whole extent, so a move of `d` pixels pans by
    /// `d / track_width_px` of the extent from the window held at drag start.
    /// The span is kept and the result is clamped into `full`. Returns `None`
    /// when idle or when the track width or pointer are unusable.
    #[must_use]
    pub fn pointer_move(
        &self,
        pointer_x: f64,
        track_width_px: f64,
        full: ViewportRange,
    ) -> Option<ViewportRange> {
        let drag = self.drag?;
        if !pointer_x.is_finite() || !track_width_px.is_finite() || track_width_px <= 0.0 {
            return None;
        }

        let delta_fraction = (pointer_x - drag.origin_pointer_x) / track_width_px;
        let delta_millis = (delta_fraction * full.span_millis() as f64).round() as i64;
        clamp_range_to_extent(
            drag.origin_start_millis.saturating_add(delta_millis),
            drag.span_millis,
            full,
        )
    }

    /// Ends the gesture and discards the drag state.
    pub fn pointer_up(&mut self) -> ModeTransition {
        let previous = self.mode();
        self.drag = None;
        ModeTransition::new(previous, ScrollMode::Idle)
    }
}
