use serde::{Deserialize, Serialize};

use crate::core::{Granularity, ViewportRange};
use crate::interaction::ScrollMode;

/// Read-only engine state passed alongside every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineContext {
    pub zoom_level: i32,
    pub granularity: Granularity,
    pub visible_range: Option<ViewportRange>,
    pub scroll_mode: ScrollMode,
    pub transactions_len: usize,
}

/// What caused a visible-range change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeChangeSource {
    Zoom,
    TrackClick,
    Drag,
    QuickRange,
    DataReload,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimelineEvent {
    TransactionsUpdated {
        count: usize,
        skipped: usize,
    },
    ZoomChanged {
        level: i32,
        granularity: Granularity,
    },
    VisibleRangeChanged {
        range: ViewportRange,
        source: RangeChangeSource,
    },
    VisibleRangeCleared,
    DragStarted,
    DragEnded,
}

/// Hook for host code that reacts to viewport changes and drag transitions.
pub trait TimelineObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: TimelineEvent, context: TimelineContext);
}
