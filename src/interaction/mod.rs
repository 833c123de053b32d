mod scrollbar;

use serde::{Deserialize, Serialize};

pub use scrollbar::{
    DEFAULT_MIN_THUMB_WIDTH_FRACTION, DragState, ScrollController, ScrollTuning, ThumbGeometry,
    center_range_at_fraction, clamp_range_to_extent, range_from_thumb, thumb_geometry,
};

/// Scrollbar gesture mode.
///
/// Hosts suspend text selection and switch the cursor while `Dragging`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollMode {
    Idle,
    Dragging,
}

/// Mode change produced by a gesture call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeTransition {
    pub previous: ScrollMode,
    pub current: ScrollMode,
}

impl ModeTransition {
    #[must_use]
    pub fn new(previous: ScrollMode, current: ScrollMode) -> Self {
        Self { previous, current }
    }

    #[must_use]
    pub fn unchanged(mode: ScrollMode) -> Self {
        Self::new(mode, mode)
    }

    #[must_use]
    pub fn changed(self) -> bool {
        self.previous != self.current
    }

    #[must_use]
    pub fn drag_started(self) -> bool {
        self.previous == ScrollMode::Idle && self.current == ScrollMode::Dragging
    }

    #[must_use]
    pub fn drag_ended(self) -> bool {
        self.previous == ScrollMode::Dragging && self.current == ScrollMode::Idle
    }
}
