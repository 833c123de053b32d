use tracing::debug;

use crate::core::{ZoomLevel, visible_range_for_extent};
use crate::extensions::{RangeChangeSource, TimelineEvent};

use super::TimelineEngine;

impl TimelineEngine {
    /// Steps one level towards month granularity. Returns `true` on change.
    pub fn zoom_in(&mut self) -> bool {
        self.apply_zoom_level(self.zoom_level.zoom_in())
    }

    /// Steps one level towards year granularity. Returns `true` on change.
    pub fn zoom_out(&mut self) -> bool {
        self.apply_zoom_level(self.zoom_level.zoom_out())
    }

    /// Returns to quarter granularity. Returns `true` on change.
    pub fn reset_zoom(&mut self) -> bool {
        self.apply_zoom_level(ZoomLevel::default())
    }

    /// Sets an explicit zoom level, clamped into `[-1, 1]`.
    pub fn set_zoom_level(&mut self, level: i32) -> bool {
        self.apply_zoom_level(ZoomLevel::new(level))
    }

    pub(super) fn apply_zoom_level(&mut self, level: ZoomLevel) -> bool {
        if level == self.zoom_level {
            return false;
        }

        self.end_drag_if_active();
        self.zoom_level = level;
        debug!(
            level = level.value(),
            granularity = ?level.granularity(),
            "zoom level changed"
        );
        self.emit_event(TimelineEvent::ZoomChanged {
            level: level.value(),
            granularity: level.granularity(),
        });

        let visible = visible_range_for_extent(self.extent, level.value(), self.current_year());
        self.apply_visible_range(visible, RangeChangeSource::Zoom);
        true
    }
}
