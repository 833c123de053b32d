use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_ACTIVE_TOLERANCE_DAYS, DEFAULT_UNCATEGORIZED_LABEL, ZoomLevel};
use crate::error::{TimelineError, TimelineResult};
use crate::interaction::{DEFAULT_MIN_THUMB_WIDTH_FRACTION, ScrollTuning};

/// Public engine bootstrap configuration.
///
/// This type is serializable so host applications can persist/load timeline
/// setup without inventing their own ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEngineConfig {
    #[serde(default)]
    pub initial_zoom_level: i32,
    #[serde(default = "default_active_range_tolerance_days")]
    pub active_range_tolerance_days: i64,
    #[serde(default = "default_min_thumb_width_fraction")]
    pub min_thumb_width_fraction: f64,
    /// Pins the "current year" used for month windows and quick ranges.
    /// `None` reads the system clock.
    #[serde(default)]
    pub reference_year: Option<i32>,
    #[serde(default = "default_uncategorized_label")]
    pub uncategorized_label: String,
}

fn default_active_range_tolerance_days() -> i64 {
    DEFAULT_ACTIVE_TOLERANCE_DAYS
}

fn default_min_thumb_width_fraction() -> f64 {
    DEFAULT_MIN_THUMB_WIDTH_FRACTION
}

fn default_uncategorized_label() -> String {
    DEFAULT_UNCATEGORIZED_LABEL.to_owned()
}

impl Default for TimelineEngineConfig {
    fn default() -> Self {
        Self {
            initial_zoom_level: 0,
            active_range_tolerance_days: default_active_range_tolerance_days(),
            min_thumb_width_fraction: default_min_thumb_width_fraction(),
            reference_year: None,
            uncategorized_label: default_uncategorized_label(),
        }
    }
}

impl TimelineEngineConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial zoom level; clamped into the supported range on use.
    #[must_use]
    pub fn with_initial_zoom_level(mut self, level: i32) -> Self {
        self.initial_zoom_level = level;
        self
    }

    #[must_use]
    pub fn with_active_range_tolerance_days(mut self, days: i64) -> Self {
        self.active_range_tolerance_days = days;
        self
    }

    #[must_use]
    pub fn with_min_thumb_width_fraction(mut self, fraction: f64) -> Self {
        self.min_thumb_width_fraction = fraction;
        self
    }

    #[must_use]
    pub fn with_reference_year(mut self, year: i32) -> Self {
        self.reference_year = Some(year);
        self
    }

    #[must_use]
    pub fn with_uncategorized_label(mut self, label: impl Into<String>) -> Self {
        self.uncategorized_label = label.into();
        self
    }

    pub fn validate(&self) -> TimelineResult<()> {
        if self.active_range_tolerance_days < 0 {
            return Err(TimelineError::InvalidConfig(
                "active range tolerance must be >= 0 days".to_owned(),
            ));
        }

        if !self.min_thumb_width_fraction.is_finite()
            || self.min_thumb_width_fraction <= 0.0
            || self.min_thumb_width_fraction > 1.0
        {
            return Err(TimelineError::InvalidConfig(
                "minimum thumb width must be finite and in (0, 1]".to_owned(),
            ));
        }

        if self.uncategorized_label.trim().is_empty() {
            return Err(TimelineError::InvalidConfig(
                "uncategorized label must not be blank".to_owned(),
            ));
        }

        Ok(())
    }

    pub fn from_json_str(input: &str) -> TimelineResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| TimelineError::InvalidConfig(format!("config json: {err}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> TimelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| TimelineError::InvalidConfig(format!("config json: {err}")))
    }

    pub(super) fn initial_zoom(&self) -> ZoomLevel {
        ZoomLevel::new(self.initial_zoom_level)
    }

    pub(super) fn scroll_tuning(&self) -> ScrollTuning {
        ScrollTuning {
            min_thumb_width_fraction: self.min_thumb_width_fraction,
        }
    }
}
