//! timeline-rs: timeline engine for finance dashboards.
//!
//! Buckets dated transactions into year/quarter/month periods, derives the
//! visible window from a discrete zoom level, and keeps the quick-range
//! navigator and scrollbar thumb consistent with that window. Rendering and
//! event wiring stay in the host; everything here is plain data in, plain
//! data out.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod telemetry;

pub use api::{TimelineEngine, TimelineEngineConfig};
pub use error::{TimelineError, TimelineResult};
