mod aggregation_cache;
mod data_controller;
mod engine;
mod engine_config;
mod engine_snapshot;
mod navigation_controller;
mod observer_dispatch;
mod zoom_controller;

pub use aggregation_cache::AggregationCacheStats;
pub use engine::TimelineEngine;
pub use engine_config::TimelineEngineConfig;
pub use engine_snapshot::TimelineSnapshot;
