pub mod observers;

pub use observers::{RangeChangeSource, TimelineContext, TimelineEvent, TimelineObserver};
