use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use timeline_rs::core::primitives::parse_timestamp;
use timeline_rs::core::{Granularity, MainCategory, RawTransaction, Transaction};
use timeline_rs::extensions::{RangeChangeSource, TimelineContext, TimelineEvent, TimelineObserver};
use timeline_rs::interaction::ScrollMode;
use timeline_rs::{TimelineEngine, TimelineEngineConfig, TimelineError};

type EventLog = Rc<RefCell<Vec<TimelineEvent>>>;

struct RecordingObserver {
    id: String,
    log: EventLog,
}

impl TimelineObserver for RecordingObserver {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: TimelineEvent, _context: TimelineContext) {
        self.log.borrow_mut().push(event);
    }
}

fn recorder(id: &str) -> (Box<dyn TimelineObserver>, EventLog) {
    let log = EventLog::default();
    let observer = RecordingObserver {
        id: id.to_owned(),
        log: Rc::clone(&log),
    };
    (Box::new(observer), log)
}

fn at(input: &str) -> DateTime<Utc> {
    parse_timestamp(input).expect("valid timestamp")
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

fn seed_transactions() -> Vec<Transaction> {
    let mut transactions = Vec::new();
    for year in 2020..=2025 {
        for month in [1, 4, 7, 10] {
            let when = at(&format!("{year}-{month:02}-15"));
            transactions.push(Transaction::new(
                when,
                Decimal::new(1_000, 0),
                MainCategory::Income,
                Some("Salary"),
            ));
            transactions.push(Transaction::new(
                when,
                Decimal::new(-400, 0),
                MainCategory::Expenses,
                Some("Rent"),
            ));
        }
    }
    transactions
}

fn build_engine() -> TimelineEngine {
    let config = TimelineEngineConfig::default().with_reference_year(2025);
    let mut engine = TimelineEngine::new(config).expect("engine init");
    engine.set_transactions(seed_transactions());
    engine
}

#[test]
fn empty_engine_exposes_no_data_outputs() {
    let mut engine = TimelineEngine::new(TimelineEngineConfig::default()).expect("engine init");

    assert!(engine.visible_range().is_none());
    assert!(engine.extent().is_none());
    assert!(engine.thumb_geometry().is_none());
    assert!(engine.quick_ranges().is_empty());
    assert!(engine.buckets().is_empty());
    assert!(engine.visible_buckets().is_empty());
    assert!(engine.track_click(0.5).is_none());
    assert!(!engine.drag_start(10.0).changed());
}

#[test]
fn default_zoom_shows_full_extent_by_quarter() {
    let mut engine = build_engine();

    assert_eq!(engine.granularity(), Granularity::Quarter);
    assert_eq!(engine.visible_range(), engine.full_range());
    assert_eq!(engine.buckets().len(), 24);

    let thumb = engine.thumb_geometry().expect("thumb");
    assert_eq!(thumb.width_fraction, 1.0);
    assert!(engine.quick_ranges().iter().all(|state| !state.active));
}

#[test]
fn zoom_in_switches_to_month_window_and_highlights_quick_range() {
    let mut engine = build_engine();

    assert!(engine.zoom_in());
    assert_eq!(engine.granularity(), Granularity::Month);

    let visible = engine.visible_range().expect("visible");
    assert_eq!(visible.start().date_naive(), date(2024, 1, 1));
    assert_eq!(visible.end().date_naive(), date(2025, 12, 31));

    let states = engine.quick_ranges();
    let active: Vec<&str> = states
        .iter()
        .filter(|state| state.active)
        .map(|state| state.range.label.as_str())
        .collect();
    assert_eq!(active, vec!["2024-2025"]);

    let buckets = engine.visible_buckets();
    assert_eq!(buckets.len(), 8);
    assert!(buckets.iter().all(|bucket| bucket.period_start >= date(2024, 1, 1)));

    assert!(!engine.zoom_in());
}

#[test]
fn zoom_out_and_reset_walk_granularities() {
    let mut engine = build_engine();

    assert!(engine.zoom_out());
    assert_eq!(engine.granularity(), Granularity::Year);
    assert_eq!(engine.buckets().len(), 6);
    assert!(!engine.zoom_out());

    assert!(engine.reset_zoom());
    assert_eq!(engine.granularity(), Granularity::Quarter);
    assert!(!engine.reset_zoom());

    assert!(engine.set_zoom_level(9));
    assert_eq!(engine.zoom_level(), 1);
}

#[test]
fn selecting_quick_range_enters_month_granularity() {
    let mut engine = build_engine();
    let (observer, log) = recorder("log");
    engine.register_observer(observer).expect("register");

    let target = engine.select_quick_range(0).expect("select");

    assert_eq!(engine.granularity(), Granularity::Month);
    assert_eq!(engine.visible_range(), Some(target));
    assert_eq!(target.start(), engine.full_range().expect("full").start());
    assert_eq!(target.end().date_naive(), date(2021, 12, 31));
    assert!(engine.quick_ranges()[0].active);

    let events = log.borrow();
    assert!(matches!(
        events.first(),
        Some(TimelineEvent::ZoomChanged {
            level: 1,
            granularity: Granularity::Month
        })
    ));
    assert!(matches!(
        events.last(),
        Some(TimelineEvent::VisibleRangeChanged {
            source: RangeChangeSource::QuickRange,
            ..
        })
    ));
}

#[test]
fn selecting_missing_quick_range_is_an_error() {
    let mut engine = build_engine();
    let result = engine.select_quick_range(99);
    assert!(matches!(result, Err(TimelineError::InvalidData(_))));
}

#[test]
fn track_click_pans_month_window_and_notifies() {
    let mut engine = build_engine();
    engine.zoom_in();
    let (observer, log) = recorder("log");
    engine.register_observer(observer).expect("register");

    let before = engine.visible_range().expect("visible");
    let after = engine.track_click(0.0).expect("clicked");

    assert_eq!(after.span_millis(), before.span_millis());
    assert_eq!(after.start(), engine.full_range().expect("full").start());
    assert_eq!(
        log.borrow().as_slice(),
        &[TimelineEvent::VisibleRangeChanged {
            range: after,
            source: RangeChangeSource::TrackClick,
        }]
    );
}

#[test]
fn drag_gesture_emits_lifecycle_events() {
    let mut engine = build_engine();
    engine.zoom_in();
    let (observer, log) = recorder("log");
    engine.register_observer(observer).expect("register");

    assert!(engine.drag_start(400.0).drag_started());
    assert!(engine.is_dragging());
    assert_eq!(engine.scroll_mode(), ScrollMode::Dragging);

    let moved = engine.drag_move(300.0, 1_000.0).expect("moved");
    assert_eq!(engine.visible_range(), Some(moved));

    assert!(engine.drag_end().drag_ended());
    assert!(!engine.is_dragging());
    assert!(engine.drag_move(200.0, 1_000.0).is_none());

    let events = log.borrow();
    assert_eq!(events.first(), Some(&TimelineEvent::DragStarted));
    assert!(matches!(
        events[1],
        TimelineEvent::VisibleRangeChanged {
            source: RangeChangeSource::Drag,
            ..
        }
    ));
    assert_eq!(events.last(), Some(&TimelineEvent::DragEnded));
}

#[test]
fn reloading_data_mid_drag_tears_the_drag_down() {
    let mut engine = build_engine();
    engine.zoom_in();
    let (observer, log) = recorder("log");
    engine.register_observer(observer).expect("register");

    let _ = engine.drag_start(10.0);
    engine.set_transactions(seed_transactions());

    assert!(!engine.is_dragging());
    let events = log.borrow();
    assert_eq!(events[1], TimelineEvent::DragEnded);
    assert!(events.contains(&TimelineEvent::TransactionsUpdated {
        count: 48,
        skipped: 0
    }));
}

#[test]
fn dropping_engine_mid_drag_reports_drag_end() {
    let mut engine = build_engine();
    let (observer, log) = recorder("log");
    engine.register_observer(observer).expect("register");
    let _ = engine.drag_start(10.0);

    drop(engine);

    assert_eq!(log.borrow().last(), Some(&TimelineEvent::DragEnded));
}

#[test]
fn clear_removes_viewport() {
    let mut engine = build_engine();
    let (observer, log) = recorder("log");
    engine.register_observer(observer).expect("register");

    engine.clear();

    assert!(engine.visible_range().is_none());
    assert!(engine.quick_ranges().is_empty());
    assert_eq!(log.borrow().last(), Some(&TimelineEvent::VisibleRangeCleared));
}

#[test]
fn raw_records_report_skips() {
    let mut engine = TimelineEngine::new(TimelineEngineConfig::default().with_reference_year(2025))
        .expect("engine init");
    let records = vec![
        RawTransaction::new("2024-02-01", "-20", "EXPENSES", Some("Food")),
        RawTransaction::new("garbage", "-20", "EXPENSES", Some("Food")),
        RawTransaction::new("2024-03-01", "n/a", "EXPENSES", Some("Food")),
    ];

    let skipped = engine.set_raw_transactions(&records);

    assert_eq!(skipped, 2);
    assert_eq!(engine.skipped_records(), 2);
    assert_eq!(engine.transactions().len(), 1);
    assert!(engine.visible_range().is_some());
}

#[test]
fn aggregation_is_memoized_per_granularity() {
    let mut engine = build_engine();

    let _ = engine.buckets();
    let _ = engine.buckets();
    assert_eq!(engine.aggregation_cache_stats().hits, 1);
    assert_eq!(engine.aggregation_cache_stats().misses, 1);

    engine.zoom_out();
    let _ = engine.buckets();
    assert_eq!(engine.aggregation_cache_stats().misses, 2);

    engine.set_transactions(seed_transactions());
    let _ = engine.buckets();
    assert_eq!(engine.aggregation_cache_stats().misses, 3);
}

#[test]
fn observers_are_unique_by_id() {
    let mut engine = build_engine();
    let (first, _) = recorder("chart");
    let (second, _) = recorder("chart");

    engine.register_observer(first).expect("register");
    let duplicate = engine.register_observer(second);
    assert!(matches!(duplicate, Err(TimelineError::DuplicateObserver(id)) if id == "chart"));

    assert!(engine.has_observer("chart"));
    assert!(engine.unregister_observer("chart"));
    assert!(!engine.unregister_observer("chart"));
    assert_eq!(engine.observer_count(), 0);
}

#[test]
fn snapshot_serializes_current_state() {
    let mut engine = build_engine();
    engine.zoom_in();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.granularity, Granularity::Month);
    assert_eq!(snapshot.visible_buckets.len(), 8);
    assert_eq!(snapshot.transactions_len, 48);
    assert!(snapshot.thumb.is_some());

    let json = engine.snapshot_json_pretty().expect("json");
    assert!(json.contains("\"granularity\": \"Month\""));
    assert!(json.contains("2024-2025"));
}

#[test]
fn visible_series_matches_visible_buckets() {
    let mut engine = build_engine();
    engine.zoom_in();

    let series = engine.visible_series().expect("series");
    assert_eq!(series.len(), 8);
    assert!(series.iter().all(|point| point.income == 1_000.0 && point.expenses == 400.0));
}
