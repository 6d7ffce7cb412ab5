use chrono::{Duration, NaiveDate, NaiveDateTime};
use cleandar_core::{Completion, DateKey, DayRecord, FixedClock, RecordStore, TagColor};

fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

fn at(date: &str, hour: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

fn store() -> RecordStore<FixedClock> {
    RecordStore::with_clock(FixedClock::new(at("2024-03-02", 10)))
}

#[test]
fn upsert_then_get_returns_the_record() {
    let mut store = store();
    let record = DayRecord::new(key("2024-01-10"))
        .with_color(TagColor::Blue)
        .with_note("call mom");

    store.upsert(record.clone());

    assert_eq!(store.get(&key("2024-01-10")), Some(&record));
    assert_eq!(store.len(), 1);
}

#[test]
fn upsert_replaces_the_whole_record() {
    let mut store = store();
    store.upsert(
        DayRecord::new(key("2024-01-10"))
            .with_color(TagColor::Blue)
            .with_note("call mom"),
    );
    store.upsert(DayRecord::new(key("2024-01-10")).with_note("call dad"));

    let loaded = store.get(&key("2024-01-10")).unwrap();
    assert_eq!(loaded.color, None);
    assert_eq!(loaded.note.as_deref(), Some("call dad"));
    assert_eq!(store.len(), 1);
}

#[test]
fn upsert_keeps_blank_records() {
    let mut store = store();
    store.upsert(DayRecord::new(key("2024-05-01")));

    let loaded = store.get(&key("2024-05-01")).unwrap();
    assert!(loaded.is_blank());
}

#[test]
fn remove_deletes_and_is_idempotent() {
    let mut store = store();
    store.upsert(DayRecord::new(key("2024-01-10")).with_note("x"));

    assert!(store.remove(&key("2024-01-10")).is_some());
    assert_eq!(store.get(&key("2024-01-10")), None);

    let before = store.snapshot();
    assert!(store.remove(&key("2024-01-10")).is_none());
    assert_eq!(store.snapshot(), before);
}

#[test]
fn toggle_sets_and_clears_completed_at() {
    let mut store = store();
    let date = key("2024-03-05");
    store.upsert(
        DayRecord::new(date)
            .with_color(TagColor::Red)
            .with_note("pay bills"),
    );

    let toggled = store.toggle_completion(&date).unwrap().clone();
    assert!(toggled.is_completed());
    assert_eq!(toggled.completed_at(), Some(at("2024-03-02", 10)));
    assert_eq!(toggled.color, Some(TagColor::Red));
    assert_eq!(toggled.note.as_deref(), Some("pay bills"));

    let reverted = store.toggle_completion(&date).unwrap().clone();
    assert!(!reverted.is_completed());
    assert_eq!(reverted.completed_at(), None);
    assert_eq!(reverted.completion, Completion::Pending);
}

#[test]
fn double_toggle_restores_completed_flag_with_fresh_timestamp() {
    let mut store = store();
    let date = key("2024-03-05");
    store.upsert(DayRecord::new(date).with_completion(Completion::Completed {
        at: at("2024-03-01", 8),
    }));

    store.toggle_completion(&date);
    store.clock().advance(Duration::hours(3));
    store.toggle_completion(&date);

    let record = store.get(&date).unwrap();
    assert!(record.is_completed());
    assert_eq!(record.completed_at(), Some(at("2024-03-02", 13)));
}

#[test]
fn toggle_on_absent_date_is_a_noop() {
    let mut store = store();
    store.upsert(DayRecord::new(key("2024-01-01")).with_note("new year"));
    let before = store.snapshot();

    assert!(store.toggle_completion(&key("2024-01-02")).is_none());
    assert_eq!(store.snapshot(), before);
    assert_eq!(store.get(&key("2024-01-02")), None);
}

#[test]
fn snapshots_are_unaffected_by_later_mutations() {
    let mut store = store();
    let date = key("2024-03-05");
    store.upsert(DayRecord::new(date).with_note("pay bills"));

    let before = store.snapshot();
    store.toggle_completion(&date);
    store.upsert(DayRecord::new(key("2024-03-06")).with_note("rest"));

    assert_eq!(before.len(), 1);
    assert!(!before.get(&date).unwrap().is_completed());
    assert!(store.get(&date).unwrap().is_completed());
    assert_eq!(store.len(), 2);
}

#[test]
fn independent_stores_do_not_share_state() {
    let mut first = store();
    let second = store();
    first.upsert(DayRecord::new(key("2024-01-10")).with_note("only here"));

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn snapshot_iterates_in_date_order() {
    let mut store = store();
    for date in ["2024-12-01", "2023-06-15", "2024-01-31"] {
        store.upsert(DayRecord::new(key(date)).with_note(date));
    }

    let dates = store
        .snapshot()
        .dates()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(dates, ["2023-06-15", "2024-01-31", "2024-12-01"]);
}
