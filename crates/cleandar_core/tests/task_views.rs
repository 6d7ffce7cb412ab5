use chrono::NaiveDate;
use cleandar_core::{
    partition_tasks, search_records, Completion, DateKey, DayRecord, Snapshot, TagColor, TaskTab,
};

fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

fn dates(records: &[&DayRecord]) -> Vec<String> {
    records.iter().map(|record| record.date.to_string()).collect()
}

/// `2024-03-01` red tag, `2024-03-05` "pay bills" completed on 03-02.
fn sample_snapshot() -> Snapshot {
    let completed_at = NaiveDate::from_ymd_opt(2024, 3, 2)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    [
        DayRecord::new(key("2024-03-01")).with_color(TagColor::Red),
        DayRecord::new(key("2024-03-05"))
            .with_note("pay bills")
            .with_completion(Completion::Completed { at: completed_at }),
    ]
    .into_iter()
    .collect()
}

#[test]
fn past_uncompleted_and_completed_records_are_not_pending() {
    let snapshot = sample_snapshot();
    let pending = partition_tasks(&snapshot, &key("2024-03-03"), TaskTab::Pending, "");
    assert!(pending.is_empty());
}

#[test]
fn completed_tab_ignores_dates() {
    let snapshot = sample_snapshot();
    let completed = partition_tasks(&snapshot, &key("2030-01-01"), TaskTab::Completed, "");
    assert_eq!(dates(&completed), ["2024-03-05"]);
}

#[test]
fn pending_includes_today_and_later_in_date_order() {
    let snapshot: Snapshot = [
        DayRecord::new(key("2024-03-10")).with_note("later"),
        DayRecord::new(key("2024-03-02")).with_note("yesterday"),
        DayRecord::new(key("2024-03-03")).with_note("today"),
        DayRecord::new(key("2024-03-04")).with_color(TagColor::Green),
    ]
    .into_iter()
    .collect();

    let pending = partition_tasks(&snapshot, &key("2024-03-03"), TaskTab::Pending, "");
    assert_eq!(dates(&pending), ["2024-03-03", "2024-03-04", "2024-03-10"]);
}

#[test]
fn search_matches_note_case_insensitively() {
    let snapshot = sample_snapshot();

    for query in ["bills", "BILLS", "Pay Bi", " bills"] {
        let hits = search_records(&snapshot, query);
        assert_eq!(dates(&hits), ["2024-03-05"], "query `{query}`");
    }

    let completed = partition_tasks(&snapshot, &key("2024-03-03"), TaskTab::Completed, "BILLS");
    assert_eq!(dates(&completed), ["2024-03-05"]);

    let pending = partition_tasks(&snapshot, &key("2024-01-01"), TaskTab::Pending, "bills");
    assert!(pending.is_empty());
}

#[test]
fn search_matches_date_key_substring() {
    let snapshot = sample_snapshot();

    assert_eq!(dates(&search_records(&snapshot, "03-01")), ["2024-03-01"]);
    assert_eq!(
        dates(&search_records(&snapshot, "2024-03")),
        ["2024-03-01", "2024-03-05"]
    );
    assert!(search_records(&snapshot, "2023").is_empty());
}

#[test]
fn empty_query_matches_everything() {
    let snapshot = sample_snapshot();
    assert_eq!(search_records(&snapshot, "").len(), 2);

    let pending = partition_tasks(&snapshot, &key("2024-02-01"), TaskTab::Pending, "");
    assert_eq!(dates(&pending), ["2024-03-01"]);
}

#[test]
fn whitespace_is_part_of_the_query() {
    let snapshot = sample_snapshot();

    assert_eq!(dates(&search_records(&snapshot, " ")), ["2024-03-05"]);
    assert!(search_records(&snapshot, "  bills").is_empty());
    assert!(search_records(&snapshot, "bills ").is_empty());

    let completed = partition_tasks(&snapshot, &key("2024-03-03"), TaskTab::Completed, "   ");
    assert!(completed.is_empty());
}
