use chrono::{NaiveDate, NaiveDateTime};
use cleandar_core::db::open_db_in_memory;
use cleandar_core::{
    DateKey, DayEdit, DayRecord, FixedClock, JournalService, JsonFileSnapshotRepository,
    PersistCause, RepoError, RepoResult, Snapshot, SnapshotRepository, SqliteSnapshotRepository, TagColor,
    TaskTab,
};
use std::cell::{Cell, RefCell};

fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

fn noon(date: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// In-memory repository whose saves can be switched to fail.
#[derive(Default)]
struct FlakyRepo {
    saved: RefCell<Snapshot>,
    fail_saves: Cell<bool>,
    save_calls: Cell<u32>,
}

impl SnapshotRepository for &FlakyRepo {
    fn load(&self) -> RepoResult<Snapshot> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> RepoResult<()> {
        self.save_calls.set(self.save_calls.get() + 1);
        if self.fail_saves.get() {
            return Err(RepoError::InvalidData("storage unavailable".to_string()));
        }
        *self.saved.borrow_mut() = snapshot.clone();
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "flaky"
    }
}

#[test]
fn mutations_are_mirrored_and_rehydrated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cleandar.json");
    let date = key("2024-03-05");

    {
        let (mut journal, load_error) = JournalService::open(
            JsonFileSnapshotRepository::new(&path),
            FixedClock::new(noon("2024-03-02")),
        );
        assert!(load_error.is_none());
        journal
            .upsert(DayRecord::new(date).with_color(TagColor::Pink).with_note("pay bills"))
            .unwrap();
        journal.toggle_completion(&date).unwrap();
    }

    let (reopened, load_error) = JournalService::open(
        JsonFileSnapshotRepository::new(&path),
        FixedClock::new(noon("2024-03-03")),
    );
    assert!(load_error.is_none());
    let record = reopened.get(&date).unwrap();
    assert!(record.is_completed());
    assert_eq!(record.completed_at(), Some(noon("2024-03-02")));
    assert_eq!(record.color, Some(TagColor::Pink));
}

#[test]
fn sqlite_backed_journal_serves_views() {
    let conn = open_db_in_memory().unwrap();
    let (mut journal, _) = JournalService::open(
        SqliteSnapshotRepository::new(&conn),
        FixedClock::new(noon("2024-03-03")),
    );

    journal
        .upsert(DayRecord::new(key("2024-03-01")).with_color(TagColor::Red))
        .unwrap();
    journal
        .upsert(DayRecord::new(key("2024-03-05")).with_note("pay bills"))
        .unwrap();
    journal
        .upsert(DayRecord::new(key("2024-03-04")).with_note("dentist"))
        .unwrap();
    journal.toggle_completion(&key("2024-03-05")).unwrap();

    let today = journal.today();
    assert_eq!(today, key("2024-03-03"));

    let pending = journal.tasks(&today, TaskTab::Pending, "");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].date, key("2024-03-04"));

    let completed = journal.tasks(&today, TaskTab::Completed, "BILLS");
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].date, key("2024-03-05"));

    assert_eq!(journal.search("2024-03").len(), 3);

    let grid = journal.year_grid(2024).unwrap();
    assert!(grid.slot(3, 1).unwrap().is_marked());

    let stored = SqliteSnapshotRepository::new(&conn).load().unwrap();
    assert_eq!(stored, journal.snapshot());
}

#[test]
fn failed_save_keeps_mutation_and_flush_retries() {
    let repo = FlakyRepo::default();
    let (mut journal, _) = JournalService::open(&repo, FixedClock::new(noon("2024-03-02")));
    let date = key("2024-01-10");

    repo.fail_saves.set(true);
    let err = journal
        .upsert(DayRecord::new(date).with_note("call mom"))
        .unwrap_err();
    assert_eq!(err.operation, "upsert");
    assert!(err.to_string().contains("not saved"));
    assert!(journal.has_unsaved_changes());
    assert_eq!(journal.get(&date).unwrap().note.as_deref(), Some("call mom"));
    assert!(repo.saved.borrow().is_empty());

    repo.fail_saves.set(false);
    journal.flush().unwrap();
    assert!(!journal.has_unsaved_changes());
    assert_eq!(*repo.saved.borrow(), journal.snapshot());
}

#[test]
fn noop_intents_do_not_touch_storage() {
    let repo = FlakyRepo::default();
    let (mut journal, _) = JournalService::open(&repo, FixedClock::new(noon("2024-03-02")));

    journal.remove(&key("2024-01-01")).unwrap();
    journal.toggle_completion(&key("2024-01-01")).unwrap();
    journal.flush().unwrap();

    assert_eq!(repo.save_calls.get(), 0);
}

#[test]
fn edit_day_replaces_trims_and_clears() {
    let repo = FlakyRepo::default();
    let (mut journal, _) = JournalService::open(&repo, FixedClock::new(noon("2024-03-02")));
    let date = key("2024-01-10");

    let saved = journal
        .edit_day(date, Some(TagColor::Blue), "  call mom  ")
        .unwrap();
    assert_eq!(saved, DayEdit::Saved);
    journal.toggle_completion(&date).unwrap();

    journal.edit_day(date, None, "call dad").unwrap();
    let record = journal.get(&date).unwrap();
    assert_eq!(record.color, None);
    assert_eq!(record.note.as_deref(), Some("call dad"));
    assert!(!record.is_completed());

    assert_eq!(journal.edit_day(date, None, "   ").unwrap(), DayEdit::Cleared);
    assert!(journal.get(&date).is_none());
    assert_eq!(journal.edit_day(date, None, "").unwrap(), DayEdit::Unchanged);
    assert!(repo.saved.borrow().is_empty());
}

#[test]
fn unreadable_state_opens_empty_and_is_never_overwritten_implicitly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cleandar.json");
    std::fs::write(&path, "{ not json").unwrap();
    let date = key("2024-03-05");

    let (mut journal, load_error) = JournalService::open(
        JsonFileSnapshotRepository::new(&path),
        FixedClock::new(noon("2024-03-02")),
    );
    assert!(matches!(load_error, Some(RepoError::Codec(_))));
    assert!(journal.is_storage_unreadable());
    assert!(journal.snapshot().is_empty());

    let err = journal
        .upsert(DayRecord::new(date).with_note("pay bills"))
        .unwrap_err();
    assert!(matches!(err.cause, PersistCause::StorageUnreadable));
    let err = journal.flush().unwrap_err();
    assert!(matches!(err.cause, PersistCause::StorageUnreadable));

    assert_eq!(journal.get(&date).unwrap().note.as_deref(), Some("pay bills"));
    assert_eq!(journal.search("bills").len(), 1);
    assert!(journal.has_unsaved_changes());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");

    journal.reset_storage().unwrap();
    assert!(!journal.is_storage_unreadable());
    assert!(!journal.has_unsaved_changes());

    let (reopened, load_error) = JournalService::open(
        JsonFileSnapshotRepository::new(&path),
        FixedClock::new(noon("2024-03-02")),
    );
    assert!(load_error.is_none());
    assert_eq!(reopened.snapshot(), journal.snapshot());
}

#[test]
fn unreadable_records_field_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cleandar.json");
    std::fs::write(&path, r#"{ "records": 5 }"#).unwrap();

    let (journal, load_error) = JournalService::open(
        JsonFileSnapshotRepository::new(&path),
        FixedClock::new(noon("2024-03-02")),
    );
    assert!(load_error.is_some());
    assert_eq!(journal.today(), key("2024-03-02"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        r#"{ "records": 5 }"#
    );
}
