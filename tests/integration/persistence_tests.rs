/// Habits written through the controller survive reopening the store
use habit_tracker::*;

use chrono::{Duration, Local};
use tempfile::TempDir;

fn assert_round_trip(kind: StoreKind) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let now = Local::now();

    {
        let store = open_store(kind, dir.path()).unwrap();
        let mut controller = Controller::with_clock(store, FixedClock(now));
        controller.handle("piano", "weekly").unwrap();
        controller.handle("surfing", "daily").unwrap();
    }

    let reopened = open_store(kind, dir.path()).unwrap();
    let piano = reopened.get("piano").unwrap().expect("piano was persisted");
    assert_eq!(piano.name(), "piano");
    assert_eq!(piano.streak, 0);
    assert_eq!(piano.frequency(), Frequency::Weekly);
    assert!(same_day(&piano.due_date, &(now + Duration::weeks(1))));

    assert_eq!(reopened.list_all().unwrap().len(), 2);
}

#[test]
fn test_file_store_round_trip() {
    assert_round_trip(StoreKind::File);
}

#[test]
fn test_sqlite_store_round_trip() {
    assert_round_trip(StoreKind::Db);
}

#[test]
fn test_streak_survives_reopen() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("habits.db");
    let today = Local::now();

    {
        let mut store = SqliteStore::open(&path).unwrap();
        store
            .create(&Habit::from_existing("piano", 9, today, Frequency::Daily))
            .unwrap();
    }

    let mut controller = Controller::with_clock(SqliteStore::open(&path).unwrap(), FixedClock(today));
    let habit = controller.handle("piano", "daily").unwrap();
    assert_eq!(habit.streak, 10);

    let reopened = SqliteStore::open(&path).unwrap();
    assert_eq!(reopened.get("piano").unwrap().unwrap().streak, 10);
}

#[test]
fn test_file_snapshot_is_json_map() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("habits.json");

    let mut controller = Controller::new(FileStore::open(&path).unwrap());
    controller.handle("piano", "daily").unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let record = &value["piano"];
    assert_eq!(record["name"], "piano");
    assert_eq!(record["streak"], 0);
    assert_eq!(record["frequency"], 86_400_000_000_000_i64);
    assert!(record["dueDate"].is_string());
    assert!(record["message"].as_str().unwrap().contains("piano"));
}

#[test]
fn test_empty_stores_list_nothing() {
    for kind in [StoreKind::File, StoreKind::Db, StoreKind::Memory] {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let controller = Controller::new(open_store(kind, dir.path()).unwrap());
        assert!(controller.list_all().unwrap().is_empty());
        assert_eq!(controller.summary().unwrap(), NO_HABITS_MESSAGE);
    }
}
