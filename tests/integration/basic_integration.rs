/// Basic integration tests
use habit_tracker::*;
use tempfile::TempDir;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;
    use chrono::{Duration, Local, TimeZone};

    /// Walk one habit through new, streak, repeat and broken on any backend
    fn exercise_store(store: BoxedStore) {
        let start = Local.with_ymd_and_hms(2024, 1, 8, 9, 30, 0).unwrap();

        let mut controller = Controller::with_clock(store, FixedClock(start));
        let habit = controller.handle("piano", "daily").unwrap();
        assert_eq!(habit.streak, 0);

        let mut controller =
            Controller::with_clock(controller.into_store(), FixedClock(start + Duration::days(1)));
        assert_eq!(controller.handle("piano", "daily").unwrap().streak, 1);
        assert_eq!(controller.handle("piano", "daily").unwrap().streak, 1);

        let mut controller =
            Controller::with_clock(controller.into_store(), FixedClock(start + Duration::days(6)));
        let broken = controller.handle("piano", "daily").unwrap();
        assert_eq!(broken.streak, 0);
        assert!(broken.message().contains("4 days ago"));

        let habits = controller.list_all().unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].streak, 0);
    }

    #[test]
    fn test_memory_workflow() {
        exercise_store(open_store(StoreKind::Memory, std::path::Path::new("")).unwrap());
    }

    #[test]
    fn test_file_workflow() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        exercise_store(open_store(StoreKind::File, dir.path()).unwrap());
    }

    #[test]
    fn test_sqlite_workflow() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        exercise_store(open_store(StoreKind::Db, dir.path()).unwrap());
    }

    #[test]
    fn test_store_factory_file_names() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        open_store(StoreKind::Db, dir.path()).unwrap();
        open_store(StoreKind::File, dir.path()).unwrap();

        assert!(dir.path().join(".habitTracker.db").exists());
        assert!(dir.path().join(".habitTracker").exists());
    }
}
