/// SQLite implementation of the habit storage interface
///
/// Each habit is one row of the `habit` table. Due dates are stored as text
/// with second precision and a numeric UTC offset.

use std::path::Path;

use chrono::{DateTime, Local};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};

use crate::domain::{Frequency, Habit};
use crate::storage::{ensure_not_blank, migrations, HabitStore, StorageError};

/// Format of the `duedate` column
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// Raw `(name, streak, frequency, duedate)` columns
type HabitRow = (String, i64, i64, String);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HabitRow> {
    Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

/// SQLite-based storage implementation
///
/// Holds one connection for the lifetime of the store.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref();
        if db_path.as_os_str().is_empty() {
            return Err(StorageError::InvalidLocation(
                "empty dbSource string".to_string(),
            ));
        }

        let conn = Connection::open(db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);
        Ok(Self { conn })
    }

    /// Create a store backed by a private in-memory database
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;
        migrations::initialize_database(&conn)?;
        Ok(Self { conn })
    }

    fn format_due_date(due_date: &DateTime<Local>) -> String {
        due_date.format(DUE_DATE_FORMAT).to_string()
    }

    /// Turn one selected row back into a habit
    fn habit_from_row(
        name: String,
        streak: i64,
        frequency: i64,
        due_date: String,
    ) -> Result<Habit, StorageError> {
        let corrupt = |reason: String| StorageError::Corrupt {
            name: name.clone(),
            reason,
        };

        let streak = u32::try_from(streak).map_err(|e| corrupt(format!("streak: {}", e)))?;
        let frequency =
            Frequency::from_nanos(frequency).map_err(|e| corrupt(e.to_string()))?;
        let due_date = DateTime::parse_from_str(&due_date, DUE_DATE_FORMAT)
            .map_err(|e| corrupt(format!("duedate '{}': {}", due_date, e)))?
            .with_timezone(&Local);

        Ok(Habit::from_existing(name, streak, due_date, frequency))
    }
}

impl HabitStore for SqliteStore {
    fn get(&self, name: &str) -> Result<Option<Habit>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, streak, frequency, duedate FROM habit WHERE name = ?1",
        )?;

        let row = stmt.query_row(params![name], read_row).optional()?;

        match row {
            Some((name, streak, frequency, due_date)) => {
                Self::habit_from_row(name, streak, frequency, due_date).map(Some)
            }
            None => Ok(None),
        }
    }

    fn create(&mut self, habit: &Habit) -> Result<(), StorageError> {
        ensure_not_blank(habit)?;

        let result = self.conn.execute(
            "INSERT INTO habit (name, streak, frequency, duedate) VALUES (?1, ?2, ?3, ?4)",
            params![
                habit.name(),
                habit.streak,
                habit.frequency().as_nanos(),
                Self::format_due_date(&habit.due_date),
            ],
        );

        match result {
            Ok(_) => {
                tracing::debug!("Created habit: {}", habit.name());
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StorageError::AlreadyExists {
                    name: habit.name().to_string(),
                })
            }
            Err(e) => Err(StorageError::Query(e)),
        }
    }

    fn update(&mut self, habit: &Habit) -> Result<(), StorageError> {
        ensure_not_blank(habit)?;

        let rows_affected = self.conn.execute(
            "UPDATE habit SET streak = ?1, frequency = ?2, duedate = ?3 WHERE name = ?4",
            params![
                habit.streak,
                habit.frequency().as_nanos(),
                Self::format_due_date(&habit.due_date),
                habit.name(),
            ],
        )?;

        if rows_affected == 0 {
            return Err(StorageError::NotFound {
                name: habit.name().to_string(),
            });
        }

        tracing::debug!("Updated habit: {}", habit.name());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Habit>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, streak, frequency, duedate FROM habit")?;

        let rows = stmt.query_map([], read_row)?;

        let mut habits = Vec::new();
        for row in rows {
            let (name, streak, frequency, due_date) = row?;
            habits.push(Self::habit_from_row(name, streak, frequency, due_date)?);
        }

        Ok(habits)
    }
}
