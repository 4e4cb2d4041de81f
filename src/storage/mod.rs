/// Storage layer for persisting habits
///
/// Every backend implements the same four-operation HabitStore contract, so the
/// controller runs unchanged against memory, a JSON file, or SQLite.

pub mod file;
pub mod memory;
pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use file::*;
pub use memory::*;
pub use sqlite::*;

use std::path::Path;

use clap::ValueEnum;
use thiserror::Error;

use crate::domain::Habit;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("habit cannot be nil")]
    NilHabit,

    #[error("habit already exists: {name}")]
    AlreadyExists { name: String },

    #[error("cannot update habit, it does not exist: {name}")]
    NotFound { name: String },

    #[error("Invalid store location: {0}")]
    InvalidLocation(String),

    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Corrupt record for habit '{name}': {reason}")]
    Corrupt { name: String, reason: String },
}

/// Trait defining the storage interface for habits
///
/// `get` reports a missing habit as `Ok(None)`; an `Err` always means the
/// backend itself failed. Writes take `&mut self`: stores do no locking of
/// their own, so sharing one between threads is the caller's job.
pub trait HabitStore {
    /// Get a habit by name
    fn get(&self, name: &str) -> Result<Option<Habit>, StorageError>;

    /// Insert a habit whose name is not yet stored
    fn create(&mut self, habit: &Habit) -> Result<(), StorageError>;

    /// Replace a habit that is already stored
    fn update(&mut self, habit: &Habit) -> Result<(), StorageError>;

    /// Every stored habit, in no particular order
    fn list_all(&self) -> Result<Vec<Habit>, StorageError>;
}

impl<S: HabitStore + ?Sized> HabitStore for Box<S> {
    fn get(&self, name: &str) -> Result<Option<Habit>, StorageError> {
        (**self).get(name)
    }

    fn create(&mut self, habit: &Habit) -> Result<(), StorageError> {
        (**self).create(habit)
    }

    fn update(&mut self, habit: &Habit) -> Result<(), StorageError> {
        (**self).update(habit)
    }

    fn list_all(&self) -> Result<Vec<Habit>, StorageError> {
        (**self).list_all()
    }
}

/// Which backend to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    /// SQLite database
    Db,
    /// JSON snapshot file
    File,
    /// Process memory, lost on exit
    Memory,
}

impl StoreKind {
    /// File name used inside the store directory
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            StoreKind::Db => Some(".habitTracker.db"),
            StoreKind::File => Some(".habitTracker"),
            StoreKind::Memory => None,
        }
    }
}

/// A store that can be moved to another thread
pub type BoxedStore = Box<dyn HabitStore + Send>;

/// Open the chosen backend inside `dir`
pub fn open_store(kind: StoreKind, dir: &Path) -> Result<BoxedStore, StorageError> {
    let path = kind.file_name().map(|name| dir.join(name));
    tracing::debug!("Opening {:?} store at {:?}", kind, path);

    let store: BoxedStore = match (kind, path) {
        (StoreKind::Db, Some(path)) => Box::new(SqliteStore::open(path)?),
        (StoreKind::File, Some(path)) => Box::new(FileStore::open(path)?),
        _ => Box::new(MemoryStore::new()),
    };
    Ok(store)
}

/// Reject a habit that cannot be keyed
pub(crate) fn ensure_not_blank(habit: &Habit) -> Result<(), StorageError> {
    if habit.is_blank() {
        return Err(StorageError::NilHabit);
    }
    Ok(())
}
