/// JSON-file implementation of the habit storage interface
///
/// The whole name-keyed map is kept in memory and written back as a single
/// JSON document after every create or update. The file is truncated and
/// rewritten each time, which is fine for the handful of habits one person keeps.

use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::domain::Habit;
use crate::storage::{ensure_not_blank, HabitStore, StorageError};

/// Habits cached from, and written through to, one JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    habits: HashMap<String, Habit>,
}

impl FileStore {
    /// Open the snapshot at `path`, creating an empty file if needed
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StorageError::InvalidLocation(
                "empty filename".to_string(),
            ));
        }

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let habits = if contents.trim().is_empty() {
            HashMap::new()
        } else {
            serde_json::from_str(&contents)?
        };

        tracing::info!("File store opened at: {:?}", path);
        Ok(Self {
            path: path.to_path_buf(),
            habits,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replace the file contents with the current map
    fn flush(&self) -> Result<(), StorageError> {
        let data = serde_json::to_string_pretty(&self.habits)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

impl HabitStore for FileStore {
    fn get(&self, name: &str) -> Result<Option<Habit>, StorageError> {
        Ok(self.habits.get(name).cloned())
    }

    fn create(&mut self, habit: &Habit) -> Result<(), StorageError> {
        ensure_not_blank(habit)?;
        if self.habits.contains_key(habit.name()) {
            return Err(StorageError::AlreadyExists {
                name: habit.name().to_string(),
            });
        }

        self.habits.insert(habit.name().to_string(), habit.clone());
        if let Err(e) = self.flush() {
            // keep the cache in step with what is on disk
            self.habits.remove(habit.name());
            return Err(e);
        }

        tracing::debug!("Created habit in {:?}: {}", self.path, habit.name());
        Ok(())
    }

    fn update(&mut self, habit: &Habit) -> Result<(), StorageError> {
        ensure_not_blank(habit)?;
        let Some(stored) = self.habits.get_mut(habit.name()) else {
            return Err(StorageError::NotFound {
                name: habit.name().to_string(),
            });
        };

        let previous = std::mem::replace(stored, habit.clone());
        if let Err(e) = self.flush() {
            self.habits.insert(habit.name().to_string(), previous);
            return Err(e);
        }

        tracing::debug!("Updated habit in {:?}: {}", self.path, habit.name());
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Habit>, StorageError> {
        Ok(self.habits.values().cloned().collect())
    }
}
