/// In-memory implementation of the habit storage interface

use std::collections::HashMap;

use crate::domain::Habit;
use crate::storage::{ensure_not_blank, HabitStore, StorageError};

/// Habits held in a name-keyed map for the lifetime of the process
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    habits: HashMap<String, Habit>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing set of habits
    pub fn with_habits(habits: impl IntoIterator<Item = Habit>) -> Self {
        let habits = habits
            .into_iter()
            .map(|h| (h.name().to_string(), h))
            .collect();
        Self { habits }
    }

    pub fn len(&self) -> usize {
        self.habits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.habits.is_empty()
    }
}

impl HabitStore for MemoryStore {
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
        tracing::debug!("Created habit in memory: {}", habit.name());
        Ok(())
    }

    fn update(&mut self, habit: &Habit) -> Result<(), StorageError> {
        ensure_not_blank(habit)?;
        match self.habits.get_mut(habit.name()) {
            Some(stored) => {
                *stored = habit.clone();
                tracing::debug!("Updated habit in memory: {}", habit.name());
                Ok(())
            }
            None => Err(StorageError::NotFound {
                name: habit.name().to_string(),
            }),
        }
    }

    fn list_all(&self) -> Result<Vec<Habit>, StorageError> {
        Ok(self.habits.values().cloned().collect())
    }
}
