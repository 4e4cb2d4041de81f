/// Controller that runs the habit state machine against a store
///
/// The controller is the only place that reads a habit, decides its
/// transition and writes it back. Frontends call `handle` and `summary`.

use crate::domain::{Clock, Frequency, Habit, SystemClock, Transition};
use crate::storage::HabitStore;
use crate::TrackerError;

/// Shown by `summary` when the store holds no habits
pub const NO_HABITS_MESSAGE: &str = "No habits have been started yet.";

/// Applies habit transitions and persists them through a store
pub struct Controller<S> {
    store: S,
    clock: Box<dyn Clock>,
}

impl<S: HabitStore> Controller<S> {
    /// Create a controller that reads the system clock
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }

    /// Create a controller with a custom time source
    pub fn with_clock(store: S, clock: impl Clock + 'static) -> Self {
        Self {
            store,
            clock: Box::new(clock),
        }
    }

    /// Log one completion of the habit called `name`
    ///
    /// A habit seen for the first time is created with the given frequency
    /// token. For a known habit the token is ignored, since a habit keeps the
    /// frequency it was created with.
    pub fn handle(&mut self, name: &str, frequency: &str) -> Result<Habit, TrackerError> {
        Habit::validate_name(name)?;
        let now = self.clock.now();

        match self.store.get(name)? {
            None => {
                let frequency: Frequency = frequency.parse()?;
                let habit = Habit::new(name, frequency, now)?;
                self.store.create(&habit)?;

                tracing::debug!(
                    "Habit '{}' transition: {}",
                    habit.name(),
                    Transition::New.label()
                );
                Ok(habit)
            }
            Some(mut habit) => {
                let transition = habit.touch(now);
                self.store.update(&habit)?;

                tracing::debug!(
                    "Habit '{}' transition: {} (streak {})",
                    habit.name(),
                    transition.label(),
                    habit.streak
                );
                Ok(habit)
            }
        }
    }

    /// Every habit in the store
    pub fn list_all(&self) -> Result<Vec<Habit>, TrackerError> {
        Ok(self.store.list_all()?)
    }

    /// One status line per habit, or a notice when there are none
    ///
    /// Lines are sorted by habit name so output is stable across backends.
    pub fn summary(&self) -> Result<String, TrackerError> {
        let mut habits = self.list_all()?;
        if habits.is_empty() {
            return Ok(NO_HABITS_MESSAGE.to_string());
        }

        habits.sort_by(|a, b| a.name().cmp(b.name()));
        let lines: Vec<String> = habits.iter().map(Habit::summary_line).collect();
        Ok(lines.join("\n"))
    }

    /// Get a reference to the store (useful for testing)
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
