/// Habit entity and its streak state machine
///
/// This module defines the Habit record a user is tracking and the rule that
/// decides, on every touch, whether its streak continues, repeats or resets.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{same_day, DomainError, Frequency, Transition};

/// A habit represents something the user wants to do regularly
///
/// The name is the key of the record and never changes after creation, and
/// neither does the frequency. The message always describes the most recent
/// transition and can only be changed by touching the habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    name: String,
    /// Consecutive on-time completions
    pub streak: u32,
    /// Day by which the habit must be repeated to keep the streak
    pub due_date: DateTime<Local>,
    frequency: Frequency,
    #[serde(default)]
    message: String,
}

impl Habit {
    /// Create a new habit, first due one period after `now`
    pub fn new(
        name: impl Into<String>,
        frequency: Frequency,
        now: DateTime<Local>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        Self::validate_name(&name)?;

        let message = Transition::New.message(&name, 0, frequency);
        Ok(Self {
            name,
            streak: 0,
            due_date: now + frequency.duration(),
            frequency,
            message,
        })
    }

    /// Create a habit from existing data (used when loading from a store)
    ///
    /// The message is left empty; it is rendered again on the next touch.
    pub fn from_existing(
        name: impl Into<String>,
        streak: u32,
        due_date: DateTime<Local>,
        frequency: Frequency,
    ) -> Self {
        Self {
            name: name.into(),
            streak,
            due_date,
            frequency,
            message: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Message rendered by the last transition
    pub fn message(&self) -> &str {
        &self.message
    }

    /// A habit without a usable name cannot be stored
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// Record that the habit was done at `now`
    ///
    /// Calendar days decide the outcome, so the time of day of the due date
    /// never matters:
    /// - due today: the streak goes up and the habit is due again in one period
    /// - due on a later day: it was already done this period, nothing changes
    /// - due on an earlier day: the streak resets and the habit is due in one period
    pub fn touch(&mut self, now: DateTime<Local>) -> Transition {
        let period = self.frequency.duration();

        let transition = if same_day(&self.due_date, &now) {
            self.streak = self.streak.saturating_add(1);
            self.due_date = now + period;
            Transition::Streak
        } else if same_day(&self.due_date, &(now + period))
            || self.due_date.date_naive() > now.date_naive()
        {
            Transition::Repeat
        } else {
            let elapsed = now.signed_duration_since(self.due_date);
            let periods_missed = (elapsed.num_seconds() / period.num_seconds()).max(0);
            self.streak = 0;
            self.due_date = now + period;
            Transition::Broken { periods_missed }
        };

        self.message = transition.message(&self.name, self.streak, self.frequency);
        transition
    }

    /// One-line status used when listing habits
    pub fn summary_line(&self) -> String {
        format!(
            "You're currently on a {}-{} streak for '{}'. Stick to it!",
            self.streak,
            self.frequency.unit_singular(),
            self.name
        )
    }

    /// Validate habit name according to business rules
    pub fn validate_name(name: &str) -> Result<(), DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::InvalidHabitName(
                "input name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Habit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
