/// Transition outcomes and the messages rendered for them
///
/// Every touch of a habit produces exactly one Transition. The message for a
/// transition depends only on the habit's name, streak and frequency, plus the
/// number of missed periods when the streak was broken.

use serde::{Deserialize, Serialize};

use crate::domain::Frequency;

/// Outcome of a single touch of a habit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    /// First time this habit was seen
    New,
    /// Already logged for the current period; nothing changed
    Repeat,
    /// Logged on the due day; streak went up by one
    Streak,
    /// Due date was missed; streak starts over
    Broken {
        /// Whole periods between the missed due date and now
        periods_missed: i64,
    },
}

impl Transition {
    /// Short lowercase label, used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Transition::New => "new",
            Transition::Repeat => "repeat",
            Transition::Streak => "streak",
            Transition::Broken { .. } => "broken",
        }
    }

    /// Render the user-facing message for this outcome
    pub fn message(&self, name: &str, streak: u32, frequency: Frequency) -> String {
        match self {
            Transition::New => format!(
                "Good luck with your new habit '{}'! Don't forget to do it again {}.",
                name,
                frequency.next_phrase()
            ),
            Transition::Repeat => {
                format!("You already logged '{}' today. Keep it up!", name)
            }
            Transition::Streak => format!(
                "Nice work: you've done the habit '{}' for {} {} in a row now. Keep it up!",
                name,
                streak,
                frequency.unit()
            ),
            Transition::Broken { periods_missed } => format!(
                "You last did the habit '{}' {} {} ago, so you're starting a new streak today. Good luck!",
                name,
                periods_missed,
                frequency.unit()
            ),
        }
    }
}
