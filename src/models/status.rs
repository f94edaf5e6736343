use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Display status derived from a task's completion flag and deadline.
///
/// Never persisted. The same stored task can move from `OnTime` to `Late`
/// (or `CompletedOnTime` to `CompletedLate`) without any write, purely
/// because the observation time crossed the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    Completed,
    OnTime,
    Late,
    CompletedOnTime,
    CompletedLate,
}

impl TaskStatus {
    /// Classifies a task as observed at `now`.
    ///
    /// Completed tasks are compared against `now`, not against the moment
    /// they were completed, so a task finished early still reports
    /// `CompletedLate` once its deadline has passed. A deadline equal to
    /// `now` counts as late for completed tasks and on time for open ones.
    pub fn classify(completed: bool, deadline: Option<NaiveDateTime>, now: NaiveDateTime) -> Self {
        match (completed, deadline) {
            (false, None) => Self::Pending,
            (true, None) => Self::Completed,
            (true, Some(deadline)) if now < deadline => Self::CompletedOnTime,
            (true, Some(_)) => Self::CompletedLate,
            (false, Some(deadline)) if now <= deadline => Self::OnTime,
            (false, Some(_)) => Self::Late,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::OnTime => "on-time",
            Self::Late => "late",
            Self::CompletedOnTime => "completed-on-time",
            Self::CompletedLate => "completed-late",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
