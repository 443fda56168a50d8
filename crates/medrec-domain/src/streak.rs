//! Patient health streak: consecutive calendar days with a successful login.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stored streak state for one patient.
///
/// A patient with no stored row is `HealthStreak::default()`: count 0, never logged in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStreak {
    pub count: u32,
    pub last_login: Option<NaiveDate>,
}

impl HealthStreak {
    /// Streak count after a login on `today`.
    ///
    /// - never logged in: 1
    /// - already logged in today: unchanged
    /// - last login was yesterday: +1
    /// - anything else (gap, or a date after `today`): reset to 1
    pub fn next_count(&self, today: NaiveDate) -> u32 {
        match self.last_login {
            None => 1,
            Some(last) if last == today => self.count,
            Some(last) if today.pred_opt() == Some(last) => self.count.saturating_add(1),
            Some(_) => 1,
        }
    }

    /// State to persist after a login on `today`.
    pub fn advance(&self, today: NaiveDate) -> Self {
        Self {
            count: self.next_count(today),
            last_login: Some(today),
        }
    }
}
