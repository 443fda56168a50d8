use medrec_domain::id::AccountId;
use chrono::NaiveDate;

use crate::domain::repository::StreakRepository;
use crate::error::AuthServiceError;

/// Advances a patient's consecutive-day login counter.
pub struct HealthStreakTracker<S>
where
    S: StreakRepository,
{
    pub streaks: S,
}

impl<S> HealthStreakTracker<S>
where
    S: StreakRepository,
{
    /// Apply a login on `today` and persist it. Idempotent within a day.
    pub async fn record_login(
        &self,
        patient_id: &AccountId,
        today: NaiveDate,
    ) -> Result<u32, AuthServiceError> {
        let current = self.streaks.get(patient_id).await?.unwrap_or_default();
        let next = current.advance(today);
        self.streaks.save(patient_id, &next).await?;
        Ok(next.count)
    }
}
