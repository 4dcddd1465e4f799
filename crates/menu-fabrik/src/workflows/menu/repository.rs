use chrono::NaiveDate;

use super::domain::{MealSlot, Participant, Recipe, SlotId};

/// Storage abstraction so the planner service can be exercised in isolation.
pub trait MenuRepository: Send + Sync {
    fn recipes(&self) -> Result<Vec<Recipe>, RepositoryError>;
    /// The whole household, inactive members included.
    fn participants(&self) -> Result<Vec<Participant>, RepositoryError>;
    fn slot(&self, id: &SlotId) -> Result<Option<MealSlot>, RepositoryError>;
    /// Slots dated within `first..=last`, in no particular order.
    fn slots_between(&self, first: NaiveDate, last: NaiveDate)
        -> Result<Vec<MealSlot>, RepositoryError>;
    /// Up to `limit` slots, most recent date first.
    fn recent_history(&self, limit: usize) -> Result<Vec<MealSlot>, RepositoryError>;
    fn insert_slots(&self, slots: Vec<MealSlot>) -> Result<(), RepositoryError>;
    fn save_slots(&self, slots: &[MealSlot]) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("slot {0} already exists")]
    Conflict(SlotId),
    #[error("record not found: {0}")]
    NotFound(String),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
