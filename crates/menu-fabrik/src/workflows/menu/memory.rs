use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{MealSlot, Participant, Recipe, SlotId};
use super::generation::ScoringConfig;
use super::repository::{MenuRepository, RepositoryError};

/// Everything a household stores: catalog, members and the slots planned so far.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HouseholdSnapshot {
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub slots: Vec<MealSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryMenuRepository {
    state: Arc<Mutex<HouseholdSnapshot>>,
}

impl InMemoryMenuRepository {
    pub fn from_snapshot(snapshot: HouseholdSnapshot) -> Self {
        Self {
            state: Arc::new(Mutex::new(snapshot)),
        }
    }

    pub fn snapshot(&self) -> Result<HouseholdSnapshot, RepositoryError> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, HouseholdSnapshot>, RepositoryError> {
        self.state
            .lock()
            .map_err(|_| RepositoryError::Unavailable("household state poisoned".to_string()))
    }
}

impl MenuRepository for InMemoryMenuRepository {
    fn recipes(&self) -> Result<Vec<Recipe>, RepositoryError> {
        Ok(self.lock()?.recipes.clone())
    }

    fn participants(&self) -> Result<Vec<Participant>, RepositoryError> {
        Ok(self.lock()?.participants.clone())
    }

    fn slot(&self, id: &SlotId) -> Result<Option<MealSlot>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.slots.iter().find(|slot| &slot.id == id).cloned())
    }

    fn slots_between(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<MealSlot>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard
            .slots
            .iter()
            .filter(|slot| slot.date >= first && slot.date <= last)
            .cloned()
            .collect())
    }

    fn recent_history(&self, limit: usize) -> Result<Vec<MealSlot>, RepositoryError> {
        let guard = self.lock()?;
        let mut history = guard.slots.clone();
        history.sort_by(|a, b| b.chronological_key().cmp(&a.chronological_key()));
        history.truncate(limit);
        Ok(history)
    }

    fn insert_slots(&self, slots: Vec<MealSlot>) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if let Some(existing) = slots
            .iter()
            .find(|slot| guard.slots.iter().any(|stored| stored.id == slot.id))
        {
            return Err(RepositoryError::Conflict(existing.id.clone()));
        }
        guard.slots.extend(slots);
        Ok(())
    }

    fn save_slots(&self, slots: &[MealSlot]) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if let Some(missing) = slots
            .iter()
            .find(|slot| !guard.slots.iter().any(|stored| stored.id == slot.id))
        {
            return Err(RepositoryError::NotFound(missing.id.to_string()));
        }

        for slot in slots {
            if let Some(stored) = guard.slots.iter_mut().find(|stored| stored.id == slot.id) {
                *stored = slot.clone();
            }
        }
        Ok(())
    }
}
