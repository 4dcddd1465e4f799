use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use menu_fabrik::error::AppError;
use menu_fabrik::workflows::menu::{
    HouseholdSnapshot, InMemoryMenuRepository, MealSlot, MenuRepository, Participant, Recipe,
    RepositoryError, ScoringConfig, SlotId,
};
use tracing::debug;

/// Household file on disk, mirrored in memory and rewritten after every change.
#[derive(Debug)]
pub(crate) struct JsonHouseholdStore {
    path: PathBuf,
    scoring: ScoringConfig,
    inner: InMemoryMenuRepository,
}

impl JsonHouseholdStore {
    pub(crate) fn open(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path)?;
        let snapshot: HouseholdSnapshot = serde_json::from_str(&raw)?;
        debug!(
            path = %path.display(),
            recipes = snapshot.recipes.len(),
            participants = snapshot.participants.len(),
            slots = snapshot.slots.len(),
            "loaded household"
        );

        let scoring = snapshot.scoring.clone().unwrap_or_default();
        scoring.validate()?;

        Ok(Self {
            path: path.to_path_buf(),
            scoring,
            inner: InMemoryMenuRepository::from_snapshot(snapshot),
        })
    }

    /// Weights from the file, or the defaults when it carries none.
    pub(crate) fn scoring(&self) -> ScoringConfig {
        self.scoring.clone()
    }

    fn persist(&self) -> Result<(), RepositoryError> {
        let snapshot = self.inner.snapshot()?;
        let encoded = serde_json::to_string_pretty(&snapshot).map_err(|err| {
            RepositoryError::Unavailable(format!("could not encode household: {err}"))
        })?;
        fs::write(&self.path, encoded).map_err(|err| {
            RepositoryError::Unavailable(format!(
                "could not write {}: {err}",
                self.path.display()
            ))
        })
    }
}

impl MenuRepository for JsonHouseholdStore {
    fn recipes(&self) -> Result<Vec<Recipe>, RepositoryError> {
        self.inner.recipes()
    }

    fn participants(&self) -> Result<Vec<Participant>, RepositoryError> {
        self.inner.participants()
    }

    fn slot(&self, id: &SlotId) -> Result<Option<MealSlot>, RepositoryError> {
        self.inner.slot(id)
    }

    fn slots_between(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<MealSlot>, RepositoryError> {
        self.inner.slots_between(first, last)
    }

    fn recent_history(&self, limit: usize) -> Result<Vec<MealSlot>, RepositoryError> {
        self.inner.recent_history(limit)
    }

    fn insert_slots(&self, slots: Vec<MealSlot>) -> Result<(), RepositoryError> {
        self.inner.insert_slots(slots)?;
        self.persist()
    }

    fn save_slots(&self, slots: &[MealSlot]) -> Result<(), RepositoryError> {
        self.inner.save_slots(slots)?;
        self.persist()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
