use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::GenerationConfig;

use super::domain::{MealSlot, RecipeId, SlotId, SlotStatus};
use super::generation::policy::pick_side_dish;
use super::generation::{
    resolve_attendees, AlternativeOutcome, GenerationReport, MenuGenerator, ScoringConfig,
};
use super::planner::{plan_range, plan_week, PlannerError};
use super::repository::{MenuRepository, RepositoryError};

/// Service composing the repository with the recommendation engine.
///
/// All randomness flows through one seedable generator so a fixed seed replays the same plan.
pub struct MenuPlannerService<R> {
    repository: Arc<R>,
    generator: Arc<MenuGenerator>,
    rng: Mutex<StdRng>,
    history_limit: usize,
}

impl<R> MenuPlannerService<R>
where
    R: MenuRepository + 'static,
{
    pub fn new(repository: Arc<R>, scoring: ScoringConfig, generation: &GenerationConfig) -> Self {
        let rng = match generation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            repository,
            generator: Arc::new(MenuGenerator::new(scoring)),
            rng: Mutex::new(rng),
            history_limit: generation.history_limit,
        }
    }

    pub fn generator(&self) -> &MenuGenerator {
        &self.generator
    }

    /// Plan the slots of a new week, fill them and store the result in one write.
    ///
    /// Nothing is stored when filling fails, so the same week can be created again.
    pub fn create_week(
        &self,
        start: NaiveDate,
        days: u32,
    ) -> Result<GenerationReport, ServiceError> {
        let mut slots = plan_week(start, days)?;
        let report = self.fill(&mut slots)?;
        self.repository.insert_slots(slots)?;

        info!(
            %start,
            days,
            assigned = report.assigned.len(),
            unfulfilled = report.unfulfilled.len(),
            "created menu"
        );
        Ok(report)
    }

    /// Fill the empty planned slots of an existing date range.
    pub fn generate(&self, start: NaiveDate, days: u32) -> Result<GenerationReport, ServiceError> {
        let (first, last) = plan_range(start, days)?;
        let mut slots = self.repository.slots_between(first, last)?;

        let report = self.fill(&mut slots)?;
        if !report.assigned.is_empty() {
            self.repository.save_slots(&slots)?;
        }

        info!(
            %first,
            %last,
            assigned = report.assigned.len(),
            unfulfilled = report.unfulfilled.len(),
            "generated menu"
        );
        Ok(report)
    }

    /// Replace the recipe of one slot using recent history for variety.
    pub fn regenerate(&self, slot_id: &SlotId) -> Result<AlternativeOutcome, ServiceError> {
        let mut slot = self.load_slot(slot_id)?;
        let outcome = self.alternative_for(&mut slot)?;

        if matches!(outcome, AlternativeOutcome::Replaced { .. }) {
            self.repository.save_slots(std::slice::from_ref(&slot))?;
        }

        info!(slot = %slot_id, outcome = %outcome.summary(), "regenerated slot");
        Ok(outcome)
    }

    /// Apply a status; a slot switched back to planned without a recipe gets one.
    pub fn change_status(
        &self,
        slot_id: &SlotId,
        status: SlotStatus,
    ) -> Result<Option<AlternativeOutcome>, ServiceError> {
        let mut slot = self.load_slot(slot_id)?;
        slot.set_status(status);

        let outcome = if status.is_planned() && slot.recipe.is_none() {
            Some(self.alternative_for(&mut slot)?)
        } else {
            None
        };

        self.repository.save_slots(std::slice::from_ref(&slot))?;
        info!(slot = %slot_id, status = status.label(), "changed slot status");
        Ok(outcome)
    }

    /// Manual override: put a chosen recipe on a slot, as long as every attendee can eat it.
    pub fn pick_recipe(
        &self,
        slot_id: &SlotId,
        recipe_id: &RecipeId,
    ) -> Result<MealSlot, ServiceError> {
        let mut slot = self.load_slot(slot_id)?;
        let recipes = self.repository.recipes()?;
        let participants = self.repository.participants()?;

        let recipe = recipes
            .iter()
            .find(|recipe| &recipe.id == recipe_id)
            .ok_or_else(|| RepositoryError::NotFound(recipe_id.to_string()))?;

        let excluded = resolve_attendees(&slot, &participants).excluded_allergens();
        if recipe.conflicts_with(&excluded) {
            return Err(ServiceError::UnsafeRecipe {
                slot: slot.id.clone(),
                recipe: recipe.id.clone(),
                allergens: recipe
                    .allergens
                    .intersection(&excluded)
                    .map(|allergen| allergen.to_string())
                    .collect(),
            });
        }

        let side_dish = pick_side_dish(&recipe.side_dishes, None, &mut *self.rng());
        slot.status = SlotStatus::Planned;
        slot.assign(recipe.id.clone(), side_dish);

        self.repository.save_slots(std::slice::from_ref(&slot))?;
        info!(slot = %slot_id, recipe = %recipe_id, "picked recipe manually");
        Ok(slot)
    }

    /// Slots of a date range in the order they are eaten.
    pub fn week(&self, start: NaiveDate, days: u32) -> Result<Vec<MealSlot>, ServiceError> {
        let (first, last) = plan_range(start, days)?;
        let mut slots = self.repository.slots_between(first, last)?;
        slots.sort_by_key(MealSlot::chronological_key);
        Ok(slots)
    }

    fn fill(&self, slots: &mut [MealSlot]) -> Result<GenerationReport, ServiceError> {
        let recipes = self.repository.recipes()?;
        let participants = self.repository.participants()?;

        Ok(self
            .generator
            .generate_menu(slots, &recipes, &participants, &mut *self.rng()))
    }

    fn alternative_for(&self, slot: &mut MealSlot) -> Result<AlternativeOutcome, ServiceError> {
        let recipes = self.repository.recipes()?;
        let participants = self.repository.participants()?;
        let history = self.repository.recent_history(self.history_limit)?;

        Ok(self.generator.generate_alternative(
            slot,
            &recipes,
            &participants,
            &history,
            &mut *self.rng(),
        ))
    }

    fn load_slot(&self, slot_id: &SlotId) -> Result<MealSlot, ServiceError> {
        let slot = self
            .repository
            .slot(slot_id)?
            .ok_or_else(|| RepositoryError::NotFound(slot_id.to_string()))?;
        Ok(slot)
    }

    fn rng(&self) -> MutexGuard<'_, StdRng> {
        self.rng.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Error raised by the planner service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("recipe {recipe} contains {} which attendees of slot {slot} cannot eat", .allergens.join(", "))]
    UnsafeRecipe {
        slot: SlotId,
        recipe: RecipeId,
        allergens: Vec<String>,
    },
}
