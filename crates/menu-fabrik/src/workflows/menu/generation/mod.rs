mod alternative;
pub(crate) mod assigner;
mod config;
pub(crate) mod policy;
mod rules;
pub(crate) mod safety;

pub use assigner::RollingState;
pub use config::{ScoringConfig, ScoringConfigError};
pub use rules::{score_recipe, CandidateScore, ScoreAdjustment, ScoringRule, SlotContext};
pub use safety::{resolve_attendees, safe_recipes, AttendeeSource, Attendees};

use std::collections::BTreeSet;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{MealSlot, Participant, Recipe, RecipeId, SideDish, SlotId};

/// Stateless recommender that applies the scoring rubric slot by slot.
#[derive(Debug, Clone, Default)]
pub struct MenuGenerator {
    config: ScoringConfig,
}

impl MenuGenerator {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Fills every empty planned slot in chronological order, mutating `slots` in place.
    ///
    /// Slots without any safe recipe are left untouched and listed in the report.
    pub fn generate_menu<R: Rng + ?Sized>(
        &self,
        slots: &mut [MealSlot],
        recipes: &[Recipe],
        participants: &[Participant],
        rng: &mut R,
    ) -> GenerationReport {
        assigner::assign_week(self, slots, recipes, participants, rng)
    }

    /// Swaps the recipe of one planned slot for a different safe one.
    pub fn generate_alternative<R: Rng + ?Sized>(
        &self,
        slot: &mut MealSlot,
        recipes: &[Recipe],
        participants: &[Participant],
        history: &[MealSlot],
        rng: &mut R,
    ) -> AlternativeOutcome {
        alternative::find_alternative(self, slot, recipes, participants, history, rng)
    }

    /// Scores every safe recipe for the slot, minus `excluded`. `None` when nothing is left.
    pub fn rank_candidates<'r>(
        &self,
        slot: &MealSlot,
        recipes: &'r [Recipe],
        participants: &[Participant],
        context: &SlotContext<'_>,
        excluded: Option<&RecipeId>,
    ) -> Option<Vec<CandidateScore<'r>>> {
        let attendees = resolve_attendees(slot, participants);
        let excluded_allergens = attendees.excluded_allergens();

        let candidates: Vec<CandidateScore<'r>> = safe_recipes(recipes, &excluded_allergens)
            .into_iter()
            .filter(|recipe| Some(&recipe.id) != excluded)
            .map(|recipe| score_recipe(recipe, context, &self.config))
            .collect();

        debug!(
            slot = %slot.id,
            attendees = ?attendees.source,
            excluded_allergens = excluded_allergens.len(),
            candidates = candidates.len(),
            "ranked candidates"
        );

        if candidates.is_empty() {
            None
        } else {
            Some(candidates)
        }
    }
}

/// Recipe and side picked for one slot, with the score that won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub slot_id: SlotId,
    pub recipe_id: RecipeId,
    pub recipe_name: String,
    pub side_dish: Option<SideDish>,
    pub score: i32,
    pub adjustments: Vec<ScoreAdjustment>,
}

impl SlotAssignment {
    pub(crate) fn from_candidate(
        slot: &MealSlot,
        candidate: &CandidateScore<'_>,
        side_dish: Option<SideDish>,
    ) -> Self {
        Self {
            slot_id: slot.id.clone(),
            recipe_id: candidate.recipe.id.clone(),
            recipe_name: candidate.recipe.name.clone(),
            side_dish,
            score: candidate.total,
            adjustments: candidate.adjustments.clone(),
        }
    }
}

/// Outcome of a whole-week run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub assigned: Vec<SlotAssignment>,
    pub unfulfilled: Vec<SlotId>,
    pub skipped_not_planned: usize,
    pub skipped_filled: usize,
    pub used_recipe_ids: BTreeSet<RecipeId>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.unfulfilled.is_empty()
    }
}

/// Outcome of regenerating a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum AlternativeOutcome {
    Replaced {
        previous: Option<RecipeId>,
        assignment: SlotAssignment,
    },
    NotPlanned,
    NoAlternative,
}

impl AlternativeOutcome {
    pub fn summary(&self) -> String {
        match self {
            AlternativeOutcome::Replaced { assignment, .. } => match &assignment.side_dish {
                Some(side) => format!("replaced with {} ({})", assignment.recipe_name, side),
                None => format!("replaced with {}", assignment.recipe_name),
            },
            AlternativeOutcome::NotPlanned => "slot is not planned, nothing to regenerate".to_string(),
            AlternativeOutcome::NoAlternative => "could not find an alternative".to_string(),
        }
    }
}
