use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, warn};

use super::super::domain::{MealSlot, Participant, Recipe, RecipeCategory, RecipeId, SideDish};
use super::policy::{pick_side_dish, select_candidate};
use super::rules::SlotContext;
use super::{GenerationReport, MenuGenerator, SlotAssignment};

/// Variety memory carried from one processed slot to the next during a whole-week run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollingState {
    pub used_recipe_ids: BTreeSet<RecipeId>,
    pub previous_category: Option<RecipeCategory>,
    pub previous_side_dish: Option<SideDish>,
}

impl RollingState {
    /// The used set only ever grows; category and side always reflect the latest assignment.
    pub fn advance(mut self, recipe: &Recipe, side_dish: Option<SideDish>) -> Self {
        self.used_recipe_ids.insert(recipe.id.clone());
        self.previous_category = Some(recipe.category);
        self.previous_side_dish = side_dish;
        self
    }
}

/// Slot indices by date, lunch before dinner on the same day.
pub(crate) fn chronological_order(slots: &[MealSlot]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..slots.len()).collect();
    order.sort_by_key(|&index| slots[index].chronological_key());
    order
}

pub(crate) fn assign_week<R: Rng + ?Sized>(
    generator: &MenuGenerator,
    slots: &mut [MealSlot],
    recipes: &[Recipe],
    participants: &[Participant],
    rng: &mut R,
) -> GenerationReport {
    let mut report = GenerationReport::default();

    let state = chronological_order(slots)
        .into_iter()
        .fold(RollingState::default(), |state, index| {
            assign_slot(
                generator,
                &mut slots[index],
                state,
                recipes,
                participants,
                rng,
                &mut report,
            )
        });

    report.used_recipe_ids = state.used_recipe_ids;
    report
}

/// Fills one slot and returns the state the next slot should see.
pub(crate) fn assign_slot<R: Rng + ?Sized>(
    generator: &MenuGenerator,
    slot: &mut MealSlot,
    state: RollingState,
    recipes: &[Recipe],
    participants: &[Participant],
    rng: &mut R,
    report: &mut GenerationReport,
) -> RollingState {
    if !slot.status.is_planned() {
        report.skipped_not_planned += 1;
        return state;
    }

    if slot.recipe.is_some() {
        report.skipped_filled += 1;
        return state;
    }

    let context = SlotContext::for_slot(slot, &state.used_recipe_ids, state.previous_category);
    let chosen = generator
        .rank_candidates(slot, recipes, participants, &context, None)
        .and_then(|candidates| select_candidate(candidates, generator.config().near_top_tolerance, rng));

    let Some(chosen) = chosen else {
        warn!(slot = %slot.id, date = %slot.date, "no compatible recipe for slot");
        report.unfulfilled.push(slot.id.clone());
        return state;
    };

    let side_dish = pick_side_dish(
        &chosen.recipe.side_dishes,
        state.previous_side_dish.as_ref(),
        rng,
    );

    debug!(
        slot = %slot.id,
        recipe = %chosen.recipe.id,
        score = chosen.total,
        side = ?side_dish.as_ref().map(SideDish::as_str),
        "assigned recipe"
    );

    slot.assign(chosen.recipe.id.clone(), side_dish.clone());
    report
        .assigned
        .push(SlotAssignment::from_candidate(slot, &chosen, side_dish.clone()));

    state.advance(chosen.recipe, side_dish)
}
