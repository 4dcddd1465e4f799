use std::collections::BTreeSet;

use rand::Rng;
use tracing::{debug, info};

use super::super::domain::{MealSlot, Participant, Recipe, RecipeId};
use super::policy::{pick_side_dish, select_candidate};
use super::rules::SlotContext;
use super::{AlternativeOutcome, MenuGenerator, SlotAssignment};

/// Replaces the recipe of a single slot, never offering the recipe it currently holds.
///
/// Recent history stands in for the rolling state of a whole-week run: any recipe assigned in
/// `history` counts as recently used. There is no previous category in this path.
pub(crate) fn find_alternative<R: Rng + ?Sized>(
    generator: &MenuGenerator,
    slot: &mut MealSlot,
    recipes: &[Recipe],
    participants: &[Participant],
    history: &[MealSlot],
    rng: &mut R,
) -> AlternativeOutcome {
    if !slot.status.is_planned() {
        debug!(slot = %slot.id, status = slot.status.label(), "slot is not planned, nothing to regenerate");
        return AlternativeOutcome::NotPlanned;
    }

    let used_recipe_ids: BTreeSet<RecipeId> = history
        .iter()
        .filter_map(|past| past.recipe.clone())
        .collect();
    let previous = slot.recipe.clone();

    let context = SlotContext::for_slot(slot, &used_recipe_ids, None);
    let chosen = generator
        .rank_candidates(slot, recipes, participants, &context, previous.as_ref())
        .and_then(|candidates| select_candidate(candidates, generator.config().near_top_tolerance, rng));

    let Some(chosen) = chosen else {
        info!(slot = %slot.id, "could not find an alternative recipe");
        return AlternativeOutcome::NoAlternative;
    };

    let side_dish = pick_side_dish(&chosen.recipe.side_dishes, None, rng);
    slot.assign(chosen.recipe.id.clone(), side_dish.clone());

    AlternativeOutcome::Replaced {
        previous,
        assignment: SlotAssignment::from_candidate(slot, &chosen, side_dish),
    }
}
