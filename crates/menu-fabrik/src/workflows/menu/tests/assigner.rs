use std::collections::BTreeSet;

use super::common::*;
use crate::workflows::menu::domain::{
    MealSlot, MealTime, Participant, ParticipantId, Recipe, RecipeCategory, RecipeId, RecipeTime,
    SideDish, SlotStatus,
};
use crate::workflows::menu::generation::assigner::{assign_slot, chronological_order};
use crate::workflows::menu::generation::{GenerationReport, MenuGenerator, RollingState, ScoringConfig};
use crate::workflows::menu::planner::plan_week;

fn fill(
    slots: &mut [MealSlot],
    recipes: &[Recipe],
    participants: &[Participant],
    seed: u64,
) -> GenerationReport {
    generator().generate_menu(slots, recipes, participants, &mut seeded(seed))
}

#[test]
fn gluten_allergy_rules_out_pasta() {
    let recipes = vec![
        Recipe::new("pasta", "Pasta", 20)
            .with_category(RecipeCategory::Pasta)
            .with_allergens(&["Gluten"]),
        Recipe::new("salad", "Salad", 10).with_category(RecipeCategory::Salad),
    ];
    let roster = vec![Participant::new("alice", "Alice").with_allergens(&["gluten"])];

    for seed in 0..20 {
        let mut slots = vec![slot(monday(), MealTime::Lunch)];
        let report = fill(&mut slots, &recipes, &roster, seed);
        assert_eq!(slots[0].recipe, Some(recipe_id("salad")));
        assert!(report.is_complete());
    }
}

#[test]
fn quick_recipe_wins_weekday_lunch() {
    let recipes = vec![
        Recipe::new("roast", "Roast", 120),
        Recipe::new("quick-salad", "Quick salad", 15),
    ];

    for seed in 0..20 {
        let mut slots = vec![slot(monday(), MealTime::Lunch)];
        fill(&mut slots, &recipes, &[], seed);
        assert_eq!(slots[0].recipe, Some(recipe_id("quick-salad")));
    }
}

#[test]
fn free_time_recipe_loses_on_weekday_dinner() {
    let recipes = vec![
        Recipe::new("slow-dish", "Slow dish", 180).requiring_free_time(),
        Recipe::new("quick-dish", "Quick dish", 25),
    ];

    for seed in 0..20 {
        let mut slots = vec![slot(monday(), MealTime::Dinner)];
        fill(&mut slots, &recipes, &[], seed);
        assert_eq!(slots[0].recipe, Some(recipe_id("quick-dish")));
    }
}

#[test]
fn slot_without_safe_recipe_stays_empty() {
    let recipes = vec![Recipe::new("pasta", "Pasta", 20).with_allergens(&["Gluten"])];
    let roster = vec![Participant::new("alice", "Alice").with_allergens(&["Gluten"])];
    let mut slots = vec![slot(monday(), MealTime::Dinner)];

    let report = fill(&mut slots, &recipes, &roster, 1);

    assert!(slots[0].recipe.is_none());
    assert!(slots[0].side_dishes.is_empty());
    assert_eq!(report.unfulfilled, vec![slots[0].id.clone()]);
    assert!(report.assigned.is_empty());
    assert!(!report.is_complete());
}

#[test]
fn lunch_is_processed_before_dinner() {
    let slots = vec![
        slot(saturday(), MealTime::Lunch),
        slot(monday(), MealTime::Dinner),
        slot(monday(), MealTime::Lunch),
    ];

    assert_eq!(chronological_order(&slots), vec![2, 1, 0]);
}

#[test]
fn assignments_follow_chronological_order() {
    let recipes = catalog();
    let mut slots = plan_week(monday(), 3).expect("valid plan");
    slots.reverse();

    let report = fill(&mut slots, &recipes, &household(), 11);

    let order: Vec<String> = report
        .assigned
        .iter()
        .map(|assignment| assignment.slot_id.0.clone())
        .collect();
    let mut sorted = order.clone();
    sorted.sort_by_key(|id| {
        slots
            .iter()
            .find(|slot| slot.id.0 == *id)
            .map(MealSlot::chronological_key)
    });
    assert_eq!(order, sorted);
    assert_eq!(order.first().map(String::as_str), Some("2025-10-06-lunch"));
}

#[test]
fn non_planned_and_filled_slots_are_left_alone() {
    let recipes = catalog();
    let mut restaurant = slot(monday(), MealTime::Lunch);
    restaurant.set_status(SlotStatus::Restaurant);
    let mut filled = slot(monday(), MealTime::Dinner);
    filled.assign(recipe_id("carbonara"), None);
    let tuesday = monday() + chrono::Duration::days(1);
    let mut slots = vec![restaurant, filled, slot(tuesday, MealTime::Lunch)];

    let report = fill(&mut slots, &recipes, &household(), 5);

    assert_eq!(report.skipped_not_planned, 1);
    assert_eq!(report.skipped_filled, 1);
    assert_eq!(report.assigned.len(), 1);
    assert!(slots[0].recipe.is_none());
    assert_eq!(slots[1].recipe, Some(recipe_id("carbonara")));
    assert!(slots[2].recipe.is_some());
}

#[test]
fn second_run_changes_nothing() {
    let recipes = catalog();
    let mut slots = plan_week(monday(), 7).expect("valid plan");
    fill(&mut slots, &recipes, &household(), 21);
    let before = slots.clone();

    let report = fill(&mut slots, &recipes, &household(), 99);

    assert_eq!(slots, before);
    assert!(report.assigned.is_empty());
    assert_eq!(report.skipped_filled, 14);
}

#[test]
fn rolling_state_records_each_assignment() {
    let recipes = catalog();
    let roster = household();
    let generator = generator();
    let mut rng = seeded(4);
    let mut report = GenerationReport::default();
    let mut slots = plan_week(monday(), 4).expect("valid plan");

    let mut state = RollingState::default();
    let mut previous_len = 0;
    for slot in slots.iter_mut() {
        state = assign_slot(&generator, slot, state, &recipes, &roster, &mut rng, &mut report);
        let assigned = slot.recipe.clone().expect("catalog covers every slot");
        let assigned_recipe = recipe(&recipes, &assigned.0);

        assert!(state.used_recipe_ids.contains(&assigned));
        assert!(state.used_recipe_ids.len() >= previous_len);
        assert_eq!(state.previous_category, Some(assigned_recipe.category));
        assert_eq!(state.previous_side_dish, slot.side_dishes.first().cloned());
        previous_len = state.used_recipe_ids.len();
    }
}

#[test]
fn skipped_slot_keeps_rolling_state() {
    let recipes = catalog();
    let mut report = GenerationReport::default();
    let mut skipped = slot(monday(), MealTime::Lunch);
    skipped.set_status(SlotStatus::Work);
    let state =
        RollingState::default().advance(recipe(&recipes, "salmon"), Some(SideDish::new("Rice")));

    let next = assign_slot(
        &generator(),
        &mut skipped,
        state.clone(),
        &recipes,
        &household(),
        &mut seeded(1),
        &mut report,
    );

    assert_eq!(next, state);
    assert_eq!(report.skipped_not_planned, 1);
}

#[test]
fn recipes_do_not_repeat_while_alternatives_exist() {
    let recipes = vec![
        Recipe::new("a", "A", 40).with_category(RecipeCategory::Meat),
        Recipe::new("b", "B", 40).with_category(RecipeCategory::Fish),
        Recipe::new("c", "C", 40).with_category(RecipeCategory::Soup),
    ];

    for seed in 0..30 {
        let mut slots: Vec<MealSlot> = (0..3)
            .map(|offset| slot(monday() + chrono::Duration::days(offset), MealTime::Dinner))
            .collect();
        let report = fill(&mut slots, &recipes, &[], seed);

        let distinct: BTreeSet<RecipeId> =
            slots.iter().filter_map(|slot| slot.recipe.clone()).collect();
        assert_eq!(distinct.len(), 3, "seed {seed} repeated a recipe");
        assert_eq!(report.used_recipe_ids, distinct);
    }
}

#[test]
fn consecutive_slots_alternate_side_dishes() {
    let recipes = vec![Recipe::new("bowl", "Bowl", 20)
        .with_time(RecipeTime::Both)
        .with_side_dishes(&["Fries", "Rice"])];

    for seed in 0..20 {
        let mut slots = plan_week(monday(), 2).expect("valid plan");
        fill(&mut slots, &recipes, &[], seed);

        let picked: Vec<SideDish> = slots
            .iter()
            .map(|slot| slot.side_dishes.first().cloned().expect("side picked"))
            .collect();
        for pair in picked.windows(2) {
            assert_ne!(pair[0], pair[1], "seed {seed} repeated a side dish");
        }
    }
}

#[test]
fn assigned_recipes_are_always_safe_for_attendees() {
    let recipes = catalog();
    let roster = household();

    for seed in 0..40 {
        let mut slots = plan_week(monday(), 7).expect("valid plan");
        slots[3].attendees = Some([ParticipantId("carla".to_string())].into_iter().collect());
        fill(&mut slots, &recipes, &roster, seed);

        for slot in &slots {
            let Some(assigned) = &slot.recipe else {
                continue;
            };
            let excluded = excluded_for(slot, &roster);
            assert!(
                !recipe(&recipes, &assigned.0).conflicts_with(&excluded),
                "seed {seed} put {assigned} on {}",
                slot.id
            );
        }
    }
}

#[test]
fn negative_tolerance_from_a_household_file_fills_without_panicking() {
    let config: ScoringConfig =
        serde_json::from_str(r#"{"near_top_tolerance": -5}"#).expect("config parses");
    let generator = MenuGenerator::new(config);
    let recipes = catalog();

    let mut slots = plan_week(monday(), 2).expect("valid plan");
    let report = generator.generate_menu(&mut slots, &recipes, &household(), &mut seeded(4));

    assert!(report.is_complete());
    assert!(slots.iter().all(|slot| slot.recipe.is_some()));
}
