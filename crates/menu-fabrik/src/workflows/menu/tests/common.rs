use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GenerationConfig;
use crate::workflows::menu::domain::{
    AllergenName, MealSlot, MealTime, Participant, Recipe, RecipeCategory, RecipeId, RecipeTime,
    SlotId,
};
use crate::workflows::menu::generation::{resolve_attendees, MenuGenerator, ScoringConfig};
use crate::workflows::menu::memory::{HouseholdSnapshot, InMemoryMenuRepository};
use crate::workflows::menu::repository::{MenuRepository, RepositoryError};
use crate::workflows::menu::service::MenuPlannerService;

pub(super) fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 6).expect("valid date")
}

pub(super) fn saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 11).expect("valid date")
}

pub(super) fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub(super) fn generator() -> MenuGenerator {
    MenuGenerator::new(ScoringConfig::default())
}

pub(super) fn slot(date: NaiveDate, time: MealTime) -> MealSlot {
    MealSlot::new(date, time)
}

pub(super) fn catalog() -> Vec<Recipe> {
    vec![
        Recipe::new("carbonara", "Spaghetti carbonara", 25)
            .with_category(RecipeCategory::Pasta)
            .with_allergens(&["Gluten", "Egg"]),
        Recipe::new("roast-chicken", "Roast chicken", 90)
            .with_time(RecipeTime::Dinner)
            .with_category(RecipeCategory::Meat)
            .requiring_free_time()
            .with_side_dishes(&["Fries", "Mashed potatoes", "Green beans"])
            .with_rating(5),
        Recipe::new("salmon", "Baked salmon", 30)
            .with_category(RecipeCategory::Fish)
            .with_allergens(&["Fish"])
            .with_side_dishes(&["Rice", "Steamed vegetables"]),
        Recipe::new("lentil-soup", "Lentil soup", 40).with_category(RecipeCategory::Soup),
        Recipe::new("caesar", "Caesar salad", 15)
            .with_time(RecipeTime::Lunch)
            .with_category(RecipeCategory::Salad)
            .with_allergens(&["gluten", "EGG", "fish"]),
        Recipe::new("burger", "Burger", 20)
            .with_category(RecipeCategory::FastFood)
            .with_allergens(&["Gluten", "Sesame"])
            .with_side_dishes(&["Fries", "Salad"]),
        Recipe::new("ratatouille", "Ratatouille", 60)
            .with_time(RecipeTime::Dinner)
            .with_category(RecipeCategory::Vegetarian)
            .with_side_dishes(&["Rice", "Bread"]),
        Recipe::new("omelette", "Omelette", 10)
            .with_category(RecipeCategory::Other)
            .with_allergens(&["Egg", "Milk"])
            .with_side_dishes(&["Salad"]),
    ]
}

pub(super) fn household() -> Vec<Participant> {
    vec![
        Participant::new("alice", "Alice").with_allergens(&["Gluten"]),
        Participant::new("bob", "Bob"),
        Participant::new("carla", "Carla")
            .with_allergens(&["fish"])
            .inactive(),
    ]
}

pub(super) fn recipe<'a>(recipes: &'a [Recipe], id: &str) -> &'a Recipe {
    recipes
        .iter()
        .find(|recipe| recipe.id.0 == id)
        .expect("recipe present in catalog")
}

pub(super) fn recipe_id(id: &str) -> RecipeId {
    RecipeId(id.to_string())
}

pub(super) fn excluded_for(slot: &MealSlot, participants: &[Participant]) -> BTreeSet<AllergenName> {
    resolve_attendees(slot, participants).excluded_allergens()
}

pub(super) fn snapshot() -> HouseholdSnapshot {
    HouseholdSnapshot {
        recipes: catalog(),
        participants: household(),
        slots: Vec::new(),
        scoring: None,
    }
}

pub(super) fn build_service(
    snapshot: HouseholdSnapshot,
    seed: u64,
) -> (
    MenuPlannerService<InMemoryMenuRepository>,
    Arc<InMemoryMenuRepository>,
) {
    let repository = Arc::new(InMemoryMenuRepository::from_snapshot(snapshot));
    let generation = GenerationConfig {
        seed: Some(seed),
        ..GenerationConfig::default()
    };
    let service = MenuPlannerService::new(repository.clone(), ScoringConfig::default(), &generation);
    (service, repository)
}

pub(super) fn stored_slot(repository: &InMemoryMenuRepository, id: &SlotId) -> MealSlot {
    repository
        .slot(id)
        .expect("fetch succeeds")
        .expect("slot present")
}

pub(super) struct UnavailableRepository;

impl MenuRepository for UnavailableRepository {
    fn recipes(&self) -> Result<Vec<Recipe>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn participants(&self) -> Result<Vec<Participant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn slot(&self, _id: &SlotId) -> Result<Option<MealSlot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn slots_between(
        &self,
        _first: NaiveDate,
        _last: NaiveDate,
    ) -> Result<Vec<MealSlot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent_history(&self, _limit: usize) -> Result<Vec<MealSlot>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_slots(&self, _slots: Vec<MealSlot>) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn save_slots(&self, _slots: &[MealSlot]) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
