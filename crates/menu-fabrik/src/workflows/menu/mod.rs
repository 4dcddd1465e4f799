//! Household meal planning: the recipe recommendation engine and the service around it.

pub mod domain;
pub mod generation;
pub mod memory;
pub mod planner;
pub mod repository;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AllergenName, MealSlot, MealTime, Participant, ParticipantId, Recipe, RecipeCategory, RecipeId,
    RecipeTime, SideDish, SlotId, SlotStatus,
};
pub use generation::{
    AlternativeOutcome, GenerationReport, MenuGenerator, ScoringConfig, ScoringConfigError,
    SlotAssignment,
};
pub use memory::{HouseholdSnapshot, InMemoryMenuRepository};
pub use planner::{plan_week, PlannerError, MAX_PLAN_DAYS};
pub use repository::{MenuRepository, RepositoryError};
pub use service::{MenuPlannerService, ServiceError};
