use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{MealSlot, MealTime, Recipe, RecipeCategory, RecipeId};
use super::config::ScoringConfig;

/// Rubric entries that can move a candidate's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringRule {
    WrongTimeOfDay,
    WeekdayFreeTime,
    RecentRepeat,
    SameCategory,
    QuickLunch,
    WeekendFreeTime,
}

impl ScoringRule {
    pub const fn label(self) -> &'static str {
        match self {
            Self::WrongTimeOfDay => "meant for another time of day",
            Self::WeekdayFreeTime => "needs free time on a weekday",
            Self::RecentRepeat => "served recently",
            Self::SameCategory => "same category as the previous meal",
            Self::QuickLunch => "quick lunch",
            Self::WeekendFreeTime => "elaborate recipe on a weekend",
        }
    }
}

/// Discrete contribution to a candidate's score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAdjustment {
    pub rule: ScoringRule,
    pub points: i32,
}

/// Score of one safe candidate plus the adjustments that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateScore<'r> {
    pub recipe: &'r Recipe,
    pub total: i32,
    pub adjustments: Vec<ScoreAdjustment>,
}

/// Facts about the slot being filled that the rubric looks at.
#[derive(Debug, Clone)]
pub struct SlotContext<'a> {
    pub time: MealTime,
    pub is_weekend: bool,
    pub used_recipe_ids: &'a BTreeSet<RecipeId>,
    pub previous_category: Option<RecipeCategory>,
}

impl<'a> SlotContext<'a> {
    pub fn for_slot(
        slot: &MealSlot,
        used_recipe_ids: &'a BTreeSet<RecipeId>,
        previous_category: Option<RecipeCategory>,
    ) -> Self {
        Self {
            time: slot.time,
            is_weekend: slot.is_weekend(),
            used_recipe_ids,
            previous_category,
        }
    }

    pub fn expected_time(&self) -> MealTime {
        match self.time {
            MealTime::Lunch => MealTime::Lunch,
            _ => MealTime::Dinner,
        }
    }
}

/// Every rule is checked independently; bonuses and penalties stack.
pub fn score_recipe<'r>(
    recipe: &'r Recipe,
    context: &SlotContext<'_>,
    config: &ScoringConfig,
) -> CandidateScore<'r> {
    let mut adjustments = Vec::new();

    if !recipe.time.suits(context.expected_time()) {
        adjustments.push(ScoreAdjustment {
            rule: ScoringRule::WrongTimeOfDay,
            points: 0i32.saturating_sub(config.wrong_time_penalty),
        });
    }

    if !context.is_weekend && recipe.requires_free_time {
        adjustments.push(ScoreAdjustment {
            rule: ScoringRule::WeekdayFreeTime,
            points: 0i32.saturating_sub(config.weekday_free_time_penalty),
        });
    }

    if context.used_recipe_ids.contains(&recipe.id) {
        adjustments.push(ScoreAdjustment {
            rule: ScoringRule::RecentRepeat,
            points: 0i32.saturating_sub(config.recent_repeat_penalty),
        });
    }

    if context.previous_category == Some(recipe.category) {
        adjustments.push(ScoreAdjustment {
            rule: ScoringRule::SameCategory,
            points: 0i32.saturating_sub(config.same_category_penalty),
        });
    }

    if context.time == MealTime::Lunch && recipe.prep_minutes <= config.quick_lunch_max_minutes {
        adjustments.push(ScoreAdjustment {
            rule: ScoringRule::QuickLunch,
            points: config.quick_lunch_bonus,
        });
    }

    if context.is_weekend && recipe.requires_free_time {
        adjustments.push(ScoreAdjustment {
            rule: ScoringRule::WeekendFreeTime,
            points: config.weekend_free_time_bonus,
        });
    }

    let total = adjustments
        .iter()
        .fold(0i32, |total, adjustment| total.saturating_add(adjustment.points));

    CandidateScore {
        recipe,
        total,
        adjustments,
    }
}
