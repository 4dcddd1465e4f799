use serde::{Deserialize, Serialize};

/// Weights of the scoring rubric and the width of the near-top selection band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub wrong_time_penalty: i32,
    pub weekday_free_time_penalty: i32,
    pub recent_repeat_penalty: i32,
    pub same_category_penalty: i32,
    pub quick_lunch_bonus: i32,
    pub quick_lunch_max_minutes: u32,
    pub weekend_free_time_bonus: i32,
    pub near_top_tolerance: i32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            wrong_time_penalty: 100,
            weekday_free_time_penalty: 50,
            recent_repeat_penalty: 80,
            same_category_penalty: 40,
            quick_lunch_bonus: 20,
            quick_lunch_max_minutes: 30,
            weekend_free_time_bonus: 15,
            near_top_tolerance: 10,
        }
    }
}

impl ScoringConfig {
    /// Weights are magnitudes: penalties are subtracted and bonuses added, so none may be
    /// negative. A negative tolerance would leave even the best candidate outside the band.
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        let weights = [
            ("wrong_time_penalty", self.wrong_time_penalty),
            ("weekday_free_time_penalty", self.weekday_free_time_penalty),
            ("recent_repeat_penalty", self.recent_repeat_penalty),
            ("same_category_penalty", self.same_category_penalty),
            ("quick_lunch_bonus", self.quick_lunch_bonus),
            ("weekend_free_time_bonus", self.weekend_free_time_bonus),
            ("near_top_tolerance", self.near_top_tolerance),
        ];

        match weights.into_iter().find(|(_, value)| *value < 0) {
            Some((field, value)) => Err(ScoringConfigError::Negative { field, value }),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("scoring weight {field} must not be negative, got {value}")]
    Negative { field: &'static str, value: i32 },
}
