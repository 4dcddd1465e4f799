use chrono::{Duration, NaiveDate};

use super::domain::{MealSlot, MealTime};

/// Longest plan a single week configuration may span.
pub const MAX_PLAN_DAYS: u32 = 14;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlannerError {
    #[error("a plan spans 1 to 14 days, got {0}")]
    InvalidDayCount(u32),
    #[error("plan starting {0} runs past the supported calendar")]
    DateOutOfRange(NaiveDate),
}

/// Inclusive first and last date of a plan of `days` days.
pub fn plan_range(start: NaiveDate, days: u32) -> Result<(NaiveDate, NaiveDate), PlannerError> {
    if days == 0 || days > MAX_PLAN_DAYS {
        return Err(PlannerError::InvalidDayCount(days));
    }

    let end = start
        .checked_add_signed(Duration::days(i64::from(days) - 1))
        .ok_or(PlannerError::DateOutOfRange(start))?;
    Ok((start, end))
}

/// Empty planned lunch and dinner slots for each day of the plan.
pub fn plan_week(start: NaiveDate, days: u32) -> Result<Vec<MealSlot>, PlannerError> {
    let (_, end) = plan_range(start, days)?;

    Ok(start
        .iter_days()
        .take_while(|date| *date <= end)
        .flat_map(|date| {
            MealTime::ordered()
                .into_iter()
                .map(move |time| MealSlot::new(date, time))
        })
        .collect())
}
