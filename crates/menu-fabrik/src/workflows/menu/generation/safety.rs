use std::collections::BTreeSet;

use tracing::warn;

use super::super::domain::{AllergenName, MealSlot, Participant, ParticipantId, Recipe};

/// Where the attendee list of a slot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendeeSource {
    /// The slot names its attendees.
    Explicit,
    /// The slot names nobody, so every active household member attends.
    Household,
}

/// Participants whose allergies constrain one slot.
#[derive(Debug, Clone)]
pub struct Attendees<'a> {
    pub source: AttendeeSource,
    pub participants: Vec<&'a Participant>,
}

impl Attendees<'_> {
    pub fn excluded_allergens(&self) -> BTreeSet<AllergenName> {
        self.participants
            .iter()
            .flat_map(|participant| participant.allergens.iter().cloned())
            .collect()
    }
}

/// Explicit attendees are looked up in the roster regardless of their active flag. An absent or
/// empty attendee set falls back to the active members of the roster.
pub fn resolve_attendees<'a>(slot: &MealSlot, roster: &'a [Participant]) -> Attendees<'a> {
    match &slot.attendees {
        Some(ids) if !ids.is_empty() => {
            let participants: Vec<&Participant> = roster
                .iter()
                .filter(|participant| ids.contains(&participant.id))
                .collect();

            let unknown: Vec<&ParticipantId> = ids
                .iter()
                .filter(|id| !participants.iter().any(|participant| &participant.id == *id))
                .collect();
            if !unknown.is_empty() {
                warn!(slot = %slot.id, ?unknown, "slot lists attendees missing from the household");
            }

            Attendees {
                source: AttendeeSource::Explicit,
                participants,
            }
        }
        _ => Attendees {
            source: AttendeeSource::Household,
            participants: roster.iter().filter(|participant| participant.active).collect(),
        },
    }
}

pub fn safe_recipes<'r>(recipes: &'r [Recipe], excluded: &BTreeSet<AllergenName>) -> Vec<&'r Recipe> {
    recipes
        .iter()
        .filter(|recipe| !recipe.conflicts_with(excluded))
        .collect()
}
