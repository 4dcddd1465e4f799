use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog recipes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub String);

/// Identifier wrapper for household members.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(pub String);

/// Identifier wrapper for meal slots.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub String);

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User-entered tag whose identity is its trimmed, lower-cased form.
///
/// The spelling the user typed is kept for display; equality, ordering and hashing only look
/// at the canonical key, so "Gluten", "gluten " and "GLUTEN" are the same tag everywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct CanonicalName {
    display: String,
    key: String,
}

impl CanonicalName {
    pub fn new(raw: &str) -> Self {
        let display = raw.trim().to_string();
        let key = display.to_lowercase();
        Self { display, key }
    }

    pub fn as_str(&self) -> &str {
        &self.display
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl From<String> for CanonicalName {
    fn from(value: String) -> Self {
        Self::new(&value)
    }
}

impl From<CanonicalName> for String {
    fn from(value: CanonicalName) -> Self {
        value.display
    }
}

impl PartialEq for CanonicalName {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CanonicalName {}

impl PartialOrd for CanonicalName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CanonicalName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl Hash for CanonicalName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display)
    }
}

/// Allergen tag shared by recipes and participants.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllergenName(CanonicalName);

impl AllergenName {
    pub fn new(raw: &str) -> Self {
        Self(CanonicalName::new(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for AllergenName {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for AllergenName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Companion dish suggested by a recipe and picked for a slot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SideDish(CanonicalName);

impl SideDish {
    pub fn new(raw: &str) -> Self {
        Self(CanonicalName::new(raw))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for SideDish {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for SideDish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Meal occasion of a slot. Lunch sorts before dinner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealTime {
    Lunch,
    Dinner,
}

impl MealTime {
    pub const fn ordered() -> [Self; 2] {
        [Self::Lunch, Self::Dinner]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

/// Occasions a recipe is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeTime {
    Lunch,
    Dinner,
    #[default]
    Both,
}

impl RecipeTime {
    pub const fn suits(self, time: MealTime) -> bool {
        matches!(
            (self, time),
            (Self::Both, _) | (Self::Lunch, MealTime::Lunch) | (Self::Dinner, MealTime::Dinner)
        )
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Both => "both",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    Pasta,
    Meat,
    Fish,
    Soup,
    Salad,
    FastFood,
    Vegetarian,
    #[default]
    Other,
}

impl RecipeCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pasta => "Pasta",
            Self::Meat => "Meat",
            Self::Fish => "Fish",
            Self::Soup => "Soup",
            Self::Salad => "Salad",
            Self::FastFood => "Fast food",
            Self::Vegetarian => "Vegetarian",
            Self::Other => "Other",
        }
    }
}

/// What happens at a slot. Only `Planned` slots are cooked at home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    #[default]
    Planned,
    Restaurant,
    Absent,
    Work,
    Leftovers,
    Shopping,
    Skipped,
}

impl SlotStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Restaurant => "restaurant",
            Self::Absent => "absent",
            Self::Work => "work",
            Self::Leftovers => "leftovers",
            Self::Shopping => "shopping",
            Self::Skipped => "skipped",
        }
    }

    pub const fn is_planned(self) -> bool {
        matches!(self, Self::Planned)
    }
}

impl FromStr for SlotStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "planned" => Ok(Self::Planned),
            "restaurant" => Ok(Self::Restaurant),
            "absent" => Ok(Self::Absent),
            "work" => Ok(Self::Work),
            "leftovers" => Ok(Self::Leftovers),
            "shopping" => Ok(Self::Shopping),
            "skipped" => Ok(Self::Skipped),
            other => Err(format!("unknown slot status '{other}'")),
        }
    }
}

/// Catalog entry the engine can assign to a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    pub prep_minutes: u32,
    #[serde(default)]
    pub time: RecipeTime,
    #[serde(default)]
    pub category: RecipeCategory,
    #[serde(default)]
    pub allergens: BTreeSet<AllergenName>,
    #[serde(default)]
    pub requires_free_time: bool,
    #[serde(default)]
    pub side_dishes: Vec<SideDish>,
    #[serde(default)]
    pub rating: u8,
    #[serde(default)]
    pub instructions: String,
}

impl Recipe {
    pub fn new(id: &str, name: &str, prep_minutes: u32) -> Self {
        Self {
            id: RecipeId(id.to_string()),
            name: name.to_string(),
            prep_minutes,
            time: RecipeTime::Both,
            category: RecipeCategory::Other,
            allergens: BTreeSet::new(),
            requires_free_time: false,
            side_dishes: Vec::new(),
            rating: 0,
            instructions: String::new(),
        }
    }

    pub fn with_time(mut self, time: RecipeTime) -> Self {
        self.time = time;
        self
    }

    pub fn with_category(mut self, category: RecipeCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_allergens(mut self, allergens: &[&str]) -> Self {
        self.allergens = allergens.iter().map(|name| AllergenName::new(name)).collect();
        self
    }

    pub fn with_side_dishes(mut self, sides: &[&str]) -> Self {
        self.side_dishes = sides.iter().map(|name| SideDish::new(name)).collect();
        self
    }

    pub fn requiring_free_time(mut self) -> Self {
        self.requires_free_time = true;
        self
    }

    /// Star rating, capped at five.
    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = rating.min(5);
        self
    }

    pub fn conflicts_with(&self, excluded: &BTreeSet<AllergenName>) -> bool {
        !self.allergens.is_disjoint(excluded)
    }
}

/// Household member whose allergies constrain the slots they attend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub allergens: BTreeSet<AllergenName>,
}

fn default_active() -> bool {
    true
}

impl Participant {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: ParticipantId(id.to_string()),
            name: name.to_string(),
            active: true,
            allergens: BTreeSet::new(),
        }
    }

    pub fn with_allergens(mut self, allergens: &[&str]) -> Self {
        self.allergens = allergens.iter().map(|name| AllergenName::new(name)).collect();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// One meal occasion of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealSlot {
    pub id: SlotId,
    pub date: NaiveDate,
    pub time: MealTime,
    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default)]
    pub recipe: Option<RecipeId>,
    #[serde(default)]
    pub side_dishes: Vec<SideDish>,
    /// Explicit attendees; `None` means the whole active household.
    #[serde(default)]
    pub attendees: Option<BTreeSet<ParticipantId>>,
}

impl MealSlot {
    pub fn new(date: NaiveDate, time: MealTime) -> Self {
        Self {
            id: Self::slot_id(date, time),
            date,
            time,
            status: SlotStatus::Planned,
            recipe: None,
            side_dishes: Vec::new(),
            attendees: None,
        }
    }

    pub fn slot_id(date: NaiveDate, time: MealTime) -> SlotId {
        SlotId(format!("{}-{}", date.format("%Y-%m-%d"), time.label()))
    }

    pub fn with_attendees(mut self, attendees: &[&str]) -> Self {
        self.attendees = Some(
            attendees
                .iter()
                .map(|id| ParticipantId(id.to_string()))
                .collect(),
        );
        self
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn chronological_key(&self) -> (NaiveDate, MealTime) {
        (self.date, self.time)
    }

    /// Non-planned statuses never keep a recipe or side dishes.
    pub fn set_status(&mut self, status: SlotStatus) {
        self.status = status;
        if !status.is_planned() {
            self.clear_assignment();
        }
    }

    pub fn assign(&mut self, recipe: RecipeId, side_dish: Option<SideDish>) {
        self.recipe = Some(recipe);
        self.side_dishes = side_dish.into_iter().collect();
    }

    pub fn clear_assignment(&mut self) {
        self.recipe = None;
        self.side_dishes.clear();
    }
}
