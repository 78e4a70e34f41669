use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Meal record in the ledger.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Meal {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub date_time: OffsetDateTime, // when the meal happened, user supplied
    pub is_in_diet: bool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime, // bumped on every write
    pub update_seq: i64,            // tie-break for equal updated_at
}

/// Validated input for a new meal.
#[derive(Debug, Clone)]
pub struct NewMeal {
    pub name: String,
    pub description: String,
    pub date_time: OffsetDateTime,
    pub is_in_diet: bool,
}

/// Validated partial edit. `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct MealChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub date_time: Option<OffsetDateTime>,
    pub is_in_diet: Option<bool>,
}

impl MealChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.date_time.is_none()
            && self.is_in_diet.is_none()
    }

    pub fn apply(self, meal: &mut Meal) {
        if let Some(name) = self.name {
            meal.name = name;
        }
        if let Some(description) = self.description {
            meal.description = description;
        }
        if let Some(date_time) = self.date_time {
            meal.date_time = date_time;
        }
        if let Some(is_in_diet) = self.is_in_diet {
            meal.is_in_diet = is_in_diet;
        }
    }
}

/// The slice of a meal the metrics engine reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct LedgerEntry {
    pub updated_at: OffsetDateTime,
    pub update_seq: i64,
    pub is_in_diet: bool,
}

impl From<&Meal> for LedgerEntry {
    fn from(m: &Meal) -> Self {
        Self {
            updated_at: m.updated_at,
            update_seq: m.update_seq,
            is_in_diet: m.is_in_diet,
        }
    }
}
