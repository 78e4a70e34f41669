use serde::{Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::Meal;

/// In-diet flag as sent by clients: `true`/`false` or `1`/`0`.
/// Converted to `bool` once, here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InDietFlag(pub bool);

impl<'de> Deserialize<'de> for InDietFlag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(i64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(Self(b)),
            Raw::Int(0) => Ok(Self(false)),
            Raw::Int(1) => Ok(Self(true)),
            Raw::Int(other) => Err(serde::de::Error::custom(format!(
                "isInDiet must be a boolean, 0 or 1 (got {other})"
            ))),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMealRequest {
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    pub is_in_diet: InDietFlag,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub date_time: Option<OffsetDateTime>,
    pub is_in_diet: Option<InDietFlag>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealListItem {
    pub id: Uuid,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    pub is_in_diet: bool,
}

impl From<Meal> for MealListItem {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            name: m.name,
            date_time: m.date_time,
            is_in_diet: m.is_in_diet,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealDetails {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    pub is_in_diet: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    pub user_id: Uuid,
}

impl From<Meal> for MealDetails {
    fn from(m: Meal) -> Self {
        Self {
            id: m.id,
            name: m.name,
            description: m.description,
            date_time: m.date_time,
            is_in_diet: m.is_in_diet,
            created_at: m.created_at,
            updated_at: m.updated_at,
            user_id: m.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MealListResponse {
    pub meals: Vec<MealListItem>,
}

#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub meal: MealDetails,
}
