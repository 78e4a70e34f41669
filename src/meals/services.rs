use crate::error::ApiError;

use super::dto::{CreateMealRequest, UpdateMealRequest};
use super::repo_types::{MealChanges, NewMeal};

const MAX_NAME_LEN: usize = 120;

fn validate_name(name: &str) -> Result<String, ApiError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ApiError::Validation("Meal name is required.".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::Validation(format!(
            "Meal name must be at most {MAX_NAME_LEN} characters."
        )));
    }
    Ok(name.to_string())
}

pub fn new_meal(req: CreateMealRequest) -> Result<NewMeal, ApiError> {
    Ok(NewMeal {
        name: validate_name(&req.name)?,
        description: req.description.trim().to_string(),
        date_time: req.date_time,
        is_in_diet: req.is_in_diet.0,
    })
}

pub fn meal_changes(req: UpdateMealRequest) -> Result<MealChanges, ApiError> {
    let changes = MealChanges {
        name: req.name.as_deref().map(validate_name).transpose()?,
        description: req.description.map(|d| d.trim().to_string()),
        date_time: req.date_time,
        is_in_diet: req.is_in_diet.map(|f| f.0),
    };
    if changes.is_empty() {
        return Err(ApiError::Validation("Nothing to update.".into()));
    }
    Ok(changes)
}
