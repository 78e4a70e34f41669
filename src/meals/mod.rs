mod dto;
mod handlers;
mod repo;
mod repo_types;
mod services;

use crate::state::AppState;
use axum::Router;

pub use repo::MealLedger;
pub use repo_types::{LedgerEntry, Meal, MealChanges, NewMeal};

pub fn router() -> Router<AppState> {
    handlers::meal_routes()
}
