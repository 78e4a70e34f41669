use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::dto::{
    CreateMealRequest, MealListResponse, MealResponse, UpdateMealRequest,
};
use super::services::{meal_changes, new_meal};
use crate::{error::ApiError, state::AppState, users::extractors::SessionUser};

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route(
            "/meals/:id",
            get(get_meal).put(update_meal).delete(delete_meal),
        )
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn list_meals(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<MealListResponse>, ApiError> {
    let meals = state.meals.list(user.id).await?;
    Ok(Json(MealListResponse {
        meals: meals.into_iter().map(Into::into).collect(),
    }))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    payload: Result<Json<CreateMealRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MealResponse>), ApiError> {
    let Json(payload) = payload?;
    let meal = state.meals.create(user.id, new_meal(payload)?).await?;
    info!(meal_id = %meal.id, is_in_diet = meal.is_in_diet, "meal created");
    Ok((StatusCode::CREATED, Json(MealResponse { meal: meal.into() })))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn get_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<MealResponse>, ApiError> {
    let Path(id) = id?;
    let meal = state
        .meals
        .get(user.id, id)
        .await?
        .ok_or(ApiError::MealNotFound)?;
    Ok(Json(MealResponse { meal: meal.into() }))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn update_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateMealRequest>, JsonRejection>,
) -> Result<Json<MealResponse>, ApiError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let changes = meal_changes(payload)?;
    let meal = state
        .meals
        .update(user.id, id, changes)
        .await?
        .ok_or(ApiError::MealNotFound)?;
    info!(meal_id = %meal.id, update_seq = meal.update_seq, "meal updated");
    Ok(Json(MealResponse { meal: meal.into() }))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn delete_meal(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if !state.meals.delete(user.id, id).await? {
        return Err(ApiError::MealNotFound);
    }
    info!(meal_id = %id, "meal deleted");
    Ok(StatusCode::NO_CONTENT)
}
