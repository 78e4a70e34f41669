use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::dto::{
    BestSequenceResponse, InDietResponse, MetricsResponse, OutOfDietResponse, TotalResponse,
};
use super::engine::Metrics;
use super::services::load_metrics;
use crate::{error::ApiError, state::AppState, users::extractors::SessionUser};

pub fn metrics_routes() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(all_metrics))
        .route("/metrics/total", get(total_of_meals))
        .route("/metrics/inDiet", get(total_in_diet))
        .route("/metrics/outOfDiet", get(total_out_of_diet))
        .route("/metrics/bestStraightInDiet", get(best_sequence_in_diet))
}

async fn metrics_for(state: &AppState, user_id: Uuid) -> Result<Metrics, ApiError> {
    let metrics = load_metrics(state, user_id).await?;
    debug!(?metrics, "metrics computed");
    Ok(metrics)
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn all_metrics(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<MetricsResponse>, ApiError> {
    Ok(Json(metrics_for(&state, user.id).await?.into()))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn total_of_meals(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<TotalResponse>, ApiError> {
    Ok(Json(metrics_for(&state, user.id).await?.into()))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn total_in_diet(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<InDietResponse>, ApiError> {
    Ok(Json(metrics_for(&state, user.id).await?.into()))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn total_out_of_diet(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<OutOfDietResponse>, ApiError> {
    Ok(Json(metrics_for(&state, user.id).await?.into()))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn best_sequence_in_diet(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<Json<BestSequenceResponse>, ApiError> {
    Ok(Json(metrics_for(&state, user.id).await?.into()))
}
