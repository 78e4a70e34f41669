use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    error::ApiError,
    state::AppState,
    users::{
        dto::{CreateUserRequest, UserResponse},
        extractors::SessionUser,
        services::{expired_session_cookie, new_user, session_cookie},
    },
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).get(get_user).delete(delete_user))
        .route("/users/session", post(rotate_session))
}

#[instrument(skip(state, payload))]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    let Json(payload) = payload?;
    let registration = new_user(payload)?;
    let session_id = registration.session_id;

    let user = state.users.create(registration).await?;
    info!(user_id = %user.id, "user registered");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(&state.config.session, session_id)?,
    );
    Ok((StatusCode::CREATED, headers))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn get_user(SessionUser(user): SessionUser) -> Json<UserResponse> {
    Json(UserResponse { user: user.into() })
}

/// Issues a fresh session token; the previous one stops working.
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn rotate_session(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<(HeaderMap, Json<UserResponse>), ApiError> {
    let session_id = Uuid::new_v4();
    let user = state
        .users
        .rotate_session(user.id, session_id)
        .await?
        .ok_or(ApiError::UnknownSession)?;
    info!("session reissued");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        session_cookie(&state.config.session, session_id)?,
    );
    Ok((headers, Json(UserResponse { user: user.into() })))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    SessionUser(user): SessionUser,
) -> Result<(StatusCode, HeaderMap), ApiError> {
    if !state.users.delete(user.id).await? {
        return Err(ApiError::UnknownSession);
    }
    info!("user deleted");

    let mut headers = HeaderMap::new();
    headers.insert(
        header::SET_COOKIE,
        expired_session_cookie(&state.config.session)?,
    );
    Ok((StatusCode::NO_CONTENT, headers))
}
