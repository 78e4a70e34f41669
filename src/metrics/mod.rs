mod dto;
pub mod engine;
mod handlers;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::metrics_routes()
}
