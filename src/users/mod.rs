use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

pub use repo::UserStore;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
