pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod repo;
mod repo_types;
pub mod services;
pub mod validation;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::user_routes()
}
