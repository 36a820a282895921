use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
mod password;
pub mod repo;
pub mod session;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::user_routes())
}
