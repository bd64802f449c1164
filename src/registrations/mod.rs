use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod repo;
pub mod repo_types;
mod services;
mod views;

pub fn router() -> Router<AppState> {
    handlers::registration_routes()
}
