use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/charts", get(handlers::get_charts))
        .route("/api/click", post(handlers::click))
        .route("/api/tables", get(handlers::get_tables))
        .with_state(state)
}
