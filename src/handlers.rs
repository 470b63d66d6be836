use crate::errors::AppError;
use crate::models::{ChartsResponse, ClickRequest, ClickResponse, TablesResponse};
use crate::state::AppState;
use crate::ui::render_index;
use crate::widgets;
use axum::{
    Json,
    extract::State,
    http::header::{CACHE_CONTROL, HeaderName, PRAGMA},
    response::Html,
};

type NoCache = [(HeaderName, &'static str); 2];

fn no_cache() -> NoCache {
    [
        (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        (PRAGMA, "no-cache"),
    ]
}

pub async fn index(State(state): State<AppState>) -> (NoCache, Html<String>) {
    let dashboard = state.dashboard.lock().await;
    (no_cache(), Html(render_index(dashboard.features())))
}

pub async fn get_charts(
    State(state): State<AppState>,
) -> Result<(NoCache, Json<ChartsResponse>), AppError> {
    let dashboard = state.dashboard.lock().await;
    Ok((no_cache(), Json(dashboard.charts())))
}

pub async fn click(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> Result<(NoCache, Json<ClickResponse>), AppError> {
    let widget = payload.widget.trim();
    if widgets::spec(widget).is_none() {
        return Err(AppError::bad_request(format!("unknown widget '{widget}'")));
    }

    let dashboard = state.dashboard.lock().await;
    let open = dashboard.click(widget, payload.dataset, payload.index)?;
    Ok((no_cache(), Json(ClickResponse { open })))
}

pub async fn get_tables(
    State(state): State<AppState>,
) -> Result<(NoCache, Json<TablesResponse>), AppError> {
    let dashboard = state.dashboard.lock().await;
    match dashboard.tables()? {
        Some(tables) => Ok((no_cache(), Json(tables))),
        None => Err(AppError::not_found("tables are disabled")),
    }
}
