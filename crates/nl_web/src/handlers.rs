use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use nl_core::Error;
use serde_json::json;
use tracing::error;

use crate::AppState;

pub async fn status() -> impl IntoResponse {
    Json(json!({ "status": "newslex is running" }))
}

pub async fn list_sources(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.pipeline.sources())
}

/// Run one crawl cycle now and return the batch. Best-effort: an empty
/// batch is a valid 200 answer; only an unknown source or a persistence
/// failure is an error.
pub async fn crawl_source(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Response {
    match state.pipeline.crawl(&source).await {
        Ok(articles) => Json(articles).into_response(),
        Err(Error::UnknownSource(name)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("unknown source: {}", name) })),
        )
            .into_response(),
        Err(e) => {
            error!("crawl failed for {}: {}", source, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn articles_by_date(
    State(state): State<Arc<AppState>>,
    Path(date): Path<String>,
) -> Response {
    let Ok(date) = date.parse::<NaiveDate>() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "expected date as YYYY-MM-DD" })),
        )
            .into_response();
    };

    match state.store.find_by_date(date).await {
        Ok(articles) if articles.is_empty() => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": format!("no data for {}", date) })),
        )
            .into_response(),
        Ok(articles) => Json(articles).into_response(),
        Err(e) => {
            error!("date query failed for {}: {}", date, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": e.to_string() })),
            )
                .into_response()
        }
    }
}
