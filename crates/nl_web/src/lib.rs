use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod scheduler;
pub mod state;

pub use scheduler::DailyScheduler;
pub use state::AppState;

pub async fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    Router::new()
        .route("/", get(handlers::status))
        .route("/sources", get(handlers::list_sources))
        .route("/crawl/:source", get(handlers::crawl_source))
        .route("/articles/:date", get(handlers::articles_by_date))
        .layer(cors)
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, AppState, DailyScheduler};
    pub use nl_core::{EnrichedArticle, Error, Result};
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use nl_core::{ArticleStore, CefrLevel, Config, KeywordExtractor};
    use nl_extract::{create_extractor, VocabularyRef};
    use nl_sources::{CrawlPipeline, SourceRegistry};
    use nl_storage::MemoryStore;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let vocab = Arc::new(VocabularyRef::from_entries([(
            "election".to_string(),
            CefrLevel::B2,
        )]));
        let extractor: Arc<dyn KeywordExtractor> =
            create_extractor(&Config::default(), vocab.clone()).into();
        let store: Arc<dyn ArticleStore> = Arc::new(MemoryStore::new());
        let pipeline = Arc::new(CrawlPipeline::new(
            Arc::new(SourceRegistry::new()),
            extractor,
            vocab,
            store.clone(),
            5,
        ));
        create_app(AppState::new(pipeline, store)).await
    }

    #[tokio::test]
    async fn status_endpoint_responds() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_source_is_not_found() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::get("/crawl/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_date_is_bad_request() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::get("/articles/not-a-date")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_day_is_explicit_no_data() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::get("/articles/2026-08-24")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
