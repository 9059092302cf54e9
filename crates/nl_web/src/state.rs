use std::sync::Arc;

use nl_core::ArticleStore;
use nl_sources::CrawlPipeline;

pub struct AppState {
    pub pipeline: Arc<CrawlPipeline>,
    pub store: Arc<dyn ArticleStore>,
}

impl AppState {
    pub fn new(pipeline: Arc<CrawlPipeline>, store: Arc<dyn ArticleStore>) -> Self {
        Self { pipeline, store }
    }
}
