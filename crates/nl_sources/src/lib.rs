pub mod adapters;
pub mod enrich;
pub mod pipeline;
pub mod registry;

pub use adapters::SourceAdapter;
pub use enrich::{Enrichment, EnrichmentClient};
pub use pipeline::CrawlPipeline;
pub use registry::SourceRegistry;

pub mod prelude {
    pub use crate::adapters::SourceAdapter;
    pub use crate::pipeline::CrawlPipeline;
    pub use crate::registry::SourceRegistry;
    pub use nl_core::{Error, RawArticle, Result};
}
