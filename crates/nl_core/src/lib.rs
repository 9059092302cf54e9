pub mod config;
pub mod error;
pub mod extract;
pub mod storage;
pub mod types;

pub use config::{Config, Strategy};
pub use error::Error;
pub use extract::KeywordExtractor;
pub use storage::ArticleStore;
pub use types::{CefrLevel, EnrichedArticle, KeywordEntry, RankedKeyword, RawArticle, UNKNOWN};

pub type Result<T> = std::result::Result<T, Error>;
