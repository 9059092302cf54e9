pub mod normalize;
pub mod strategies;
pub mod vocab;

pub use strategies::create_extractor;
pub use vocab::VocabularyRef;

pub mod prelude {
    pub use crate::strategies::create_extractor;
    pub use crate::vocab::VocabularyRef;
    pub use nl_core::{Error, KeywordExtractor, RankedKeyword, Result};
}
