use std::sync::Arc;

use nl_core::{Config, KeywordExtractor, Strategy};

use crate::vocab::VocabularyRef;

pub mod embedding;
pub mod membership;
pub mod tfidf;

pub use embedding::EmbeddingExtractor;
pub use membership::MembershipExtractor;
pub use tfidf::TfIdfExtractor;

/// A document below this many candidate lemmas is degenerate: every
/// strategy yields an empty list for it without touching its siblings.
pub(crate) const MIN_DOC_TOKENS: usize = 5;

/// Build the extractor the configuration asks for. Strategies share one
/// contract, so the rest of the pipeline never knows which one is active.
pub fn create_extractor(config: &Config, vocab: Arc<VocabularyRef>) -> Box<dyn KeywordExtractor> {
    match config.strategy {
        Strategy::Membership => Box::new(MembershipExtractor::new(vocab, config.keyword_limit)),
        Strategy::TfIdf => Box::new(TfIdfExtractor::new(
            vocab,
            config.keyword_limit,
            config.min_df,
            config.max_df,
        )),
        Strategy::Embedding => Box::new(EmbeddingExtractor::new(
            vocab,
            config.keyword_limit,
            config.primary_threshold,
            config.secondary_threshold,
        )),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use nl_core::CefrLevel;

    use crate::vocab::VocabularyRef;

    pub fn news_vocab() -> Arc<VocabularyRef> {
        Arc::new(VocabularyRef::from_entries([
            ("election".to_string(), CefrLevel::B2),
            ("policy".to_string(), CefrLevel::B1),
            ("analyst".to_string(), CefrLevel::C1),
            ("government".to_string(), CefrLevel::A2),
            ("economy".to_string(), CefrLevel::B1),
            ("inflation".to_string(), CefrLevel::C1),
            ("minister".to_string(), CefrLevel::B1),
            ("border".to_string(), CefrLevel::A2),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nl_core::Strategy;

    #[test]
    fn factory_honours_configured_strategy() {
        let vocab = test_support::news_vocab();
        let mut config = Config::default();

        config.strategy = Strategy::Membership;
        assert_eq!(create_extractor(&config, vocab.clone()).name(), "membership");
        config.strategy = Strategy::TfIdf;
        assert_eq!(create_extractor(&config, vocab.clone()).name(), "tfidf");
        config.strategy = Strategy::Embedding;
        assert_eq!(create_extractor(&config, vocab).name(), "embedding");
    }
}
