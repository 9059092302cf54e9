//! CEFR vocabulary reference, loaded once at startup and shared
//! read-only across every pipeline invocation.

use std::collections::HashMap;
use std::path::Path;

use nl_core::{CefrLevel, Config, Error, Result};
use tracing::{info, warn};

#[derive(Debug)]
pub struct VocabularyRef {
    words: HashMap<String, CefrLevel>,
}

impl VocabularyRef {
    /// Load the word list from a CSV file. The word and level columns are
    /// matched against the configured header-name candidates, so schema
    /// variants (`headword`/`cefr`) work without a file rewrite. A missing
    /// file, missing columns, or an empty list is fatal: the pipeline must
    /// refuse to run on a partial reference.
    pub fn load(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| Error::Init(format!("cannot open word list {}: {}", path.display(), e)))?;

        let headers = reader
            .headers()
            .map_err(|e| Error::Init(format!("cannot read word list headers: {}", e)))?
            .clone();
        let word_idx = find_column(&headers, &config.vocab_word_columns).ok_or_else(|| {
            Error::Init(format!(
                "word list {} has no word column (tried {:?})",
                path.display(),
                config.vocab_word_columns
            ))
        })?;
        let level_idx = find_column(&headers, &config.vocab_level_columns).ok_or_else(|| {
            Error::Init(format!(
                "word list {} has no level column (tried {:?})",
                path.display(),
                config.vocab_level_columns
            ))
        })?;

        let mut words = HashMap::new();
        let mut skipped = 0usize;
        for record in reader.records() {
            let record = record?;
            let word = match record.get(word_idx) {
                Some(w) if !w.trim().is_empty() => w.trim().to_lowercase(),
                _ => {
                    skipped += 1;
                    continue;
                }
            };
            match record.get(level_idx).unwrap_or("").parse::<CefrLevel>() {
                Ok(level) => {
                    words.insert(word, level);
                }
                Err(_) => skipped += 1,
            }
        }

        if words.is_empty() {
            return Err(Error::Init(format!(
                "word list {} contains no usable entries",
                path.display()
            )));
        }
        if skipped > 0 {
            warn!("skipped {} malformed word list rows", skipped);
        }
        info!("loaded {} words from {}", words.len(), path.display());
        Ok(Self { words })
    }

    pub fn contains(&self, lemma: &str) -> bool {
        self.words.contains_key(lemma)
    }

    pub fn level_of(&self, lemma: &str) -> Option<CefrLevel> {
        self.words.get(lemma).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Build a reference directly from entries. Test seam; production
    /// loading goes through `load`.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, CefrLevel)>) -> Self {
        Self {
            words: entries.into_iter().collect(),
        }
    }
}

fn find_column(headers: &csv::StringRecord, candidates: &[String]) -> Option<usize> {
    headers
        .iter()
        .position(|h| candidates.iter().any(|c| h.trim().eq_ignore_ascii_case(c)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_word_and_level_columns() {
        let file = write_csv("word,level\nElection,B2\npolicy,B1\nanalyst,C1\n");
        let vocab = VocabularyRef::load(file.path(), &Config::default()).unwrap();
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("election"));
        assert_eq!(vocab.level_of("policy"), Some(CefrLevel::B1));
        assert_eq!(vocab.level_of("missing"), None);
    }

    #[test]
    fn accepts_alternate_headword_schema() {
        let file = write_csv("headword,cefr\nborder,A2\n");
        let vocab = VocabularyRef::load(file.path(), &Config::default()).unwrap();
        assert_eq!(vocab.level_of("border"), Some(CefrLevel::A2));
    }

    #[test]
    fn missing_file_is_an_init_error() {
        let err = VocabularyRef::load("/no/such/file.csv", &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Init(_)));
    }

    #[test]
    fn missing_level_column_is_an_init_error() {
        let file = write_csv("word,frequency\nelection,12\n");
        let err = VocabularyRef::load(file.path(), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Init(_)));
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let file = write_csv("word,level\nelection,B2\nnoise,Z9\n,A1\n");
        let vocab = VocabularyRef::load(file.path(), &Config::default()).unwrap();
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn empty_list_is_an_init_error() {
        let file = write_csv("word,level\n");
        let err = VocabularyRef::load(file.path(), &Config::default()).unwrap_err();
        assert!(matches!(err, Error::Init(_)));
    }
}
