use std::path::Path;

use tracing::{debug, info};

use crate::{
    corpus::{count_words, list_files, read_document, WordCounts},
    error::Result,
    tokenize::{decode, tokenize},
};

/// Word counts aggregated over a whole labeled corpus. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct FrequencyModel {
    counts: WordCounts,
    total: u64,
}

impl FrequencyModel {
    /// Occurrences of `word` in the corpus, zero if it never appeared.
    pub fn count(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Sum of all word counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn vocabulary_len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, &count)| (word.as_str(), count))
    }
}

/// Accumulates word counts for one label, then freezes them into a
/// [`FrequencyModel`].
#[derive(Debug, Default)]
pub struct FrequencyModelBuilder {
    counts: WordCounts,
}

impl FrequencyModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ingest_words<'a, I>(&mut self, words: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        count_words(words, &mut self.counts);
    }

    pub fn ingest_document<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = read_document(path)?;
        self.ingest_words(tokenize(&decode(&bytes)));
        Ok(())
    }

    /// Ingests every file under `dir`, recursively. The first unreadable
    /// file aborts the whole directory.
    pub fn ingest_directory<P: AsRef<Path>>(&mut self, dir: P) -> Result<usize> {
        let dir = dir.as_ref();
        info!("Processing {}", dir.display());

        let files = list_files(dir)?;
        for file in &files {
            self.ingest_document(file)?;
        }
        Ok(files.len())
    }

    pub fn build(self) -> FrequencyModel {
        let total: u64 = self.counts.values().sum();
        debug!(vocabulary = self.counts.len(), total, "built frequency model");

        FrequencyModel {
            counts: self.counts,
            total,
        }
    }
}

impl<'a> FromIterator<&'a str> for FrequencyModel {
    fn from_iter<I: IntoIterator<Item = &'a str>>(words: I) -> Self {
        let mut builder = FrequencyModelBuilder::new();
        builder.ingest_words(words);
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn assert_total_is_sum(model: &FrequencyModel) {
        assert_eq!(model.total(), model.iter().map(|(_, c)| c).sum::<u64>());
    }

    #[test]
    fn counts_each_occurrence() {
        let words = ["free", "win", "free", "meeting", "free"];
        let model: FrequencyModel = words.into_iter().collect();

        assert_eq!(model.total(), words.len() as u64);
        assert_eq!(model.count("free"), 3);
        assert_eq!(model.count("win"), 1);
        assert_eq!(model.count("meeting"), 1);
        assert_eq!(model.count("absent"), 0);
        assert_eq!(model.vocabulary_len(), 3);
        assert_total_is_sum(&model);
    }

    #[test]
    fn no_zero_entries() {
        let model: FrequencyModel = ["a", "b", "a"].into_iter().collect();
        assert!(model.iter().all(|(_, count)| count >= 1));
    }

    #[test]
    fn empty_builder_has_zero_total() {
        let model = FrequencyModelBuilder::new().build();
        assert_eq!(model.total(), 0);
        assert_eq!(model.vocabulary_len(), 0);
    }

    #[test]
    fn repeated_ingestion_accumulates() {
        let mut builder = FrequencyModelBuilder::new();
        builder.ingest_words(["Free", "money"]);
        builder.ingest_words(["Free"]);
        let model = builder.build();

        assert_eq!(model.count("Free"), 2);
        assert_eq!(model.count("free"), 0);
        assert_eq!(model.total(), 3);
        assert_total_is_sum(&model);
    }

    #[test]
    fn ingests_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("one.txt"), "win a prize, win!").unwrap();
        fs::write(dir.path().join("nested/two.txt"), "prize 100").unwrap();

        let mut builder = FrequencyModelBuilder::new();
        let files = builder.ingest_directory(dir.path()).unwrap();
        let model = builder.build();

        assert_eq!(files, 2);
        assert_eq!(model.count("win"), 2);
        assert_eq!(model.count("prize"), 2);
        assert_eq!(model.count("a"), 1);
        assert_eq!(model.total(), 5);
        assert_total_is_sum(&model);
    }

    #[test]
    fn missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut builder = FrequencyModelBuilder::new();
        assert!(builder.ingest_directory(dir.path().join("gone")).is_err());
    }
}
