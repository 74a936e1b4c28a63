use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{
    corpus::{list_files, word_counts, WordCounts},
    error::{Error, Result},
    frequency::{FrequencyModel, FrequencyModelBuilder},
    label::Label,
};

/// Log priors of both labels, derived from relative corpus sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Priors {
    pub ham: f64,
    pub spam: f64,
}

/// Unnormalized log-posterior of a document for each label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub ham: f64,
    pub spam: f64,
}

impl Scores {
    /// Ham only when it strictly beats spam; ties go to spam.
    pub fn label(&self) -> Label {
        if self.ham > self.spam {
            Label::Ham
        } else {
            Label::Spam
        }
    }
}

/// How many documents of a batch landed in each bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub ham: usize,
    pub spam: usize,
}

impl Tally {
    pub fn record(&mut self, label: Label) {
        match label {
            Label::Ham => self.ham += 1,
            Label::Spam => self.spam += 1,
        }
    }

    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Ham => self.ham,
            Label::Spam => self.spam,
        }
    }

    pub fn total(&self) -> usize {
        self.ham + self.spam
    }
}

#[derive(Debug, Clone)]
pub struct Prediction {
    pub path: PathBuf,
    pub scores: Scores,
}

impl Prediction {
    pub fn label(&self) -> Label {
        self.scores.label()
    }
}

/// Outcome of classifying a directory whose documents all carry `expected`.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub expected: Label,
    pub tally: Tally,
    pub predictions: Vec<Prediction>,
}

impl Evaluation {
    /// Share of documents sorted into `expected`, or `None` for an empty batch.
    pub fn accuracy(&self) -> Option<f64> {
        match self.tally.total() {
            0 => None,
            total => Some(self.tally.get(self.expected) as f64 / total as f64),
        }
    }
}

/// Two-class Naive Bayes over word frequencies.
///
/// A word only takes part in scoring when both corpora contain it. Words
/// seen in just one corpus are skipped instead of smoothed, so a word that
/// only ever shows up in spam does not push a document towards spam. This
/// is a known approximation, kept for parity with reference results.
#[derive(Debug, Clone)]
pub struct NaiveBayesClassifier {
    ham: FrequencyModel,
    spam: FrequencyModel,
    total_ham: u64,
    total_spam: u64,
    total: u64,
}

impl NaiveBayesClassifier {
    pub fn new(ham: FrequencyModel, spam: FrequencyModel) -> Result<Self> {
        for (label, model) in [(Label::Ham, &ham), (Label::Spam, &spam)] {
            if model.total() == 0 {
                return Err(Error::Precondition(format!(
                    "{label} training corpus contains no words"
                )));
            }
        }

        let total_ham = ham.total();
        let total_spam = spam.total();

        Ok(NaiveBayesClassifier {
            ham,
            spam,
            total_ham,
            total_spam,
            total: total_ham + total_spam,
        })
    }

    /// Trains both models from their corpus directories. Any unreadable
    /// file aborts training; a label whose corpus holds no words is
    /// rejected by [`NaiveBayesClassifier::new`].
    pub fn train<P: AsRef<Path>>(ham_dirs: &[P], spam_dirs: &[P]) -> Result<Self> {
        let ham = Self::build_model(Label::Ham, ham_dirs)?;
        let spam = Self::build_model(Label::Spam, spam_dirs)?;

        Self::new(ham, spam)
    }

    fn build_model<P: AsRef<Path>>(label: Label, dirs: &[P]) -> Result<FrequencyModel> {
        let mut builder = FrequencyModelBuilder::new();
        let mut documents = 0;
        for dir in dirs {
            documents += builder.ingest_directory(dir)?;
        }
        let model = builder.build();

        info!(
            documents,
            vocabulary = model.vocabulary_len(),
            words = model.total(),
            "Processing {} complete!",
            label
        );
        Ok(model)
    }

    pub fn model(&self, label: Label) -> &FrequencyModel {
        match label {
            Label::Ham => &self.ham,
            Label::Spam => &self.spam,
        }
    }

    pub fn priors(&self) -> Priors {
        let total = self.total as f64;
        Priors {
            ham: (self.total_ham as f64 / total).ln(),
            spam: (self.total_spam as f64 / total).ln(),
        }
    }

    /// Scores a document's bag of words. Each distinct word counts once no
    /// matter how often it occurs in the document.
    pub fn score(&self, document: &WordCounts) -> Scores {
        let priors = self.priors();
        let total_ham = self.total_ham as f64;
        let total_spam = self.total_spam as f64;
        let total = self.total as f64;

        let mut p_d_ham = 0.0;
        let mut p_d_spam = 0.0;
        let mut p_d = 0.0;

        for word in document.keys() {
            let ham = self.ham.count(word);
            let spam = self.spam.count(word);
            if ham == 0 || spam == 0 {
                continue;
            }

            p_d_ham += (ham as f64 / total_ham).ln();
            p_d_spam += (spam as f64 / total_spam).ln();
            p_d += ((ham + spam) as f64 / total).ln();
        }

        Scores {
            ham: p_d_ham + priors.ham - p_d,
            spam: p_d_spam + priors.spam - p_d,
        }
    }

    pub fn classify_file<P: AsRef<Path>>(&self, path: P) -> Result<Scores> {
        let document = word_counts(path)?;
        Ok(self.score(&document))
    }

    /// Classifies every document under `dir`. Any unreadable document
    /// aborts the batch.
    pub fn classify_directory<P: AsRef<Path>>(&self, dir: P, expected: Label) -> Result<Evaluation> {
        let dir = dir.as_ref();
        info!("Categorizing {} in {}", expected, dir.display());

        let mut tally = Tally::default();
        let mut predictions = Vec::new();
        for path in list_files(dir)? {
            let scores = self.classify_file(&path)?;
            debug!(
                path = %path.display(),
                ham = scores.ham,
                spam = scores.spam,
                "classified as {}",
                scores.label()
            );

            tally.record(scores.label());
            predictions.push(Prediction { path, scores });
        }

        Ok(Evaluation {
            expected,
            tally,
            predictions,
        })
    }
}
