//! spam_bayes: trains a word-frequency Naive Bayes classifier on labeled
//! ham/spam mail corpora and reports how a held-out set gets categorized.
//!
//! ```no_run
//! use spam_bayes::{Label, NaiveBayesClassifier};
//!
//! let classifier = NaiveBayesClassifier::train(&["enron1/ham"], &["enron1/spam"])?;
//! let evaluation = classifier.classify_directory("enron6/spam", Label::Spam)?;
//! println!("{}", spam_bayes::report::summary(&evaluation));
//! # Ok::<(), spam_bayes::Error>(())
//! ```

pub mod bayes;
pub mod config;
pub mod corpus;
pub mod error;
pub mod frequency;
pub mod label;
pub mod report;
pub mod tokenize;

pub use bayes::{Evaluation, NaiveBayesClassifier, Scores, Tally};
pub use config::Config;
pub use error::{Error, Result};
pub use frequency::{FrequencyModel, FrequencyModelBuilder};
pub use label::Label;
