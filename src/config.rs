//! Corpus layout configuration.
//!
//! A data directory holds one subdirectory per corpus set, each split into
//! `ham/` and `spam/`:
//!
//! ```text
//! <data_dir>/enron1/ham/...
//! <data_dir>/enron1/spam/...
//! ...
//! <data_dir>/enron6/ham/...
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    corpus::list_files,
    error::{Error, Result},
    label::Label,
};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory containing the corpus sets
    pub data_dir: PathBuf,
    /// Sets whose mails train the models
    pub training_sets: Vec<String>,
    /// Set whose mails are classified and counted
    pub evaluation_set: String,
    /// Where to write per-document predictions, if anywhere
    pub predictions: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_dir: PathBuf::from("."),
            training_sets: (1..=5).map(|i| format!("enron{i}")).collect(),
            evaluation_set: "enron6".to_string(),
            predictions: None,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn training_dirs(&self, label: Label) -> Vec<PathBuf> {
        self.training_sets
            .iter()
            .map(|set| self.data_dir.join(set).join(label.as_str()))
            .collect()
    }

    pub fn evaluation_dir(&self, label: Label) -> PathBuf {
        self.data_dir
            .join(&self.evaluation_set)
            .join(label.as_str())
    }

    /// Checks the corpus layout before any mail is read: every corpus
    /// directory must exist and each label needs at least one training mail.
    pub fn validate(&self) -> Result<()> {
        if self.training_sets.is_empty() {
            return Err(Error::Config("no training sets configured".to_string()));
        }

        for label in Label::ALL {
            let dirs = self
                .training_dirs(label)
                .into_iter()
                .chain(std::iter::once(self.evaluation_dir(label)));
            for dir in dirs {
                if !dir.is_dir() {
                    return Err(Error::Config(format!(
                        "missing {} corpus directory {}",
                        label,
                        dir.display()
                    )));
                }
            }

            let mut documents = 0;
            for dir in self.training_dirs(label) {
                documents += list_files(&dir)?.len();
            }
            if documents == 0 {
                return Err(Error::Config(format!(
                    "no {label} training documents found"
                )));
            }
        }

        Ok(())
    }
}
