//! Command-line entry point: train on the configured corpus sets, then
//! categorize the held-out set and print the tallies.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spam_bayes::{report, Config, Label, NaiveBayesClassifier};

#[derive(Parser)]
#[command(name = "spam_bayes")]
#[command(about = "Classify mail as ham or spam with Naive Bayes", long_about = None)]
struct Cli {
    /// TOML file describing the corpus layout
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the corpus sets
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Training set name (repeatable)
    #[arg(short, long = "train")]
    train: Vec<String>,

    /// Evaluation set name
    #[arg(short, long = "eval")]
    eval: Option<String>,

    /// Write per-document predictions to this CSV file
    #[arg(short, long)]
    predictions: Option<PathBuf>,

    /// Log per-document scores
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Config::from_file(path)
                    .with_context(|| format!("failed to load {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if !self.train.is_empty() {
            config.training_sets = self.train.clone();
        }
        if let Some(eval) = &self.eval {
            config.evaluation_set = eval.clone();
        }
        if let Some(predictions) = &self.predictions {
            config.predictions = Some(predictions.clone());
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "spam_bayes=debug"
    } else {
        "spam_bayes=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.load_config()?;
    config.validate()?;

    let classifier = NaiveBayesClassifier::train(
        &config.training_dirs(Label::Ham),
        &config.training_dirs(Label::Spam),
    )
    .context("training failed")?;

    let mut evaluations = Vec::with_capacity(Label::ALL.len());
    for label in Label::ALL {
        let evaluation = classifier
            .classify_directory(config.evaluation_dir(label), label)
            .with_context(|| format!("failed to categorize {label} mails"))?;

        if let Some(accuracy) = evaluation.accuracy() {
            info!("{} accuracy: {:.2}%", label, accuracy * 100.0);
        }
        print!("{}", report::summary(&evaluation));
        evaluations.push(evaluation);
    }

    if let Some(path) = &config.predictions {
        report::write_predictions(path, &evaluations)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote predictions to {}", path.display());
    }

    Ok(())
}
