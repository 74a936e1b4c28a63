use std::path::Path;

use crate::{bayes::Evaluation, error::Result, label::Label};

fn title(label: Label) -> &'static str {
    match label {
        Label::Ham => "Ham",
        Label::Spam => "Spam",
    }
}

/// Console summary of one evaluation run.
pub fn summary(evaluation: &Evaluation) -> String {
    format!(
        "Categorized {}:\n  Hams: {}\n  Spams: {}\n",
        title(evaluation.expected),
        evaluation.tally.ham,
        evaluation.tally.spam
    )
}

/// Writes every prediction of every run to a CSV file.
pub fn write_predictions<P: AsRef<Path>>(path: P, evaluations: &[Evaluation]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(["path", "expected", "predicted", "ham_score", "spam_score"])?;
    for evaluation in evaluations {
        for prediction in &evaluation.predictions {
            writer.write_record(&[
                prediction.path.display().to_string(),
                evaluation.expected.to_string(),
                prediction.label().to_string(),
                prediction.scores.ham.to_string(),
                prediction.scores.spam.to_string(),
            ])?;
        }
    }
    writer.flush().map_err(csv::Error::from)?;

    Ok(())
}
