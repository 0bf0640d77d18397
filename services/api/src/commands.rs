use crate::infra::{read_json_file, resolve_artifact_dir};
use clap::Args;
use focus_score::config::AppConfig;
use focus_score::error::AppError;
use focus_score::prediction::{
    CategoricalField, FormAnswers, Predictor, ProfileData, ScoringArtifact,
};
use focus_score::telemetry;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct PredictArgs {
    /// JSON file holding the questionnaire answers
    #[arg(long)]
    pub(crate) form: PathBuf,
    /// Optional JSON file holding the account profile (age, gender, school grade)
    #[arg(long)]
    pub(crate) profile: Option<PathBuf>,
    /// Directory holding the scoring artifact files
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct InspectArgs {
    /// Directory holding the scoring artifact files
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let PredictArgs {
        form,
        profile,
        artifact_dir,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let predictor = Predictor::load(resolve_artifact_dir(&config, artifact_dir))?;
    let answers: FormAnswers = read_json_file(&form)?;
    let profile = profile
        .as_deref()
        .map(read_json_file::<ProfileData>)
        .transpose()?;

    let result = predictor.predict(&answers, profile.as_ref())?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn run_artifact_inspect(args: InspectArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let dir = resolve_artifact_dir(&config, args.artifact_dir);
    let artifact = ScoringArtifact::load(&dir)?;
    for line in describe_artifact(&artifact, &dir) {
        println!("{line}");
    }
    Ok(())
}

pub(crate) fn describe_artifact(artifact: &ScoringArtifact, dir: &Path) -> Vec<String> {
    let mut lines = vec![
        format!("Scoring artifact at {}", dir.display()),
        format!("- model: {}", artifact.model().describe()),
        format!("Feature order ({} columns):", artifact.feature_order().len()),
    ];
    for (index, name) in artifact.feature_order().columns().iter().enumerate() {
        lines.push(format!("  {index:>2}. {name}"));
    }

    lines.push("Encoders:".to_string());
    for field in CategoricalField::ALL {
        let codes: Vec<String> = artifact
            .encoders()
            .known_labels(field)
            .iter()
            .enumerate()
            .map(|(code, label)| format!("{label}={code}"))
            .collect();
        lines.push(format!("  - {field}: {}", codes.join(", ")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../crates/focus-score/tests/fixtures/artifact")
    }

    #[test]
    fn inspection_lists_columns_and_codes() {
        let dir = fixture_dir();
        let artifact = ScoringArtifact::load(&dir).expect("fixture loads");

        let lines = describe_artifact(&artifact, &dir);

        assert_eq!(lines[1], "- model: random forest (2 trees, 21 features)");
        assert_eq!(lines[2], "Feature order (21 columns):");
        assert_eq!(lines[3], "   0. Age");
        assert!(lines.contains(&"  - Gender: Female=0, Male=1, Other=2".to_string()));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("  - Phone_Usage_Purpose: Browsing=0")));
    }
}
