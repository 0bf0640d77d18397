use crate::commands::{run_artifact_inspect, run_predict, InspectArgs, PredictArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use focus_score::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Focus Score",
    about = "Serve and run the phone-habit procrastination predictor from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score one questionnaire submission and print the result as JSON
    Predict(PredictArgs),
    /// Work with the trained scoring artifact
    Artifact {
        #[command(subcommand)]
        command: ArtifactCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ArtifactCommand {
    /// Print feature order, encoder vocabularies and model summary
    Inspect(InspectArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Directory holding the scoring artifact files
    #[arg(long)]
    pub(crate) artifact_dir: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Predict(args) => run_predict(args),
        Command::Artifact {
            command: ArtifactCommand::Inspect(args),
        } => run_artifact_inspect(args),
    }
}
