use crate::console::{run_assess, run_catalog, run_chat, AssessArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use study_advisor::config::AppConfig;
use study_advisor::error::AppError;
use study_advisor::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Study Abroad Advisor",
    about = "Assess study-abroad eligibility and recommend programs over HTTP or the terminal",
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
    /// Hold an interactive intake conversation on stdin/stdout
    Chat,
    /// Assess a complete applicant profile read from a JSON file
    Assess(AssessArgs),
    /// Print the loaded country and program catalogs
    Catalog,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

/// Load configuration and install the subscriber shared by every command.
pub(crate) fn bootstrap() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Chat => run_chat(bootstrap()?).await,
        Command::Assess(args) => run_assess(bootstrap()?, args),
        Command::Catalog => run_catalog(bootstrap()?),
    }
}
