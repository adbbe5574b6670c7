use crate::infra::{session_service, InMemorySessionRepository};
use clap::Args;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;
use study_advisor::config::AppConfig;
use study_advisor::error::AppError;
use study_advisor::workflows::advising::{
    AdvisingSessionService, ApplicantProfile, ReferenceCatalog, SessionId, SessionReply,
    SessionServiceError,
};
use tokio::io::{AsyncBufReadExt, BufReader as AsyncBufReader};
use tracing::info;

const START_COMMAND: &str = "/start";
const HELP_COMMAND: &str = "/help";
const CANCEL_COMMAND: &str = "/cancel";

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding a complete applicant profile
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Print the structured assessment as JSON instead of rendered text
    #[arg(long)]
    pub(crate) json: bool,
}

type ConsoleService = AdvisingSessionService<InMemorySessionRepository>;

fn print_reply(reply: &SessionReply) {
    for message in &reply.messages {
        println!("{message}\n");
    }
}

fn start_session(service: &ConsoleService) -> Result<SessionId, AppError> {
    let reply = service.start()?;
    print_reply(&reply);
    Ok(reply.session_id)
}

pub(crate) async fn run_chat(config: AppConfig) -> Result<(), AppError> {
    let catalog = Arc::new(ReferenceCatalog::load(&config.catalog));
    let service = session_service(catalog);

    let mut session = Some(start_session(&service)?);
    let mut lines = AsyncBufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        match text {
            START_COMMAND => {
                if let Some(previous) = session.take() {
                    // Abandon whatever was in flight before starting over.
                    match service.cancel(&previous) {
                        Ok(_) | Err(SessionServiceError::Finished(_)) => {}
                        Err(err) => return Err(err.into()),
                    }
                }
                session = Some(start_session(&service)?);
            }
            HELP_COMMAND => println!("{}\n", service.help()),
            CANCEL_COMMAND => match session.take() {
                Some(id) => print_reply(&service.cancel(&id)?),
                None => println!("No assessment in progress. Send {START_COMMAND} to begin.\n"),
            },
            _ => match session.as_ref() {
                Some(id) => {
                    let reply = service.reply(id, text)?;
                    print_reply(&reply);
                    if reply.finished {
                        session = None;
                    }
                }
                None => println!("Send {START_COMMAND} to begin a new assessment.\n"),
            },
        }
    }

    Ok(())
}

pub(crate) fn run_assess(config: AppConfig, args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { profile, json } = args;

    info!(path = %profile.display(), "assessing applicant profile");
    let file = std::fs::File::open(&profile)?;
    let applicant: ApplicantProfile = serde_json::from_reader(BufReader::new(file))?;

    let catalog = Arc::new(ReferenceCatalog::load(&config.catalog));
    let service = session_service(catalog);
    let assessment = service.assess(&applicant)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    for message in assessment.into_messages() {
        println!("{}\n", service.machine().render(&message));
    }
    Ok(())
}

pub(crate) fn run_catalog(config: AppConfig) -> Result<(), AppError> {
    let catalog = ReferenceCatalog::load(&config.catalog);

    println!("Countries ({})", catalog.countries_source());
    for country in catalog.countries() {
        if country.aliases.is_empty() {
            println!("- {}", country.name);
        } else {
            println!("- {} (aliases: {})", country.name, country.aliases.join(", "));
        }
        println!(
            "  language: {} | tuition: {} | deadline: {}",
            country.language_requirement, country.avg_tuition, country.application_deadline
        );
    }

    println!("\nPrograms ({})", catalog.programs_source());
    for program in catalog.programs() {
        println!(
            "- {} [{}] min GPA {:.1} | fields: {}",
            program.name,
            program.level,
            program.min_gpa,
            program.fields.join(", ")
        );
    }
    Ok(())
}
