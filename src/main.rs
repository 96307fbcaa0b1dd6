use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use interview_portal::{
    AppState,
    entities::{
        application_draft::{FormField, ListSection},
        job_posting::NewJobPosting,
        status::PipelineAction,
        user::{LoginUser, NewUser, Role, Session},
    },
    errors::AppError,
    graceful_shutdown::shutdown_signal,
    settings::{AppConfig, LogFormat},
    views::{
        self,
        application_form::{ApplicationInput, parse_section_entry},
        jobs::JobPatch,
    },
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "interview-portal", version)]
#[command(about = "Apply for jobs and review candidates on the interview platform")]
struct Cli {
    /// Account email used to sign in
    #[arg(long, global = true, env = "APP_USER_EMAIL")]
    email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "APP_USER_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Role to sign in as when the backend does not say
    #[arg(long, global = true, value_enum)]
    role: Option<RoleArg>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum RoleArg {
    Candidate,
    Recruiter,
}

impl From<RoleArg> for Role {
    fn from(arg: RoleArg) -> Self {
        match arg {
            RoleArg::Candidate => Role::Candidate,
            RoleArg::Recruiter => Role::Recruiter,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        /// Employee ID; registers the account as an employee
        #[arg(long)]
        employee_id: Option<String>,
    },

    #[command(flatten)]
    Gated(GatedCommands),
}

/// Commands that sign in first.
#[derive(Subcommand)]
enum GatedCommands {
    /// Show applied and available jobs
    Dashboard,

    /// Apply for a job
    Apply {
        /// Job ID
        job_id: String,
    },

    /// Manage job postings
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Review candidates for a job
    Candidates {
        #[command(subcommand)]
        command: CandidateCommands,
    },

    /// Parse a resume and show the fields it would fill in
    ParseResume {
        /// Path to a pdf, doc or docx file
        path: PathBuf,
    },

    /// Fill in and submit the application form
    Submit(SubmitArgs),
}

#[derive(Subcommand)]
enum JobCommands {
    /// List job postings with applicant counts
    List,

    /// Show one job posting
    Show { id: String },

    /// Create a job posting
    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        company: String,

        /// One-line summary
        #[arg(long)]
        summary: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "")]
        pay: String,

        #[arg(long, default_value = "")]
        level: String,
    },

    /// Change fields of a job posting
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        company: Option<String>,

        #[arg(long)]
        summary: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        pay: Option<String>,

        #[arg(long)]
        level: Option<String>,
    },

    /// Delete a job posting
    Delete { id: String },
}

#[derive(Subcommand)]
enum CandidateCommands {
    /// List candidates grouped by status
    List { job_id: String },

    /// Move an applied candidate to selected
    Select { job_id: String, candidate_email: String },

    /// Move an applied candidate to rejected
    Reject { job_id: String, candidate_email: String },

    /// Schedule an interview for a selected candidate
    Schedule { job_id: String, candidate_email: String },
}

#[derive(clap::Args)]
struct SubmitArgs {
    #[arg(long)]
    name: Option<String>,

    /// Contact email; defaults to the sign-in email
    #[arg(long)]
    contact_email: Option<String>,

    #[arg(long)]
    phone: Option<String>,

    #[arg(long)]
    position: Option<String>,

    #[arg(long)]
    linkedin: Option<String>,

    #[arg(long)]
    github: Option<String>,

    #[arg(long)]
    cover_letter: Option<String>,

    /// Comma separated
    #[arg(long)]
    skills: Option<String>,

    #[arg(long)]
    certifications: Option<String>,

    /// company|duration|responsibilities, repeatable
    #[arg(long = "experience")]
    experiences: Vec<String>,

    /// name|details, repeatable
    #[arg(long = "project")]
    projects: Vec<String>,

    /// institution|degree|year, repeatable
    #[arg(long = "education")]
    educations: Vec<String>,

    /// Resume to attach
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Fill the form from the resume first; explicit flags still win
    #[arg(long, requires = "resume")]
    prefill: bool,
}

impl SubmitArgs {
    fn into_input(self, login_email: Option<&str>) -> Result<ApplicationInput, AppError> {
        let fields = [
            (FormField::Name, self.name),
            (FormField::Email, self.contact_email.or_else(|| login_email.map(str::to_string))),
            (FormField::Phone, self.phone),
            (FormField::Position, self.position),
            (FormField::Linkedin, self.linkedin),
            (FormField::Github, self.github),
            (FormField::CoverLetter, self.cover_letter),
            (FormField::Skills, self.skills),
            (FormField::Certifications, self.certifications),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect();

        let mut entries = Vec::new();
        for (section, raw) in [
            (ListSection::Experiences, &self.experiences),
            (ListSection::Projects, &self.projects),
            (ListSection::Educations, &self.educations),
        ] {
            for item in raw {
                entries.push(parse_section_entry(section, item)?);
            }
        }

        Ok(ApplicationInput {
            fields,
            entries,
            resume: self.resume,
            prefill: self.prefill,
        })
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json().with_writer(std::io::stderr)).init(),
        LogFormat::Pretty => registry.with(fmt::layer().with_writer(std::io::stderr)).init(),
    }
}

fn credentials(cli: &Cli) -> Result<LoginUser, AppError> {
    match (&cli.email, &cli.password) {
        (Some(email), Some(password)) => Ok(LoginUser::new(email.clone(), password.clone())),
        _ => Err(AppError::Unauthorized(
            "Pass --email and --password (or APP_USER_EMAIL and APP_USER_PASSWORD)".to_string(),
        )),
    }
}

async fn run(state: &AppState, cli: Cli) -> Result<String, AppError> {
    let login = credentials(&cli)?;

    match cli.command {
        Commands::Register { name, employee_id } => {
            let request = NewUser {
                name,
                email: login.email.clone(),
                password: login.password.clone(),
                is_employee: employee_id.is_some(),
                employee_id,
            };
            views::session::register(state, request).await
        }
        Commands::Gated(command) => {
            let session = views::session::login(state, login, cli.role.map(Role::from)).await?;
            run_gated(state, command, &session).await
        }
    }
}

async fn run_gated(state: &AppState, command: GatedCommands, session: &Session) -> Result<String, AppError> {
    match command {
        GatedCommands::Dashboard => views::dashboard::show_dashboard(state).await,
        GatedCommands::Apply { job_id } => views::dashboard::apply(state, &job_id).await,
        GatedCommands::Jobs { command } => match command {
            JobCommands::List => views::jobs::list_jobs(state).await,
            JobCommands::Show { id } => views::jobs::show_job(state, &id).await,
            JobCommands::Create {
                title,
                company,
                summary,
                description,
                pay,
                level,
            } => {
                let request = NewJobPosting {
                    full_description: description,
                    pay,
                    level,
                    ..NewJobPosting::new(title, company, summary)
                };
                views::jobs::create_job(state, request).await
            }
            JobCommands::Update {
                id,
                title,
                company,
                summary,
                description,
                pay,
                level,
            } => {
                let patch = JobPatch {
                    title,
                    company,
                    short_description: summary,
                    full_description: description,
                    pay,
                    level,
                };
                views::jobs::update_job(state, &id, patch).await
            }
            JobCommands::Delete { id } => views::jobs::delete_job(state, &id).await,
        },
        GatedCommands::Candidates { command } => match command {
            CandidateCommands::List { job_id } => views::candidates::list_candidates(state, &job_id).await,
            CandidateCommands::Select { job_id, candidate_email } => {
                views::candidates::move_candidate(state, &job_id, PipelineAction::Select, &candidate_email).await
            }
            CandidateCommands::Reject { job_id, candidate_email } => {
                views::candidates::move_candidate(state, &job_id, PipelineAction::Reject, &candidate_email).await
            }
            CandidateCommands::Schedule { job_id, candidate_email } => {
                views::candidates::move_candidate(state, &job_id, PipelineAction::Schedule, &candidate_email).await
            }
        },
        GatedCommands::ParseResume { path } => views::application_form::parse_resume(state, path).await,
        GatedCommands::Submit(args) => {
            let input = args.into_input(Some(&session.email))?;
            views::application_form::submit(state, input).await
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::new().context("Failed to load configuration")?;
    init_tracing(config.log_format);
    tracing::debug!(env = %config.env, api = %config.api_base_url, "configuration loaded");

    let state = AppState::new(config).context("Failed to start the API client")?;

    let outcome = tokio::select! {
        result = run(&state, cli) => Some(result),
        _ = shutdown_signal() => None,
    };

    let code = match outcome {
        Some(Ok(output)) => {
            print!("{}", output);
            ExitCode::SUCCESS
        }
        Some(Err(e)) => {
            state.notices.report(&e);
            ExitCode::from(e.exit_code())
        }
        None => ExitCode::from(130),
    };

    eprint!("{}", views::render_notices(&state.notices.active()));
    Ok(code)
}
