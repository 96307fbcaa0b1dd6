mod domain;
mod infrastructure;
mod interfaces;
pub mod errors;
pub mod graceful_shutdown;
pub mod settings;
pub mod shared_repos;

pub use domain::{entities, password, use_cases};
pub use infrastructure::{feedback, http, limiter};
pub use interfaces::{repositories, views};

use errors::AppError;
use feedback::notice_board::NoticeBoard;
use http::api_client::ApiClient;
use limiter::in_flight::InFlightRegistry;
use repositories::http_repo::{
    HttpApplicationRepo, HttpCandidateRepo, HttpJobPostingRepo, HttpResumeRepo, HttpUserRepo,
};
use settings::AppConfig;
use shared_repos::SharedRepositories;
use use_cases::{
    application_form::ApplicationForm, dashboard::ApplicantDashboard, job_postings::JobPostingRegistry,
    pipeline::CandidatePipeline, session::SessionGate,
};

pub type AppSessionGate = SessionGate<HttpUserRepo>;
pub type AppPipeline = CandidatePipeline<HttpCandidateRepo>;
pub type AppRegistry = JobPostingRegistry<HttpJobPostingRepo>;
pub type AppDashboard = ApplicantDashboard<HttpJobPostingRepo, HttpApplicationRepo, HttpUserRepo>;
pub type AppForm = ApplicationForm<HttpResumeRepo>;

pub struct AppState {
    pub config: AppConfig,
    pub repos: SharedRepositories,
    pub session_gate: AppSessionGate,
    pub notices: NoticeBoard,
    pub in_flight: InFlightRegistry,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(&config)?;
        let repos = SharedRepositories::new(api);
        let session_gate = SessionGate::new(repos.user_repo.clone());
        let notices = NoticeBoard::new(config.notice_ttl());

        Ok(AppState {
            config,
            repos,
            session_gate,
            notices,
            in_flight: InFlightRegistry::new(),
        })
    }

    pub fn pipeline(&self, job_id: &str) -> AppPipeline {
        CandidatePipeline::with_in_flight(self.repos.candidate_repo.clone(), job_id, self.in_flight.clone())
    }

    pub fn registry(&self) -> AppRegistry {
        JobPostingRegistry::new(self.repos.posting_repo.clone())
    }

    pub fn dashboard(&self, user_id: &str) -> AppDashboard {
        ApplicantDashboard::new(
            self.repos.posting_repo.clone(),
            self.repos.application_repo.clone(),
            self.repos.user_repo.clone(),
            user_id,
        )
    }

    pub fn application_form(&self) -> AppForm {
        ApplicationForm::new(self.repos.resume_repo.clone())
    }
}
