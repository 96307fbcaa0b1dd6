use async_trait::async_trait;
use reqwest::Method;

use crate::{
    entities::candidate::{Candidate, CandidateActionRequest},
    errors::AppError,
    http::{api_client::ApiClient, endpoints},
    repositories::http_repo::HttpCandidateRepo,
};

#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// Lists the candidates who applied to a posting
    async fn list_candidates(&self, job_id: &str) -> Result<Vec<Candidate>, AppError>;

    async fn select_candidate(&self, job_id: &str, email: &str) -> Result<(), AppError>;

    async fn reject_candidate(&self, job_id: &str, email: &str) -> Result<(), AppError>;

    /// Hands a selected candidate over to interview scheduling
    async fn schedule_interview(&self, job_id: &str, email: &str) -> Result<(), AppError>;
}

impl HttpCandidateRepo {
    pub fn new(api: ApiClient) -> Self {
        HttpCandidateRepo { api }
    }

    async fn post_action(&self, path: &str, email: &str) -> Result<(), AppError> {
        let body = CandidateActionRequest {
            candidate_email: email.to_string(),
        };

        self.api.action(Method::POST, path, Some(&body)).await?;
        Ok(())
    }
}

#[async_trait]
impl CandidateRepository for HttpCandidateRepo {
    async fn list_candidates(&self, job_id: &str) -> Result<Vec<Candidate>, AppError> {
        self.api.get_json(&endpoints::candidates(job_id)).await
    }

    async fn select_candidate(&self, job_id: &str, email: &str) -> Result<(), AppError> {
        self.post_action(&endpoints::select_candidate(job_id), email).await
    }

    async fn reject_candidate(&self, job_id: &str, email: &str) -> Result<(), AppError> {
        self.post_action(&endpoints::reject_candidate(job_id), email).await
    }

    async fn schedule_interview(&self, job_id: &str, email: &str) -> Result<(), AppError> {
        self.post_action(&endpoints::schedule_interview(job_id), email).await
    }
}
