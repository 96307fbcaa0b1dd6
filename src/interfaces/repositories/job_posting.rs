use async_trait::async_trait;
use reqwest::Method;

use crate::{
    entities::job_posting::{JobPosting, NewJobPosting},
    errors::AppError,
    http::{api_client::ApiClient, endpoints},
    repositories::http_repo::HttpJobPostingRepo,
};

#[async_trait]
pub trait JobPostingRepository: Send + Sync {
    /// Lists every job posting
    async fn list_postings(&self) -> Result<Vec<JobPosting>, AppError>;

    /// Retrieves one posting by id
    async fn get_posting(&self, id: &str) -> Result<JobPosting, AppError>;

    /// Creates a posting and returns its id when the backend reports one
    async fn create_posting(&self, posting: &NewJobPosting) -> Result<Option<String>, AppError>;

    /// Replaces the editable fields of a posting
    async fn update_posting(&self, id: &str, posting: &NewJobPosting) -> Result<(), AppError>;

    /// Deletes a posting
    async fn delete_posting(&self, id: &str) -> Result<(), AppError>;
}

impl HttpJobPostingRepo {
    pub fn new(api: ApiClient) -> Self {
        HttpJobPostingRepo { api }
    }
}

#[async_trait]
impl JobPostingRepository for HttpJobPostingRepo {
    async fn list_postings(&self) -> Result<Vec<JobPosting>, AppError> {
        self.api.get_json(endpoints::JOB_OPENINGS).await
    }

    async fn get_posting(&self, id: &str) -> Result<JobPosting, AppError> {
        self.api.get_json(&endpoints::job_opening(id)).await
    }

    async fn create_posting(&self, posting: &NewJobPosting) -> Result<Option<String>, AppError> {
        let reply = self
            .api
            .action(Method::POST, endpoints::JOB_OPENINGS, Some(posting))
            .await?;

        Ok(reply.id)
    }

    async fn update_posting(&self, id: &str, posting: &NewJobPosting) -> Result<(), AppError> {
        self.api
            .action(Method::PUT, &endpoints::job_opening(id), Some(posting))
            .await?;

        Ok(())
    }

    async fn delete_posting(&self, id: &str) -> Result<(), AppError> {
        self.api
            .action::<()>(Method::DELETE, &endpoints::job_opening(id), None)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(format!("Job posting {} not found", id)),
                _ => e,
            })?;

        Ok(())
    }
}
