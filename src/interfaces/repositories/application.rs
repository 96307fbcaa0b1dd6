use async_trait::async_trait;
use reqwest::Method;

use crate::{
    entities::application::{Application, ApplyRequest},
    errors::AppError,
    http::{api_client::ApiClient, endpoints},
    repositories::http_repo::HttpApplicationRepo,
};

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Lists the applications a user has made
    async fn list_user_applications(&self, user_id: &str) -> Result<Vec<Application>, AppError>;

    /// Applies a user to a posting
    async fn apply(&self, job_id: &str, request: &ApplyRequest) -> Result<(), AppError>;
}

impl HttpApplicationRepo {
    pub fn new(api: ApiClient) -> Self {
        HttpApplicationRepo { api }
    }
}

#[async_trait]
impl ApplicationRepository for HttpApplicationRepo {
    async fn list_user_applications(&self, user_id: &str) -> Result<Vec<Application>, AppError> {
        self.api.get_json(&endpoints::user_applications(user_id)).await
    }

    async fn apply(&self, job_id: &str, request: &ApplyRequest) -> Result<(), AppError> {
        self.api
            .action(Method::POST, &endpoints::apply(job_id), Some(request))
            .await?;

        Ok(())
    }
}
