use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::{
    entities::{
        application_draft::ApplicationSubmission,
        resume::{ParsedResume, ResumeFile},
    },
    errors::AppError,
    http::{
        api_client::{ActionResponse, ApiClient},
        endpoints,
    },
    repositories::http_repo::HttpResumeRepo,
};

const RESUME_PART: &str = "resume";

#[async_trait]
pub trait ResumeRepository: Send + Sync {
    /// Sends a resume to the parsing service and returns the extracted fields
    async fn parse_resume(&self, file: &ResumeFile) -> Result<ParsedResume, AppError>;

    /// Sends a completed application form
    async fn submit_application(&self, submission: &ApplicationSubmission) -> Result<(), AppError>;
}

#[derive(Debug, Default, Deserialize)]
struct ParseReply {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    parsed_data: Option<JsonValue>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpResumeRepo {
    pub fn new(api: ApiClient) -> Self {
        HttpResumeRepo { api }
    }

    fn resume_part(file: &ResumeFile) -> Result<Part, AppError> {
        Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(|e| AppError::InvalidInput(format!("Invalid content type {}: {}", file.content_type, e)))
    }
}

#[async_trait]
impl ResumeRepository for HttpResumeRepo {
    async fn parse_resume(&self, file: &ResumeFile) -> Result<ParsedResume, AppError> {
        let form = Form::new().part(RESUME_PART, Self::resume_part(file)?);

        let reply: ParseReply = self.api.post_multipart(endpoints::PARSE_RESUME, form).await?;

        match (reply.success, reply.parsed_data) {
            (Some(true), Some(data)) => Ok(ParsedResume::from_value(&data)),
            _ => {
                let reason = reply
                    .message
                    .unwrap_or_else(|| "Resume could not be parsed".to_string());
                tracing::warn!(file = %file.file_name, %reason, "resume parsing failed");
                Err(AppError::Network(reason))
            }
        }
    }

    async fn submit_application(&self, submission: &ApplicationSubmission) -> Result<(), AppError> {
        let mut form = Form::new();
        for (name, value) in submission.text_fields()? {
            form = form.text(name, value);
        }
        if let Some(file) = &submission.resume {
            form = form.part(RESUME_PART, Self::resume_part(file)?);
        }

        let reply: ActionResponse = self
            .api
            .post_multipart(endpoints::SUBMIT_APPLICATION, form)
            .await?;
        reply.into_result(endpoints::SUBMIT_APPLICATION)?;

        Ok(())
    }
}
