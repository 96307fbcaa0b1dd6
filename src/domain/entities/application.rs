use serde::{Deserialize, Serialize};

use crate::entities::{
    job_posting::{lenient_string, JobPosting},
    status::ApplicationStatus,
};

/// Link between a user and a job posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(deserialize_with = "lenient_string")]
    pub job_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_id: String,
    #[serde(default)]
    pub status: ApplicationStatus,
    #[serde(default)]
    pub job_details: Option<JobDetails>,
}

/// Posting summary embedded in an application record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobDetails {
    pub title: String,
    pub company: String,
    pub short_description: String,
    #[serde(deserialize_with = "lenient_string")]
    pub pay: String,
    pub level: String,
}

/// A job on the applicant's "applied" list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedJob {
    pub job_id: String,
    pub details: JobDetails,
    pub status: ApplicationStatus,
}

impl AppliedJob {
    /// Prefers the embedded details and falls back to the posting list.
    pub fn from_application(application: Application, postings: &[JobPosting]) -> Self {
        let details = application.job_details.unwrap_or_else(|| {
            postings
                .iter()
                .find(|p| p.id == application.job_id)
                .map(JobDetails::from)
                .unwrap_or_default()
        });

        AppliedJob {
            job_id: application.job_id,
            details,
            status: application.status,
        }
    }
}

impl From<&JobPosting> for JobDetails {
    fn from(posting: &JobPosting) -> Self {
        JobDetails {
            title: posting.title.clone(),
            company: posting.company.clone(),
            short_description: posting.short_description.clone(),
            pay: posting.pay.clone(),
            level: posting.level.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub user_id: String,
    pub email: String,
}
