use parking_lot::RwLock;
use validator::Validate;

use crate::{
    entities::job_posting::{ApplicantCount, JobPosting, NewJobPosting},
    errors::AppError,
    limiter::in_flight::InFlightRegistry,
    repositories::job_posting::JobPostingRepository,
};

const MUTATE: &str = "job-posting";

/// Recruiter-side catalogue of job postings.
pub struct JobPostingRegistry<R>
where
    R: JobPostingRepository,
{
    pub posting_repo: R,
    postings: RwLock<Vec<JobPosting>>,
    in_flight: InFlightRegistry,
}

impl<R> JobPostingRegistry<R>
where
    R: JobPostingRepository,
{
    pub fn new(posting_repo: R) -> Self {
        JobPostingRegistry {
            posting_repo,
            postings: RwLock::new(Vec::new()),
            in_flight: InFlightRegistry::new(),
        }
    }

    /// Current snapshot, as of the last refresh
    pub fn list(&self) -> Vec<JobPosting> {
        self.postings.read().clone()
    }

    /// Re-fetches every posting and replaces the snapshot
    pub async fn refresh(&self) -> Result<Vec<JobPosting>, AppError> {
        let fresh = self.posting_repo.list_postings().await?;
        *self.postings.write() = fresh.clone();

        tracing::debug!(count = fresh.len(), "job postings refreshed");
        Ok(fresh)
    }

    /// Fetches one posting from the backend
    pub async fn get(&self, id: &str) -> Result<JobPosting, AppError> {
        self.posting_repo.get_posting(id).await.map_err(|e| match e {
            AppError::NotFound(_) => AppError::NotFound(format!("Job posting {} not found", id)),
            _ => e,
        })
    }

    /// Creates a posting and returns it as listed after the re-fetch
    pub async fn create(&self, request: NewJobPosting) -> Result<JobPosting, AppError> {
        request.validate()?;
        let _guard = self.in_flight.acquire(MUTATE, "new")?;

        let id = self.posting_repo.create_posting(&request).await?;
        let postings = self.refresh().await?;

        let created = match id {
            Some(id) => postings.into_iter().find(|p| p.id == id),
            None => postings.into_iter().rev().find(|p| {
                p.title == request.title && p.company == request.company
            }),
        };

        let created = created.ok_or_else(|| {
            AppError::Network("Created job posting is missing from the listing".to_string())
        })?;

        tracing::info!(id = %created.id, title = %created.title, "job posting created");
        Ok(created)
    }

    pub async fn update(&self, id: &str, request: NewJobPosting) -> Result<(), AppError> {
        request.validate()?;
        let _guard = self.in_flight.acquire(MUTATE, id)?;

        self.posting_repo.update_posting(id, &request).await?;
        self.refresh().await?;

        tracing::info!(id, "job posting updated");
        Ok(())
    }

    /// Deletes a posting. On failure the snapshot is left as it was.
    pub async fn delete(&self, id: &str) -> Result<(), AppError> {
        let _guard = self.in_flight.acquire(MUTATE, id)?;

        self.posting_repo.delete_posting(id).await?;
        self.refresh().await?;

        tracing::info!(id, "job posting deleted");
        Ok(())
    }

    /// Applicant totals per posting, from the current snapshot
    pub fn applicant_counts(&self) -> Vec<ApplicantCount> {
        self.postings
            .read()
            .iter()
            .map(|p| ApplicantCount {
                id: p.id.clone(),
                title: p.title.clone(),
                count: p.applicant_count(),
            })
            .collect()
    }
}
