use std::collections::HashSet;

use parking_lot::RwLock;

use crate::{
    entities::{
        application::{AppliedJob, ApplyRequest, JobDetails},
        job_posting::JobPosting,
        status::ApplicationStatus,
        user::UserProfile,
    },
    errors::AppError,
    limiter::in_flight::InFlightRegistry,
    repositories::{application::ApplicationRepository, job_posting::JobPostingRepository, user::UserRepository},
};

/// What the applicant sees: jobs already applied to and jobs still open to them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardSnapshot {
    pub profile: UserProfile,
    pub applied: Vec<AppliedJob>,
    pub available: Vec<JobPosting>,
}

impl DashboardSnapshot {
    pub fn applied_ids(&self) -> HashSet<&str> {
        self.applied.iter().map(|a| a.job_id.as_str()).collect()
    }

    pub fn has_applied(&self, job_id: &str) -> bool {
        self.applied.iter().any(|a| a.job_id == job_id)
    }

    pub fn status_of(&self, job_id: &str) -> Option<ApplicationStatus> {
        self.applied
            .iter()
            .find(|a| a.job_id == job_id)
            .map(|a| a.status)
    }
}

pub struct ApplicantDashboard<J, A, U>
where
    J: JobPostingRepository,
    A: ApplicationRepository,
    U: UserRepository,
{
    pub posting_repo: J,
    pub application_repo: A,
    pub user_repo: U,
    user_id: String,
    snapshot: RwLock<DashboardSnapshot>,
    in_flight: InFlightRegistry,
}

impl<J, A, U> ApplicantDashboard<J, A, U>
where
    J: JobPostingRepository,
    A: ApplicationRepository,
    U: UserRepository,
{
    pub fn new(posting_repo: J, application_repo: A, user_repo: U, user_id: impl Into<String>) -> Self {
        ApplicantDashboard {
            posting_repo,
            application_repo,
            user_repo,
            user_id: user_id.into().trim().to_string(),
            snapshot: RwLock::new(DashboardSnapshot::default()),
            in_flight: InFlightRegistry::new(),
        }
    }

    fn require_user_id(&self) -> Result<&str, AppError> {
        if self.user_id.is_empty() {
            return Err(AppError::InvalidInput("A user id is required to load the dashboard".to_string()));
        }
        Ok(&self.user_id)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.read().clone()
    }

    /// Loads the profile, then jobs and applications together, and splits
    /// postings into applied and available.
    pub async fn load(&self) -> Result<DashboardSnapshot, AppError> {
        let user_id = self.require_user_id()?;

        let profile = self.user_repo.get_user(user_id).await?;
        let (postings, applications) = futures::try_join!(
            self.posting_repo.list_postings(),
            self.application_repo.list_user_applications(user_id),
        )?;

        let applied: Vec<AppliedJob> = applications
            .into_iter()
            .map(|a| AppliedJob::from_application(a, &postings))
            .collect();

        let applied_ids: HashSet<&str> = applied.iter().map(|a| a.job_id.as_str()).collect();
        let available: Vec<JobPosting> = postings
            .iter()
            .filter(|p| !applied_ids.contains(p.id.as_str()))
            .cloned()
            .collect();

        let snapshot = DashboardSnapshot {
            profile,
            applied,
            available,
        };
        *self.snapshot.write() = snapshot.clone();

        tracing::debug!(
            user_id,
            applied = snapshot.applied.len(),
            available = snapshot.available.len(),
            "dashboard loaded"
        );
        Ok(snapshot)
    }

    /// Applies to a job and reloads. Ids not present in the local lists are still sent.
    ///
    /// Loads first when the profile is not known yet. Once the backend accepts
    /// the application the job moves to the applied list, even if the reload
    /// that follows fails.
    pub async fn apply_for_job(&self, job_id: &str) -> Result<DashboardSnapshot, AppError> {
        let user_id = self.require_user_id()?.to_string();
        let job_id = job_id.trim();

        if self.snapshot.read().profile.email.trim().is_empty() {
            self.load().await?;
        }

        let email = {
            let snapshot = self.snapshot.read();
            if snapshot.has_applied(job_id) {
                return Err(AppError::AlreadyApplied(job_id.to_string()));
            }
            snapshot.profile.email.trim().to_string()
        };
        if email.is_empty() {
            return Err(AppError::InvalidInput(format!("User {} has no email on file", user_id)));
        }

        let _guard = self.in_flight.acquire("apply", job_id)?;

        let request = ApplyRequest { user_id, email };
        self.application_repo.apply(job_id, &request).await.map_err(|e| {
            tracing::error!(job_id, error = %e, "application failed");
            e
        })?;

        tracing::info!(job_id, "applied for job");
        self.record_applied(job_id);
        self.load().await
    }

    /// Moves `job_id` from available to applied in the local snapshot.
    fn record_applied(&self, job_id: &str) {
        let mut snapshot = self.snapshot.write();
        if snapshot.has_applied(job_id) {
            return;
        }

        let details = snapshot
            .available
            .iter()
            .find(|p| p.id == job_id)
            .map(JobDetails::from)
            .unwrap_or_default();
        snapshot.available.retain(|p| p.id != job_id);
        snapshot.applied.push(AppliedJob {
            job_id: job_id.to_string(),
            details,
            status: ApplicationStatus::Applied,
        });
    }
}
