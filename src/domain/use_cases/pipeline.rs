use std::cmp::Reverse;

use parking_lot::RwLock;

use crate::{
    entities::{
        candidate::Candidate,
        status::{ApplicationStatus, PipelineAction},
    },
    errors::AppError,
    limiter::in_flight::InFlightRegistry,
    repositories::candidate::CandidateRepository,
};

/// Outcome of a recruiter action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The backend accepted the change and the list was re-fetched.
    Applied {
        email: String,
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    /// Nothing was sent. `current` is `None` for an unknown candidate.
    Ignored {
        email: String,
        current: Option<ApplicationStatus>,
    },
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Transition::Applied { .. })
    }
}

/// Review state of the candidates for one job posting.
///
/// Local state only ever changes through [`CandidatePipeline::refresh`]; a
/// transition that the backend accepts is followed by a refresh, and one it
/// rejects leaves the lists untouched.
pub struct CandidatePipeline<R>
where
    R: CandidateRepository,
{
    pub candidate_repo: R,
    job_id: String,
    candidates: RwLock<Vec<Candidate>>,
    in_flight: InFlightRegistry,
}

impl<R> CandidatePipeline<R>
where
    R: CandidateRepository,
{
    pub fn new(candidate_repo: R, job_id: impl Into<String>) -> Self {
        Self::with_in_flight(candidate_repo, job_id, InFlightRegistry::new())
    }

    pub fn with_in_flight(candidate_repo: R, job_id: impl Into<String>, in_flight: InFlightRegistry) -> Self {
        CandidatePipeline {
            candidate_repo,
            job_id: job_id.into(),
            candidates: RwLock::new(Vec::new()),
            in_flight,
        }
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    /// Replaces the local list with the backend's. Returns the number of candidates.
    pub async fn refresh(&self) -> Result<usize, AppError> {
        let fresh = self.candidate_repo.list_candidates(&self.job_id).await?;

        {
            let current = self.candidates.read();
            for candidate in &fresh {
                let previous = current.iter().find(|c| c.is(&candidate.email));
                if let Some(previous) = previous.filter(|p| candidate.status.rank() < p.status.rank()) {
                    tracing::warn!(
                        job_id = %self.job_id,
                        email = %candidate.email,
                        from = %previous.status,
                        to = %candidate.status,
                        "backend reported a status regression"
                    );
                }
            }
        }

        let count = fresh.len();
        *self.candidates.write() = fresh;

        tracing::debug!(job_id = %self.job_id, count, "candidate list refreshed");
        Ok(count)
    }

    pub fn candidates(&self) -> Vec<Candidate> {
        self.candidates.read().clone()
    }

    pub fn candidate(&self, email: &str) -> Option<Candidate> {
        self.candidates.read().iter().find(|c| c.is(email)).cloned()
    }

    pub fn status_of(&self, email: &str) -> Option<ApplicationStatus> {
        self.candidates
            .read()
            .iter()
            .find(|c| c.is(email))
            .map(|c| c.status)
    }

    fn in_status(&self, status: ApplicationStatus) -> Vec<Candidate> {
        self.candidates
            .read()
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect()
    }

    pub fn to_review(&self) -> Vec<Candidate> {
        self.in_status(ApplicationStatus::Applied)
    }

    pub fn to_schedule(&self) -> Vec<Candidate> {
        self.in_status(ApplicationStatus::Selected)
    }

    pub fn rejected(&self) -> Vec<Candidate> {
        self.in_status(ApplicationStatus::Rejected)
    }

    pub fn scheduled(&self) -> Vec<Candidate> {
        self.in_status(ApplicationStatus::Scheduled)
    }

    /// Candidates awaiting review, best overall score first. Unscored ones go last.
    pub fn ranked_for_review(&self) -> Vec<Candidate> {
        let mut pending = self.to_review();
        pending.sort_by_key(|c| Reverse(c.scores.map(|s| s.overall as i16).unwrap_or(-1)));
        pending
    }

    pub async fn select(&self, email: &str) -> Result<Transition, AppError> {
        self.transition(PipelineAction::Select, email).await
    }

    pub async fn reject(&self, email: &str) -> Result<Transition, AppError> {
        self.transition(PipelineAction::Reject, email).await
    }

    pub async fn schedule(&self, email: &str) -> Result<Transition, AppError> {
        self.transition(PipelineAction::Schedule, email).await
    }

    async fn transition(&self, action: PipelineAction, email: &str) -> Result<Transition, AppError> {
        let Some(candidate) = self.candidate(email) else {
            tracing::info!(job_id = %self.job_id, email, %action, "ignoring action on unknown candidate");
            return Ok(Transition::Ignored {
                email: email.trim().to_string(),
                current: None,
            });
        };

        let from = candidate.status;
        let Some(to) = from.apply(action) else {
            tracing::info!(job_id = %self.job_id, email, %action, status = %from, "action does not apply");
            return Ok(Transition::Ignored {
                email: candidate.email,
                current: Some(from),
            });
        };

        let entity = format!("{}/{}", self.job_id, candidate.email);
        let _guard = self.in_flight.acquire("candidate-transition", &entity)?;

        let sent = match action {
            PipelineAction::Select => self.candidate_repo.select_candidate(&self.job_id, &candidate.email).await,
            PipelineAction::Reject => self.candidate_repo.reject_candidate(&self.job_id, &candidate.email).await,
            PipelineAction::Schedule => {
                self.candidate_repo
                    .schedule_interview(&self.job_id, &candidate.email)
                    .await
            }
        };

        if let Err(e) = sent {
            tracing::error!(job_id = %self.job_id, email = %candidate.email, %action, error = %e, "transition failed");
            return Err(e);
        }

        self.refresh().await?;

        tracing::info!(job_id = %self.job_id, email = %candidate.email, %from, %to, "candidate moved");
        Ok(Transition::Applied {
            email: candidate.email,
            from,
            to,
        })
    }
}
