use tracing::instrument;

use crate::{
    AppState,
    entities::{
        job_posting::{JobPosting, NewJobPosting},
        user::View,
    },
    errors::AppError,
    views::or_dash,
};

/// Fields a recruiter may change on an existing posting. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct JobPatch {
    pub title: Option<String>,
    pub company: Option<String>,
    pub short_description: Option<String>,
    pub full_description: Option<String>,
    pub pay: Option<String>,
    pub level: Option<String>,
}

impl JobPatch {
    pub fn apply_to(self, mut base: NewJobPosting) -> NewJobPosting {
        if let Some(v) = self.title {
            base.title = v;
        }
        if let Some(v) = self.company {
            base.company = v;
        }
        if let Some(v) = self.short_description {
            base.short_description = v;
        }
        if let Some(v) = self.full_description {
            base.full_description = v;
        }
        if let Some(v) = self.pay {
            base.pay = v;
        }
        if let Some(v) = self.level {
            base.level = v;
        }
        base
    }
}

#[instrument(skip(state))]
pub async fn list_jobs(state: &AppState) -> Result<String, AppError> {
    state.session_gate.require(View::JobRegistry)?;

    let registry = state.registry();
    registry.refresh().await?;

    let counts = registry.applicant_counts();
    if counts.is_empty() {
        return Ok("No job postings yet.\n".to_string());
    }

    let postings = registry.list();
    let mut out = String::new();
    for (posting, row) in postings.iter().zip(counts.iter()) {
        out.push_str(&format!(
            "{:<26} {:<32} {:<20} {:>4} applicant(s)\n",
            row.id,
            row.title,
            or_dash(&posting.company),
            row.count
        ));
    }
    Ok(out)
}

#[instrument(skip(state))]
pub async fn show_job(state: &AppState, id: &str) -> Result<String, AppError> {
    state.session_gate.require(View::JobRegistry)?;

    let posting = state.registry().get(id).await?;
    Ok(render_posting(&posting))
}

#[instrument(skip(state, request), fields(title = %request.title))]
pub async fn create_job(state: &AppState, request: NewJobPosting) -> Result<String, AppError> {
    state.session_gate.require(View::JobRegistry)?;

    let created = state.registry().create(request).await?;
    state
        .notices
        .success(format!("Created job posting {} ({})", created.title, created.id));

    Ok(render_posting(&created))
}

#[instrument(skip(state, patch))]
pub async fn update_job(state: &AppState, id: &str, patch: JobPatch) -> Result<String, AppError> {
    state.session_gate.require(View::JobRegistry)?;

    let registry = state.registry();
    let current = registry.get(id).await?;
    let request = patch.apply_to(NewJobPosting::from(&current));

    registry.update(id, request).await?;
    state.notices.success(format!("Updated job posting {}", id));

    let updated = registry
        .list()
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::NotFound(format!("Job posting {} not found", id)))?;
    Ok(render_posting(&updated))
}

#[instrument(skip(state))]
pub async fn delete_job(state: &AppState, id: &str) -> Result<String, AppError> {
    state.session_gate.require(View::JobRegistry)?;

    let registry = state.registry();
    registry.delete(id).await?;
    state.notices.success(format!("Deleted job posting {}", id));

    Ok(format!("{} posting(s) remain.\n", registry.list().len()))
}

fn render_posting(posting: &JobPosting) -> String {
    format!(
        "{}\n  id:        {}\n  company:   {}\n  level:     {}\n  pay:       {}\n  summary:   {}\n  applicants: {}\n\n{}\n",
        posting.title,
        posting.id,
        or_dash(&posting.company),
        or_dash(&posting.level),
        or_dash(&posting.pay),
        or_dash(&posting.short_description),
        posting.applicant_count(),
        posting.full_description,
    )
}
