use tracing::instrument;

use crate::{
    AppState,
    entities::{candidate::Candidate, status::PipelineAction, user::View},
    errors::AppError,
    use_cases::pipeline::Transition,
    views::or_dash,
};

#[instrument(skip(state))]
pub async fn list_candidates(state: &AppState, job_id: &str) -> Result<String, AppError> {
    state.session_gate.require(View::CandidatePipeline)?;

    let pipeline = state.pipeline(job_id);
    pipeline.refresh().await?;

    let mut out = String::new();
    render_section(&mut out, "To review", &pipeline.ranked_for_review());
    render_section(&mut out, "To schedule", &pipeline.to_schedule());
    render_section(&mut out, "Scheduled", &pipeline.scheduled());
    render_section(&mut out, "Rejected", &pipeline.rejected());
    Ok(out)
}

/// Runs one recruiter action against a fresh copy of the pipeline.
#[instrument(skip(state))]
pub async fn move_candidate(
    state: &AppState,
    job_id: &str,
    action: PipelineAction,
    email: &str,
) -> Result<String, AppError> {
    state.session_gate.require(View::CandidatePipeline)?;

    let pipeline = state.pipeline(job_id);
    pipeline.refresh().await?;

    let transition = match action {
        PipelineAction::Select => pipeline.select(email).await?,
        PipelineAction::Reject => pipeline.reject(email).await?,
        PipelineAction::Schedule => pipeline.schedule(email).await?,
    };

    let message = match &transition {
        Transition::Applied { email, from, to } => {
            let message = format!("{} moved from {} to {}", email, from, to);
            state.notices.success(message.clone());
            message
        }
        Transition::Ignored { email, current: Some(status) } => {
            let message = format!("{} is {}; {} does not apply", email, status, action);
            state.notices.info(message.clone());
            message
        }
        Transition::Ignored { email, current: None } => {
            let message = format!("{} has not applied to job {}", email, job_id);
            state.notices.info(message.clone());
            message
        }
    };

    Ok(format!("{}\n", message))
}

fn render_section(out: &mut String, title: &str, candidates: &[Candidate]) {
    out.push_str(&format!("{} ({})\n", title, candidates.len()));
    for c in candidates {
        let scores = c
            .scores
            .map(|s| format!("relevancy {:>3}  profile {:>3}  overall {:>3}", s.relevancy, s.profile, s.overall))
            .unwrap_or_else(|| "unscored".to_string());
        out.push_str(&format!("  {:<24} {:<32} {}\n", or_dash(&c.name), c.email, scores));
    }
}
