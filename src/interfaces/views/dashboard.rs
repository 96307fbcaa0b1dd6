use tracing::instrument;

use crate::{
    AppState,
    entities::user::View,
    errors::AppError,
    use_cases::dashboard::DashboardSnapshot,
    views::or_dash,
};

fn user_id(state: &AppState) -> Result<String, AppError> {
    let session = state.session_gate.require(View::Dashboard)?;
    session
        .user_id
        .ok_or_else(|| AppError::InvalidInput("The session has no user id".to_string()))
}

#[instrument(skip(state))]
pub async fn show_dashboard(state: &AppState) -> Result<String, AppError> {
    let user_id = user_id(state)?;

    let snapshot = state.dashboard(&user_id).load().await?;
    Ok(render(&snapshot))
}

#[instrument(skip(state))]
pub async fn apply(state: &AppState, job_id: &str) -> Result<String, AppError> {
    let user_id = user_id(state)?;

    let dashboard = state.dashboard(&user_id);
    dashboard.load().await?;
    let snapshot = dashboard.apply_for_job(job_id).await?;

    let title = snapshot
        .applied
        .iter()
        .find(|a| a.job_id == job_id)
        .map(|a| a.details.title.clone())
        .unwrap_or_else(|| job_id.to_string());
    state.notices.success(format!("Applied for {}", title));

    Ok(render(&snapshot))
}

fn render(snapshot: &DashboardSnapshot) -> String {
    let mut out = format!("Welcome, {}\n\n", or_dash(&snapshot.profile.name));

    out.push_str(&format!("Applied jobs ({})\n", snapshot.applied.len()));
    for job in &snapshot.applied {
        out.push_str(&format!(
            "  {:<26} {:<32} {:<20} {}\n",
            job.job_id,
            or_dash(&job.details.title),
            or_dash(&job.details.company),
            job.status
        ));
    }

    out.push_str(&format!("\nAvailable jobs ({})\n", snapshot.available.len()));
    for job in &snapshot.available {
        out.push_str(&format!(
            "  {:<26} {:<32} {:<20} {}\n",
            job.id,
            job.title,
            or_dash(&job.company),
            or_dash(&job.short_description)
        ));
    }
    out
}
