use tracing::instrument;

use crate::{
    AppState,
    entities::user::{LoginUser, NewUser, Role, Session},
    errors::AppError,
};

#[instrument(skip(state, credentials), fields(email = %credentials.email))]
pub async fn login(state: &AppState, credentials: LoginUser, role: Option<Role>) -> Result<Session, AppError> {
    let session = state.session_gate.login_as(credentials, role).await?;
    state
        .notices
        .info(format!("Signed in as {} ({})", session.email, session.role));
    Ok(session)
}

#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn register(state: &AppState, request: NewUser) -> Result<String, AppError> {
    let response = state.session_gate.register(request).await?;

    let message = response
        .message
        .unwrap_or_else(|| "Registration successful.".to_string());
    state.notices.success(message.clone());

    let mut out = format!("{}\n", message);
    if let Some(id) = response.user_id {
        out.push_str(&format!("  user id:       {}\n", id));
    }
    if let Some(code) = response.employee_code.filter(|_| response.is_employee) {
        out.push_str(&format!("  employee code: {}\n", code));
    }
    Ok(out)
}
