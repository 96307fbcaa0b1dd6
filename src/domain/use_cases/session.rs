use parking_lot::RwLock;
use validator::Validate;

use crate::{
    entities::user::{LoginUser, NewUser, RegisterResponse, Role, Session, View},
    errors::AppError,
    repositories::user::UserRepository,
};

/// Holds the logged-in session and decides which views it may open.
pub struct SessionGate<R>
where
    R: UserRepository,
{
    pub user_repo: R,
    session: RwLock<Option<Session>>,
}

impl<R> SessionGate<R>
where
    R: UserRepository,
{
    pub fn new(user_repo: R) -> Self {
        SessionGate {
            user_repo,
            session: RwLock::new(None),
        }
    }

    /// Logs in with the backend and starts a session. The role follows
    /// the backend's employee flag, defaulting to candidate.
    pub async fn login(&self, request: LoginUser) -> Result<Session, AppError> {
        self.login_as(request, None).await
    }

    /// Logs in asking for a specific role. A backend that reports the user
    /// is not an employee refuses the recruiter role.
    pub async fn login_as(&self, request: LoginUser, requested: Option<Role>) -> Result<Session, AppError> {
        request.validate()?;

        let response = self.user_repo.login(&request).await?;
        if !response.success {
            tracing::warn!(email = %request.email, "login rejected");
            return Err(AppError::Unauthorized(
                response
                    .message
                    .unwrap_or_else(|| "Invalid email or password".to_string()),
            ));
        }

        let role = resolve_role(response.is_employee, requested)?;
        let session = Session::new(request.email.clone(), response.user_id, role);
        *self.session.write() = Some(session.clone());

        tracing::info!(email = %session.email, role = %session.role, "user logged in");
        Ok(session)
    }

    /// Registers a new account. Does not log in.
    pub async fn register(&self, request: NewUser) -> Result<RegisterResponse, AppError> {
        request.validate()?;

        let response = self.user_repo.register(&request).await?;
        if !response.success {
            return Err(AppError::InvalidInput(
                response
                    .message
                    .unwrap_or_else(|| "Registration failed".to_string()),
            ));
        }

        tracing::info!(email = %request.email, is_employee = response.is_employee, "user registered");
        Ok(response)
    }

    pub fn current(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Returns the session if it may open `view`
    pub fn require(&self, view: View) -> Result<Session, AppError> {
        let session = self.current();
        match session {
            Some(session) if session.can_reach(view) => Ok(session),
            Some(session) => {
                tracing::warn!(email = %session.email, role = %session.role, %view, "view not reachable");
                Err(AppError::Forbidden(format!("A {} cannot open the {} view", session.role, view)))
            }
            None => Err(AppError::Unauthorized(format!("Log in to open the {} view", view))),
        }
    }

    pub fn logout(&self) -> Option<Session> {
        let previous = self.session.write().take();
        if let Some(session) = &previous {
            tracing::info!(email = %session.email, "user logged out");
        }
        previous
    }
}

fn resolve_role(is_employee: Option<bool>, requested: Option<Role>) -> Result<Role, AppError> {
    match (is_employee, requested) {
        (Some(false), Some(Role::Recruiter)) => {
            Err(AppError::Forbidden("Only employees can sign in as recruiters".to_string()))
        }
        (Some(true), None) => Ok(Role::Recruiter),
        (_, Some(role)) => Ok(role),
        (_, None) => Ok(Role::Candidate),
    }
}
