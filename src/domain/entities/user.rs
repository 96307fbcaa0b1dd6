use std::fmt;

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    domain::password::validate_password_strength,
    entities::job_posting::{lenient_string, non_blank},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(alias = "_id", deserialize_with = "lenient_string")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
}

/// Wiped from memory on drop.
#[derive(Validate, Zeroize, ZeroizeOnDrop)]
pub struct LoginUser {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "non_blank", message = "Password cannot be empty"))]
    pub password: String,
}

impl LoginUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginUser {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for LoginUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginUser")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Validate, Zeroize, ZeroizeOnDrop)]
#[validate(schema(function = "validate_employee_code"))]
pub struct NewUser {
    #[validate(custom(function = "non_blank", message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,

    pub is_employee: bool,
    pub employee_id: Option<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("is_employee", &self.is_employee)
            .field("employee_id", &self.employee_id)
            .finish()
    }
}

fn validate_employee_code(user: &NewUser) -> Result<(), ValidationError> {
    let has_code = user
        .employee_id
        .as_deref()
        .is_some_and(|code| !code.trim().is_empty());

    if user.is_employee && !has_code {
        let mut error = ValidationError::new("employee_id");
        error.message = Some("Employee ID is required for employees".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(alias = "user_id")]
    pub user_id: Option<String>,
    #[serde(alias = "is_employee")]
    pub is_employee: Option<bool>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: Option<String>,
    pub user_id: Option<String>,
    pub is_employee: bool,
    pub employee_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum Role {
    #[display("candidate")]
    Candidate,

    #[display("recruiter")]
    Recruiter,
}

/// Screens the front end can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum View {
    #[display("login")]
    Login,

    #[display("dashboard")]
    Dashboard,

    #[display("application form")]
    ApplicationForm,

    #[display("job registry")]
    JobRegistry,

    #[display("candidate pipeline")]
    CandidatePipeline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub email: String,
    pub user_id: Option<String>,
    pub role: Role,
    pub started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(email: impl Into<String>, user_id: Option<String>, role: Role) -> Self {
        Session {
            email: email.into(),
            user_id: user_id.filter(|id| !id.trim().is_empty()),
            role,
            started_at: Utc::now(),
        }
    }

    pub fn can_reach(&self, view: View) -> bool {
        match (self.role, view) {
            (_, View::Login) => true,
            (Role::Candidate, View::Dashboard) => self.user_id.is_some(),
            (Role::Candidate, View::ApplicationForm) => true,
            (Role::Recruiter, View::JobRegistry | View::CandidatePipeline) => true,
            _ => false,
        }
    }

    /// The view shown right after login.
    pub fn landing_view(&self) -> View {
        match self.role {
            Role::Recruiter => View::JobRegistry,
            Role::Candidate if self.user_id.is_some() => View::Dashboard,
            Role::Candidate => View::ApplicationForm,
        }
    }
}
