use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use crate::{
    entities::user::{LoginResponse, LoginUser, NewUser, RegisterResponse, UserProfile},
    errors::AppError,
    http::{api_client::ApiClient, endpoints},
    repositories::http_repo::HttpUserRepo,
};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn login(&self, credentials: &LoginUser) -> Result<LoginResponse, AppError>;
    async fn register(&self, user: &NewUser) -> Result<RegisterResponse, AppError>;
    async fn get_user(&self, user_id: &str) -> Result<UserProfile, AppError>;
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
    is_employee: bool,
    employee_id: Option<&'a str>,
}

impl HttpUserRepo {
    pub fn new(api: ApiClient) -> Self {
        HttpUserRepo { api }
    }
}

#[async_trait]
impl UserRepository for HttpUserRepo {
    async fn login(&self, credentials: &LoginUser) -> Result<LoginResponse, AppError> {
        let body = LoginBody {
            email: &credentials.email,
            password: credentials.password.as_str(),
        };

        self.api
            .send_json(Method::POST, endpoints::LOGIN, &body)
            .await
            .map_err(|e| match e {
                AppError::Unauthorized(_) => AppError::Unauthorized("Invalid email or password".to_string()),
                _ => e,
            })
    }

    async fn register(&self, user: &NewUser) -> Result<RegisterResponse, AppError> {
        let body = RegisterBody {
            name: &user.name,
            email: &user.email,
            password: user.password.as_str(),
            is_employee: user.is_employee,
            employee_id: user.employee_id.as_deref().filter(|_| user.is_employee),
        };

        self.api.send_json(Method::POST, endpoints::REGISTER, &body).await
    }

    async fn get_user(&self, user_id: &str) -> Result<UserProfile, AppError> {
        self.api
            .get_json(&endpoints::user(user_id))
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => AppError::NotFound(format!("User {} not found", user_id)),
                _ => e,
            })
    }
}
