use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use dotenv::dotenv;
use std::{env, fmt, str::FromStr, time::Duration};
use url::Url;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub api_base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,

    #[serde(default = "default_notice_ttl")]
    pub notice_ttl: String,

    #[serde(default = "default_max_resume_bytes")]
    pub max_resume_bytes: u64,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Interview-Portal".to_string()
}
fn default_request_timeout() -> String {
    "30s".to_string()
}
fn default_notice_ttl() -> String {
    "5s".to_string()
}
fn default_max_resume_bytes() -> u64 {
    5 * 1024 * 1024
}
fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env_name)).required(false))
            .add_source(Environment::with_prefix("APP").prefix_separator("_").separator("__").ignore_empty(true));

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;
        config.api_base_url = fill_or_env(config.api_base_url, "APP_API_BASE_URL")?;

        config.validate()?;
        Ok(config)
    }

    /// Settings for a backend at `api_base_url`, without touching files or env.
    pub fn for_base_url(api_base_url: impl Into<String>) -> Self {
        AppConfig {
            env: AppEnvironment::Testing,
            name: default_name(),
            api_base_url: api_base_url.into(),
            request_timeout: default_request_timeout(),
            notice_ttl: default_notice_ttl(),
            max_resume_bytes: default_max_resume_bytes(),
            log_format: default_log_format(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        match Url::parse(self.api_base_url.trim()) {
            Ok(url) if !matches!(url.scheme(), "http" | "https") => {
                errors.push("API_BASE_URL must use http or https".to_string());
            }
            Ok(url) if self.is_production() && url.scheme() != "https" => {
                errors.push("API_BASE_URL must use https in production".to_string());
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("API_BASE_URL is invalid: {}", e)),
        }
        if let Err(e) = humantime::parse_duration(&self.request_timeout) {
            errors.push(format!("REQUEST_TIMEOUT is invalid: {}", e));
        }
        if let Err(e) = humantime::parse_duration(&self.notice_ttl) {
            errors.push(format!("NOTICE_TTL is invalid: {}", e));
        }
        if self.max_resume_bytes == 0 {
            errors.push("MAX_RESUME_BYTES must be greater than zero".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Url::parse(self.api_base_url.trim())
            .map_err(|e| ConfigError::Message(format!("API_BASE_URL is invalid: {}", e)))
    }

    pub fn request_timeout(&self) -> Duration {
        humantime::parse_duration(&self.request_timeout).unwrap_or(Duration::from_secs(30))
    }

    pub fn notice_ttl(&self) -> Duration {
        humantime::parse_duration(&self.notice_ttl).unwrap_or(Duration::from_secs(5))
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}
