use std::{path::PathBuf, str::FromStr, time::Duration};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_APP_URL: &str = "http://localhost:8080";
const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_STORAGE_PATH: &str = "storage";

pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub bind_address: String,
    pub storage_path: PathBuf,

    /// Credentials for the administrator seeded on first start.
    pub admin: Option<AdminSeed>,

    pub jobs: JobConfig,
}

/// Administrator account created at startup when none exists.
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

/// Background job worker settings.
#[derive(Clone, Debug)]
pub struct JobConfig {
    pub workers: usize,
    pub max_attempts: u32,
    pub retry_delay: Duration,
    pub stale_after: Duration,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            max_attempts: 3,
            retry_delay: Duration::from_secs(5),
            stale_after: Duration::from_secs(600),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = JobConfig::default();

        let admin = match (
            std::env::var("ADMIN_EMAIL").ok(),
            std::env::var("ADMIN_PASSWORD").ok(),
        ) {
            (Some(email), Some(password)) => Some(AdminSeed { email, password }),
            _ => None,
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?,
            app_url: env_or("APP_URL", DEFAULT_APP_URL)
                .trim_end_matches('/')
                .to_string(),
            bind_address: env_or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            storage_path: PathBuf::from(env_or("STORAGE_PATH", DEFAULT_STORAGE_PATH)),
            admin,
            jobs: JobConfig {
                workers: parse_env("JOB_WORKERS", defaults.workers)?.max(1),
                max_attempts: parse_env("JOB_MAX_ATTEMPTS", defaults.max_attempts)?.max(1),
                retry_delay: Duration::from_secs(parse_env(
                    "JOB_RETRY_DELAY_SECS",
                    defaults.retry_delay.as_secs(),
                )?),
                stale_after: Duration::from_secs(parse_env(
                    "JOB_STALE_AFTER_SECS",
                    defaults.stale_after.as_secs(),
                )?),
            },
        })
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
