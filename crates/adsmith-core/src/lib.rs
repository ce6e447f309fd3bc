//! Shared domain types and configuration for the AdSmith service.
//!
//! This crate holds the pieces every other AdSmith crate leans on: the
//! environment-driven [`AppConfig`], and the audience descriptor table that
//! turns a (gender, age bracket) pair into marketing-tone guidance.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

pub mod app_config;
pub mod audience;
pub mod config;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
