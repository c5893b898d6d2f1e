//! Configuration module for the agency ops backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Hourly rate given to members provisioned without one.
pub const DEFAULT_HOURLY_RATE: f64 = 150.0;

/// Role given to members provisioned without one.
pub const DEFAULT_ROLE: &str = "Kreatör";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key for API authentication (required in production)
    pub api_psk: Option<String>,
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Hourly rate assigned on first sign-in
    pub default_hourly_rate: f64,
    /// Role assigned on first sign-in when the identity carries none
    pub default_role: String,
    /// Lower-cased emails allowed to edit rates, roles and other members.
    /// Empty disables the check.
    pub admin_emails: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_psk = env::var("OPS_API_PSK").ok();

        let db_path = env::var("OPS_DB_PATH")
            .unwrap_or_else(|_| "./data/ops.sqlite".to_string())
            .into();

        let bind_addr = env::var("OPS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid OPS_BIND_ADDR format");

        let log_level = env::var("OPS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let default_hourly_rate = env::var("OPS_DEFAULT_HOURLY_RATE")
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(DEFAULT_HOURLY_RATE);

        let default_role =
            env::var("OPS_DEFAULT_ROLE").unwrap_or_else(|_| DEFAULT_ROLE.to_string());

        let admin_emails = env::var("OPS_ADMIN_EMAILS")
            .map(|v| parse_email_list(&v))
            .unwrap_or_default();

        Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            default_hourly_rate,
            default_role,
            admin_emails,
        }
    }

    /// Whether the given email belongs to an administrator.
    ///
    /// Without configured admins everyone is one (dev mode).
    pub fn is_admin(&self, email: Option<&str>) -> bool {
        if self.admin_emails.is_empty() {
            return true;
        }
        let Some(email) = email else {
            return false;
        };
        let email = email.trim().to_lowercase();
        !email.is_empty() && self.admin_emails.iter().any(|admin| *admin == email)
    }
}

fn parse_email_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
