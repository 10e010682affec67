//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `NORDORA_DATA_DIR` - Directory holding persisted state (default: .nordora)
//! - `NORDORA_USERS_FILE` - YAML staff account directory; without it nobody can sign in
//! - `NORDORA_SESSION_HOURS` - Staff session lifetime in hours (default: 24)

use std::path::PathBuf;

use chrono::Duration;
use thiserror::Error;

use crate::services::auth::DEFAULT_SESSION_HOURS;

const DEFAULT_DATA_DIR: &str = ".nordora";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Where the file storage backend keeps its values
    pub data_dir: PathBuf,
    /// Staff account directory, if sign-in is enabled
    pub users_file: Option<PathBuf>,
    /// Lifetime of a staff session
    pub session_lifetime: Duration,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = non_empty(&lookup, "NORDORA_DATA_DIR")
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);
        let users_file = non_empty(&lookup, "NORDORA_USERS_FILE").map(PathBuf::from);
        let session_lifetime = parse_session_hours(non_empty(&lookup, "NORDORA_SESSION_HOURS"))?;

        Ok(Self {
            data_dir,
            users_file,
            session_lifetime,
        })
    }

    /// The account directory path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when sign-in is not configured.
    pub fn require_users_file(&self) -> Result<&PathBuf, ConfigError> {
        self.users_file
            .as_ref()
            .ok_or_else(|| ConfigError::MissingEnvVar("NORDORA_USERS_FILE".to_string()))
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            users_file: None,
            session_lifetime: Duration::hours(DEFAULT_SESSION_HOURS),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable, treating blank values as unset.
fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_session_hours(value: Option<String>) -> Result<Duration, ConfigError> {
    let Some(value) = value else {
        return Ok(Duration::hours(DEFAULT_SESSION_HOURS));
    };

    let invalid = |reason: String| ConfigError::InvalidEnvVar("NORDORA_SESSION_HOURS".to_string(), reason);
    let hours = value.parse::<i64>().map_err(|e| invalid(e.to_string()))?;
    if hours <= 0 {
        return Err(invalid("must be a positive number of hours".to_string()));
    }
    Duration::try_hours(hours).ok_or_else(|| invalid("too large".to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, StorefrontConfig::default());
        assert_eq!(config.data_dir, PathBuf::from(".nordora"));
        assert_eq!(config.session_lifetime, Duration::hours(24));
        assert!(config.require_users_file().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("NORDORA_DATA_DIR", "/var/lib/nordora"),
            ("NORDORA_USERS_FILE", "staff.yaml"),
            ("NORDORA_SESSION_HOURS", "8"),
        ])
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/nordora"));
        assert_eq!(config.require_users_file().unwrap(), &PathBuf::from("staff.yaml"));
        assert_eq!(config.session_lifetime, Duration::hours(8));
    }

    #[test]
    fn test_blank_values_fall_back() {
        let config = config_from(&[("NORDORA_DATA_DIR", "  "), ("NORDORA_SESSION_HOURS", "")]).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_invalid_session_hours() {
        for bad in ["zero", "0", "-3", "99999999999999"] {
            assert!(
                matches!(
                    config_from(&[("NORDORA_SESSION_HOURS", bad)]),
                    Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "NORDORA_SESSION_HOURS"
                ),
                "{bad} should be rejected"
            );
        }
    }
}
