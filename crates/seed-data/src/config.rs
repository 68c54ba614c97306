//! Configuration types for fixture seeding.
//!
//! Everything is read from the process environment. Resolution is a pure
//! function over a lookup closure so the priority rules can be exercised
//! without touching the real environment.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// Presence selects the local emulator.
pub const EMULATOR_HOST_VAR: &str = "FIRESTORE_EMULATOR_HOST";
/// Path to an application default credentials file.
pub const CREDENTIALS_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";
/// Project identifier.
pub const PROJECT_VAR: &str = "GCLOUD_PROJECT";
/// Overrides the seeded user's document id.
pub const USER_ID_VAR: &str = "USER_ID";

/// Project used against the emulator when none is configured.
pub const DEFAULT_EMULATOR_PROJECT: &str = "demo-project";
/// User id seeded when `USER_ID` is unset.
pub const DEFAULT_USER_ID: &str = "test-user";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing credentials. Set GOOGLE_APPLICATION_CREDENTIALS or FIRESTORE_EMULATOR_HOST.")]
    MissingCredentials,
}

/// How the seeder reaches Firestore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ConnectionMode {
    /// Local emulator; no real credentials required.
    Emulator { host: String, project_id: String },
    /// Live database authenticated from a credentials file.
    DefaultCredentials {
        credentials_path: PathBuf,
        /// Explicit project; otherwise taken from the credentials file.
        project_id: Option<String>,
    },
}

impl ConnectionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionMode::Emulator { .. } => "emulator",
            ConnectionMode::DefaultCredentials { .. } => "default_credentials",
        }
    }
}

/// Configuration for a seeding run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeedConfig {
    /// Where to write.
    pub connection: ConnectionMode,

    /// Document id of the seeded user, also stamped on notifications.
    pub user_id: String,
}

impl SeedConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    ///
    /// The emulator host is checked before the credentials path. Empty
    /// values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let project_id = get(PROJECT_VAR);

        let connection = if let Some(host) = get(EMULATOR_HOST_VAR) {
            ConnectionMode::Emulator {
                host,
                project_id: project_id.unwrap_or_else(|| DEFAULT_EMULATOR_PROJECT.to_string()),
            }
        } else if let Some(path) = get(CREDENTIALS_VAR) {
            ConnectionMode::DefaultCredentials {
                credentials_path: PathBuf::from(path),
                project_id,
            }
        } else {
            return Err(ConfigError::MissingCredentials);
        };

        let user_id = get(USER_ID_VAR).unwrap_or_else(|| DEFAULT_USER_ID.to_string());

        Ok(Self {
            connection,
            user_id,
        })
    }
}
