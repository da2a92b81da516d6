//! Database connection configuration.
//!
//! Credentials are never compiled in. They come from either:
//!
//! - environment variables (a `.env` file is loaded first via `dotenvy`), or
//! - a TOML secrets file with a `[mysql]` table.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const ENV_HOST: &str = "SUPPLIER_DB_HOST";
pub const ENV_USER: &str = "SUPPLIER_DB_USER";
pub const ENV_PASSWORD: &str = "SUPPLIER_DB_PASSWORD";
pub const ENV_DATABASE: &str = "SUPPLIER_DB_NAME";
pub const ENV_PORT: &str = "SUPPLIER_DB_PORT";

pub const DEFAULT_PORT: u16 = 3306;

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct DbConfig {
    pub host: String,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Deserialize)]
struct SecretsFile {
    mysql: Option<DbConfig>,
}

impl DbConfig {
    /// Read the configuration from the process environment (after loading `.env`).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingVar(name.to_string()))
        };

        let port = match lookup(ENV_PORT) {
            Some(raw) if !raw.trim().is_empty() => raw.trim().parse::<u16>().map_err(|e| {
                ConfigError::Secrets(format!("{ENV_PORT} must be a port number: {e}"))
            })?,
            _ => DEFAULT_PORT,
        };

        Ok(Self {
            host: require(ENV_HOST)?,
            user: require(ENV_USER)?,
            password: require(ENV_PASSWORD)?,
            database: require(ENV_DATABASE)?,
            port,
        })
    }

    /// Parse a TOML secrets document containing a `[mysql]` table.
    pub fn from_secrets_str(text: &str) -> Result<Self, ConfigError> {
        let secrets: SecretsFile =
            toml::from_str(text).map_err(|e| ConfigError::Secrets(e.to_string()))?;
        secrets
            .mysql
            .ok_or_else(|| ConfigError::Secrets("missing [mysql] table".to_string()))
    }

    pub fn from_secrets_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Secrets(format!("{}: {e}", path.display())))?;
        Self::from_secrets_str(&text)
    }

    /// `host:port/database`, without credentials.
    pub fn display_target(&self) -> String {
        format!("{}:{}/{}", self.host, self.port, self.database)
    }
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("port", &self.port)
            .finish()
    }
}
