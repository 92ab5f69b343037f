use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Seconds to wait when acquiring a pooled connection
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    #[serde(skip_serializing)]
    pub token_secret: String,
    pub token_expiry_hours: u64,
    pub bcrypt_cost: u32,
}

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_TOKEN_EXPIRY_HOURS: u64 = 2;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Work factors bcrypt accepts
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

impl AppConfig {
    /// Build configuration from the process environment.
    ///
    /// `DATABASE_URL` (or the legacy `DBHOST`) and `TOKEN_SECRET` are required.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&process_var)
    }

    /// Same as [`AppConfig::from_env`] with an explicit variable lookup
    pub fn from_vars(vars: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = Environment::from_vars(vars);
        let mut config = Self::preset(environment, database_url(vars)?, token_secret(vars)?);

        if let Some(v) = vars("HOST") {
            config.api.host = v;
        }
        if let Some(port) = parse_var(vars, "PORT")? {
            config.api.port = port;
        }
        config.database.apply_overrides(vars)?;
        config.security.apply_overrides(vars)?;
        Ok(config)
    }

    /// Defaults for an environment; the two secrets are always caller supplied
    pub fn preset(environment: Environment, database_url: String, token_secret: String) -> Self {
        Self {
            environment,
            database: DatabaseConfig::preset(environment, database_url),
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            security: SecurityConfig::with_secret(token_secret),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

impl Environment {
    fn from_vars(vars: &dyn Fn(&str) -> Option<String>) -> Self {
        match vars("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

impl DatabaseConfig {
    /// Database section only; `TOKEN_SECRET` is not consulted
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&process_var)
    }

    pub fn from_vars(vars: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::preset(Environment::from_vars(vars), database_url(vars)?);
        config.apply_overrides(vars)?;
        Ok(config)
    }

    fn preset(environment: Environment, url: String) -> Self {
        let (max_connections, connection_timeout) = match environment {
            Environment::Development => (5, 30),
            Environment::Staging => (10, 10),
            Environment::Production => (20, 5),
        };
        Self {
            url,
            max_connections,
            connection_timeout,
        }
    }

    fn apply_overrides(&mut self, vars: &dyn Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = parse_var(vars, "DATABASE_MAX_CONNECTIONS")? {
            self.max_connections = v;
        }
        if let Some(v) = parse_var(vars, "DATABASE_CONNECTION_TIMEOUT")? {
            self.connection_timeout = v;
        }
        Ok(())
    }
}

impl SecurityConfig {
    /// Security section only; `DATABASE_URL` is not consulted
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&process_var)
    }

    pub fn from_vars(vars: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::with_secret(token_secret(vars)?);
        config.apply_overrides(vars)?;
        Ok(config)
    }

    fn with_secret(token_secret: String) -> Self {
        Self {
            token_secret,
            token_expiry_hours: DEFAULT_TOKEN_EXPIRY_HOURS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    fn apply_overrides(&mut self, vars: &dyn Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(v) = parse_var(vars, "SECURITY_TOKEN_EXPIRY_HOURS")? {
            self.token_expiry_hours = v;
        }
        if let Some(v) = parse_var::<u32>(vars, "SECURITY_BCRYPT_COST")? {
            if !BCRYPT_COST_RANGE.contains(&v) {
                return Err(ConfigError::Invalid {
                    name: "SECURITY_BCRYPT_COST",
                    value: v.to_string(),
                });
            }
            self.bcrypt_cost = v;
        }
        Ok(())
    }
}

fn process_var(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn database_url(vars: &dyn Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    vars("DATABASE_URL")
        .or_else(|| vars("DBHOST"))
        .ok_or(ConfigError::Missing("DATABASE_URL"))
}

fn token_secret(vars: &dyn Fn(&str) -> Option<String>) -> Result<String, ConfigError> {
    vars("TOKEN_SECRET").ok_or(ConfigError::Missing("TOKEN_SECRET"))
}

fn parse_var<T: std::str::FromStr>(
    vars: &dyn Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError> {
    match vars(name) {
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: v }),
        None => Ok(None),
    }
}
