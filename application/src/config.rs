//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use derive_more::{Display, Error};
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: Server,

    /// Postgres configuration.
    pub postgres: Postgres,

    /// Cache configuration.
    pub cache: Cache,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

/// Server configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Server {
    /// Host to bind the server to.
    #[default("0.0.0.0".to_owned())]
    pub host: String,

    /// Port to bind the server to.
    #[default(8080)]
    pub port: u16,

    /// [CORS] configuration.
    ///
    /// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
    pub cors: Cors,
}

/// [CORS] configuration.
///
/// [CORS]: https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cors {
    /// List of allowed origins.
    #[default(vec!["*".to_owned()])]
    pub origins: Vec<String>,
}

/// Postgres configuration.
///
/// Credentials have no defaults and must be provided explicitly.
#[derive(Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Postgres {
    /// Host to connect to.
    #[default("127.0.0.1".to_owned())]
    pub host: String,

    /// Port to connect to.
    #[default(5432)]
    pub port: u16,

    /// User to connect as.
    pub user: Option<String>,

    /// Password to connect with.
    pub password: Option<SecretString>,

    /// Database name to connect to.
    #[default("postgres".to_owned())]
    pub dbname: String,
}

impl TryFrom<Postgres> for service::infra::postgres::Config {
    type Error = MissingCredentialError;

    fn try_from(value: Postgres) -> Result<Self, Self::Error> {
        let Postgres {
            host,
            port,
            user,
            password,
            dbname,
        } = value;

        let user = user
            .filter(|u| !u.is_empty())
            .ok_or(MissingCredentialError::User)?;
        let password = password
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or(MissingCredentialError::Password)?;

        Ok(Self {
            host: Some(host),
            port: Some(port),
            user: Some(user),
            password: Some(password.expose_secret().to_owned()),
            dbname: Some(dbname),
            ..Self::default()
        })
    }
}

/// Error of a required [`Postgres`] credential being absent.
#[derive(Clone, Copy, Debug, Display, Error)]
pub enum MissingCredentialError {
    /// [`Postgres::user`] is not provided.
    #[display("`postgres.user` is not configured")]
    User,

    /// [`Postgres::password`] is not provided.
    #[display("`postgres.password` is not configured")]
    Password,
}

/// Cache configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Cache {
    /// Time a cached response stays fresh.
    #[default(time::Duration::from_secs(60))]
    #[serde(with = "humantime_serde")]
    pub ttl: time::Duration,

    /// Maximum number of responses kept in each cache.
    #[default(1_000)]
    pub max_capacity: u64,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
