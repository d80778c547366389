use std::path::PathBuf;
use std::str::FromStr;

use axum::http::HeaderValue;
use catalog_core::uploads::{UploadPolicy, DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_FILE_SIZE};
use catalog_db::DbConfig;

/// A configuration variable held a value that could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Deployment environment name (default: `development`).
    pub app_env: String,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    /// A single `*` allows any origin.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Length of the per-client rate-limit window in milliseconds
    /// (default: `900000`, fifteen minutes).
    pub rate_limit_window_ms: u64,
    /// Requests one client may make per window (default: `100`).
    pub rate_limit_max_requests: u32,
    /// Default tracing filter when `RUST_LOG` is unset (default: `info`).
    pub log_level: String,
    pub log_format: LogFormat,
    /// Relational store connection settings.
    pub db: DbConfig,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    pub upload: UploadPolicy,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 3000,
            app_env: "development".into(),
            cors_origins: vec!["http://localhost:3000".into()],
            request_timeout_secs: 30,
            rate_limit_window_ms: 900_000,
            rate_limit_max_requests: 100,
            log_level: "info".into(),
            log_format: LogFormat::Pretty,
            db: DbConfig::default(),
            upload_dir: PathBuf::from("uploads"),
            upload: UploadPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `HOST`                    | `0.0.0.0`                   |
    /// | `PORT`                    | `3000`                      |
    /// | `APP_ENV`                 | `development`               |
    /// | `CORS_ORIGINS`            | `http://localhost:3000`     |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                        |
    /// | `RATE_LIMIT_WINDOW_MS`    | `900000`                    |
    /// | `RATE_LIMIT_MAX_REQUESTS` | `100`                       |
    /// | `LOG_LEVEL`               | `info`                      |
    /// | `LOG_FORMAT`              | `pretty` (or `json`)        |
    /// | `DATABASE_URL`            | unset                       |
    /// | `DB_HOST`                 | `localhost`                 |
    /// | `DB_PORT`                 | `5432`                      |
    /// | `DB_USER`                 | `postgres`                  |
    /// | `DB_PASSWORD`             | empty                       |
    /// | `DB_NAME`                 | `catalog`                   |
    /// | `DB_MAX_CONNECTIONS`      | `10`                        |
    /// | `DB_ACQUIRE_TIMEOUT_SECS` | `30`                        |
    /// | `UPLOAD_DIR`              | `uploads`                   |
    /// | `MAX_FILE_SIZE`           | `10485760`                  |
    /// | `ALLOWED_FILE_TYPES`      | jpeg, png, gif, pdf, text   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        let db_defaults = DbConfig::default();

        let cors_origins = match get("CORS_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => defaults.cors_origins,
        };

        let log_format = match get("LOG_FORMAT").as_deref().map(str::to_ascii_lowercase) {
            None => LogFormat::Pretty,
            Some(f) if f == "pretty" => LogFormat::Pretty,
            Some(f) if f == "json" => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "LOG_FORMAT",
                    expected: "'pretty' or 'json'",
                    value: other,
                })
            }
        };

        let db = DbConfig {
            url: get("DATABASE_URL"),
            host: get("DB_HOST").unwrap_or(db_defaults.host),
            port: parse_or(&get, "DB_PORT", db_defaults.port, "a valid port")?,
            user: get("DB_USER").unwrap_or(db_defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(db_defaults.password),
            database: get("DB_NAME").unwrap_or(db_defaults.database),
            max_connections: parse_positive(
                &get,
                "DB_MAX_CONNECTIONS",
                db_defaults.max_connections,
            )?,
            acquire_timeout_secs: parse_positive(
                &get,
                "DB_ACQUIRE_TIMEOUT_SECS",
                db_defaults.acquire_timeout_secs,
            )?,
        };

        let allowed_types = match get("ALLOWED_FILE_TYPES") {
            Some(raw) => split_list(&raw),
            None => DEFAULT_ALLOWED_TYPES.iter().map(|t| t.to_string()).collect(),
        };
        let upload = UploadPolicy {
            max_file_size: parse_positive(&get, "MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE)?,
            allowed_types,
            ..UploadPolicy::default()
        };

        Ok(Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or(&get, "PORT", defaults.port, "a valid port")?,
            app_env: get("APP_ENV").unwrap_or(defaults.app_env),
            cors_origins,
            request_timeout_secs: parse_positive(
                &get,
                "REQUEST_TIMEOUT_SECS",
                defaults.request_timeout_secs,
            )?,
            rate_limit_window_ms: parse_positive(
                &get,
                "RATE_LIMIT_WINDOW_MS",
                defaults.rate_limit_window_ms,
            )?,
            rate_limit_max_requests: parse_positive(
                &get,
                "RATE_LIMIT_MAX_REQUESTS",
                defaults.rate_limit_max_requests,
            )?,
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format,
            db,
            upload_dir: get("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            upload,
        })
    }

    /// Whether `CORS_ORIGINS` is the `*` wildcard.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    let origins = split_list(raw);
    for origin in &origins {
        if origin != "*" && HeaderValue::from_str(origin).is_err() {
            return Err(ConfigError::Invalid {
                var: "CORS_ORIGINS",
                expected: "a comma-separated list of origins",
                value: origin.clone(),
            });
        }
    }
    Ok(origins)
}

fn parse_or<T, G>(get: &G, var: &'static str, default: T, expected: &'static str) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value: raw,
        }),
    }
}

fn parse_positive<T, G>(get: &G, var: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
    G: Fn(&str) -> Option<String>,
{
    let value = parse_or(get, var, default, "a positive integer")?;
    if value <= T::default() {
        return Err(ConfigError::Invalid {
            var,
            expected: "a positive integer",
            value: get(var).unwrap_or_default(),
        });
    }
    Ok(value)
}
