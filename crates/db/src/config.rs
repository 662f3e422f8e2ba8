use std::time::Duration;

/// Environment variable holding the connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

#[derive(Debug, thiserror::Error)]
pub enum DbConfigError {
    #[error("DATABASE_URL must be set")]
    MissingUrl,

    #[error("{var} must be a valid {expected}, got '{value}'")]
    InvalidValue {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Store connection settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Connection string. `memory://` selects the in-process store.
    pub url: String,
    /// Upper bound on pooled connections (default: `20`).
    pub max_connections: u32,
    /// Time allowed to acquire or open a connection (default: `10`s).
    pub connect_timeout: Duration,
    /// Idle connections are closed after this long (default: `30`s).
    pub idle_timeout: Duration,
    /// Startup connection retries after the first attempt (default: `5`).
    pub connect_retries: u32,
    /// First backoff delay, doubled on each retry (default: `1000`ms).
    pub initial_retry_delay: Duration,
    /// Backoff ceiling (default: `10000`ms).
    pub max_retry_delay: Duration,
}

impl DbConfig {
    /// Defaults for everything but the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(30),
            connect_retries: 5,
            initial_retry_delay: Duration::from_millis(1000),
            max_retry_delay: Duration::from_millis(10_000),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default    |
    /// |---------------------------|------------|
    /// | `DATABASE_URL`            | (required) |
    /// | `DB_MAX_CONNECTIONS`      | `20`       |
    /// | `DB_CONNECT_TIMEOUT_SECS` | `10`       |
    /// | `DB_IDLE_TIMEOUT_SECS`    | `30`       |
    /// | `DB_CONNECT_RETRIES`      | `5`        |
    pub fn from_env() -> Result<Self, DbConfigError> {
        let url = std::env::var(DATABASE_URL_VAR)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .ok_or(DbConfigError::MissingUrl)?;

        let mut config = Self::new(url);
        if let Some(max) = env_number::<u32>("DB_MAX_CONNECTIONS")? {
            config.max_connections = max;
        }
        if let Some(secs) = env_number::<u64>("DB_CONNECT_TIMEOUT_SECS")? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = env_number::<u64>("DB_IDLE_TIMEOUT_SECS")? {
            config.idle_timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = env_number::<u32>("DB_CONNECT_RETRIES")? {
            config.connect_retries = retries;
        }
        Ok(config)
    }

    pub fn is_memory(&self) -> bool {
        self.url.starts_with("memory://")
    }

    /// Delay before retry number `attempt` (0-based): doubles from
    /// `initial_retry_delay`, capped at `max_retry_delay`.
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.initial_retry_delay
            .saturating_mul(factor)
            .min(self.max_retry_delay)
    }
}

fn env_number<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, DbConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| DbConfigError::InvalidValue {
                var,
                expected: std::any::type_name::<T>(),
                value,
            }),
        Err(_) => Ok(None),
    }
}
