//! Configuration management for the bus tracker
//!
//! Handles environment variables and application settings.

use crate::services::api_client::SimulatedLatency;
use crate::services::calendar_service::WeekStart;
use chrono_tz::Tz;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const ENVIRONMENTS: [&str; 3] = ["development", "production", "test"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production, test)
    pub environment: String,

    /// Log level
    pub log_level: String,

    /// CORS origins (empty means allow all)
    pub cors_origins: Vec<String>,

    /// Upper bound for one client call, in seconds
    pub request_timeout: u64,

    /// Fixed simulated latency in milliseconds; `None` keeps per-operation delays
    pub latency_ms: Option<u64>,

    /// Timezone that decides which day is "today"
    pub timezone: Tz,

    /// First column of the calendar grid
    pub week_start: WeekStart,

    /// Dataset to load instead of the embedded sample
    pub data_file: Option<PathBuf>,

    /// Enable request logging
    pub enable_request_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            cors_origins: vec![],
            request_timeout: 30,
            latency_ms: None,
            timezone: chrono_tz::America::Bogota,
            week_start: WeekStart::Sunday,
            data_file: None,
            enable_request_logging: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        // Server configuration
        if let Some(host) = lookup("BUS_TRACKER_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("BUS_TRACKER_PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidPort(port))?;
        }

        if let Some(environment) = lookup("BUS_TRACKER_ENVIRONMENT") {
            config.environment = environment;
        }

        if let Some(log_level) = lookup("BUS_TRACKER_LOG_LEVEL") {
            config.log_level = log_level.to_lowercase();
        }

        if let Some(cors_origins) = lookup("BUS_TRACKER_CORS_ORIGINS") {
            config.cors_origins = cors_origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        // Client behaviour
        if let Some(timeout) = lookup("BUS_TRACKER_REQUEST_TIMEOUT") {
            config.request_timeout = timeout
                .parse()
                .map_err(|_| ConfigError::InvalidRequestTimeout(timeout))?;
        }

        if let Some(latency) = lookup("BUS_TRACKER_LATENCY_MS") {
            config.latency_ms = Some(latency.parse().map_err(|_| ConfigError::InvalidLatency(latency))?);
        }

        // Calendar
        if let Some(timezone) = lookup("BUS_TRACKER_TIMEZONE") {
            config.timezone = timezone
                .parse()
                .map_err(|_| ConfigError::InvalidTimezone(timezone))?;
        }

        if let Some(week_start) = lookup("BUS_TRACKER_WEEK_START") {
            config.week_start = week_start
                .parse()
                .map_err(|_| ConfigError::InvalidWeekStart(week_start))?;
        }

        // Data
        if let Some(data_file) = lookup("BUS_TRACKER_DATA_FILE") {
            config.data_file = Some(PathBuf::from(data_file));
        }

        // Feature flags
        if let Some(enable_logging) = lookup("BUS_TRACKER_ENABLE_REQUEST_LOGGING") {
            config.enable_request_logging = enable_logging
                .parse()
                .map_err(|_| ConfigError::InvalidBool(enable_logging))?;
        }

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort(self.port.to_string()));
        }

        if !ENVIRONMENTS.contains(&self.environment.as_str()) {
            return Err(ConfigError::UnknownEnvironment(self.environment.clone()));
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log_level.clone()));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidRequestTimeout(self.request_timeout.to_string()));
        }

        // Every call would time out
        if let Some(latency_ms) = self.latency_ms {
            if latency_ms >= self.request_timeout_ms() {
                return Err(ConfigError::LatencyExceedsTimeout {
                    latency_ms,
                    timeout_ms: self.request_timeout_ms(),
                });
            }
        }

        if let Some(data_file) = &self.data_file {
            if data_file.as_os_str().is_empty() {
                return Err(ConfigError::EmptyDataFile);
            }
        }

        Ok(())
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check if running in development mode
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Check if running in production mode
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Get request timeout in milliseconds
    pub fn request_timeout_ms(&self) -> u64 {
        self.request_timeout.saturating_mul(1000)
    }

    pub fn request_timeout_duration(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }

    /// Simulated latency the client should apply
    pub fn latency(&self) -> SimulatedLatency {
        match self.latency_ms {
            Some(ms) => SimulatedLatency::Fixed(Duration::from_millis(ms)),
            None => SimulatedLatency::PerOperation,
        }
    }

    /// Log configuration
    pub fn log_config(&self) {
        info!("Configuration loaded:");
        info!("  Environment: {}", self.environment);
        info!("  Bind address: {}", self.bind_address());
        info!("  Log level: {}", self.log_level);
        info!("  CORS origins: {:?}", self.cors_origins);
        info!("  Request timeout: {}s", self.request_timeout);
        match self.latency_ms {
            Some(ms) => info!("  Simulated latency: {}ms (fixed)", ms),
            None => info!("  Simulated latency: per operation"),
        }
        info!("  Timezone: {}", self.timezone);
        info!("  Week starts on: {}", self.week_start);
        match &self.data_file {
            Some(path) => info!("  Data file: {:?}", path),
            None => info!("  Data file: embedded sample"),
        }
        info!("  Request logging: {}", self.enable_request_logging);

        if self.is_production() && self.cors_origins.is_empty() {
            warn!("CORS allows any origin in production");
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port: {0}")]
    InvalidPort(String),

    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid request timeout: {0}")]
    InvalidRequestTimeout(String),

    #[error("Invalid simulated latency: {0}")]
    InvalidLatency(String),

    #[error("Simulated latency of {latency_ms}ms reaches the {timeout_ms}ms request timeout")]
    LatencyExceedsTimeout { latency_ms: u64, timeout_ms: u64 },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid week start: {0}")]
    InvalidWeekStart(String),

    #[error("Invalid boolean value: {0}")]
    InvalidBool(String),

    #[error("Empty data file path")]
    EmptyDataFile,
}
