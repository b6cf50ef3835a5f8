//! Configuration management for the policy server
//!
//! Values are layered: the YAML file (default `conf/application.yml`), then
//! `POLICY.`-prefixed environment variables, then command line overrides.

use std::time::Duration;

use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use policy_common::PolicyError;

use crate::cli::Cli;
use crate::startup::{LogRotation, LoggingConfig};

pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";

pub const DEFAULT_VENDOR_TIMEOUT_MS: u64 = 5000;

/// Approval vendor endpoint settings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovalVendorConfig {
    /// Sync endpoint; `None` disables the vendor sync
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout_ms: u64,
}

impl Default for ApprovalVendorConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout_ms: DEFAULT_VENDOR_TIMEOUT_MS,
        }
    }
}

impl ApprovalVendorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        // An explicitly named file must exist; the default one is optional.
        let (file, required) = match &cli.config {
            Some(path) => (path.as_str(), true),
            None => (DEFAULT_CONFIG_FILE, false),
        };

        let mut config_builder = Config::builder()
            .add_source(config::File::with_name(file).required(required))
            .add_source(
                Environment::with_prefix("POLICY")
                    .separator(".")
                    .try_parsing(true),
            );

        if let Some(v) = &cli.database_url {
            config_builder = config_builder.set_override("db.url", v.as_str())?;
        }

        Ok(Configuration {
            config: config_builder.build()?,
        })
    }

    // ========================================================================
    // Database Configuration
    // ========================================================================

    pub fn database_url(&self) -> Result<String, PolicyError> {
        self.config
            .get_string("db.url")
            .map_err(|e| PolicyError::ConfigError(format!("db.url: {}", e)))
    }

    pub fn connect_options(&self) -> Result<ConnectOptions, PolicyError> {
        let max_connections = self
            .config
            .get_int("db.pool.maximumPoolSize")
            .unwrap_or(10) as u32;
        let min_connections = self
            .config
            .get_int("db.pool.minimumPoolSize")
            .unwrap_or(1) as u32;
        let connect_timeout = self
            .config
            .get_int("db.pool.connectionTimeout")
            .unwrap_or(30) as u64;
        let idle_timeout = self
            .config
            .get_int("db.pool.idleTimeout")
            .unwrap_or(10) as u64;
        let sqlx_logging = self
            .config
            .get_bool("db.pool.sqlxLogging")
            .unwrap_or(false);

        let mut opt = ConnectOptions::new(self.database_url()?);

        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .sqlx_logging(sqlx_logging);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            connect_timeout = connect_timeout,
            idle_timeout = idle_timeout,
            sqlx_logging = sqlx_logging,
            "Database connection pool configured"
        );

        Ok(opt)
    }

    pub async fn database_connection(&self) -> Result<DatabaseConnection, PolicyError> {
        let opt = self.connect_options()?;
        Database::connect(opt)
            .await
            .map_err(|e| PolicyError::DatabaseError(e.to_string()))
    }

    // ========================================================================
    // Approval Vendor Configuration
    // ========================================================================

    pub fn approval_vendor_config(&self) -> ApprovalVendorConfig {
        ApprovalVendorConfig {
            url: self
                .config
                .get_string("approval_vendor.url")
                .ok()
                .filter(|url| !url.is_empty()),
            api_key: self
                .config
                .get_string("approval_vendor.api_key")
                .ok()
                .filter(|key| !key.is_empty()),
            timeout_ms: self
                .config
                .get_int("approval_vendor.timeout_ms")
                .map(|v| v as u64)
                .unwrap_or(DEFAULT_VENDOR_TIMEOUT_MS),
        }
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    /// Logging settings: `POLICY_LOG_*` environment variables first, then any
    /// `logging.*` keys from the configuration on top.
    pub fn logging_config(&self) -> LoggingConfig {
        let mut logging = LoggingConfig::from_env();

        if let Ok(dir) = self.config.get_string("logging.dir") {
            logging.log_dir = dir.into();
        }
        if let Ok(console) = self.config.get_bool("logging.console") {
            logging.console_output = console;
        }
        if let Ok(file) = self.config.get_bool("logging.file") {
            logging.file_logging = file;
        }
        if let Some(level) = self
            .config
            .get_string("logging.level")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            logging.console_level = level;
            logging.file_level = level;
        }
        if let Some(rotation) = self
            .config
            .get_string("logging.rotation")
            .ok()
            .and_then(|v| v.parse::<LogRotation>().ok())
        {
            logging.rotation = rotation;
        }

        logging
    }
}
