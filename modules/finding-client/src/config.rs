use std::env;
use std::time::Duration;

use crate::error::{FindingError, Result};

const DEFAULT_ENDPOINT: &str = "https://svcs.ebay.com/services/search/FindingService/v1";
const DEFAULT_GLOBAL_ID: &str = "EBAY-US";
const DEFAULT_SERVICE_VERSION: &str = "1.13.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings needed to talk to the Finding service.
#[derive(Debug, Clone)]
pub struct FindingConfig {
    /// Application identifier, sent as `SECURITY-APPNAME`.
    pub app_id: String,
    pub global_id: String,
    pub service_version: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl FindingConfig {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            global_id: DEFAULT_GLOBAL_ID.to_string(),
            service_version: DEFAULT_SERVICE_VERSION.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from environment variables.
    /// `FINDING_APP_ID` is required, everything else falls back to defaults.
    pub fn from_env() -> Result<Self> {
        let app_id = env::var("FINDING_APP_ID").map_err(|_| {
            FindingError::Config("FINDING_APP_ID environment variable is required".to_string())
        })?;

        let mut config = Self::new(app_id);
        if let Ok(global_id) = env::var("FINDING_GLOBAL_ID") {
            config.global_id = global_id;
        }
        if let Ok(version) = env::var("FINDING_SERVICE_VERSION") {
            config.service_version = version;
        }
        if let Ok(endpoint) = env::var("FINDING_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Ok(secs) = env::var("FINDING_TIMEOUT_SECS") {
            let secs = secs.parse().map_err(|_| {
                FindingError::Config("FINDING_TIMEOUT_SECS must be a number".to_string())
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn with_global_id(mut self, global_id: impl Into<String>) -> Self {
        self.global_id = global_id.into();
        self
    }

    pub fn with_service_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = version.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.app_id.trim().is_empty() {
            return Err(FindingError::Config("app_id must not be empty".to_string()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(FindingError::Config("endpoint must not be empty".to_string()));
        }
        Ok(())
    }

    /// App id safe for logs: first four characters, the rest masked.
    pub fn redacted_app_id(&self) -> String {
        let visible: String = self.app_id.chars().take(4).collect();
        format!("{visible}***")
    }
}
