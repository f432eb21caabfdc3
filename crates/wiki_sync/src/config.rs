use common::telemetry::TelemetryConfig;
use common::wiki::WikiClientConfig;
use common::WikiActor;
use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Service name reported in logs
    #[serde(default = "default_service_name")]
    pub service_name: String,

    // Wiki configuration
    /// Root URL of the wiki webapp
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Wiki name used in REST paths
    #[serde(default = "default_wiki_name")]
    pub wiki_name: String,

    /// Client/site token sent with every wiki call
    #[serde(default = "default_client")]
    pub client: String,

    /// Total request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_service_name() -> String {
    "wiki-sync".to_string()
}

// Wiki defaults
fn default_base_url() -> String {
    "http://localhost:8080/xwiki".to_string()
}

fn default_wiki_name() -> String {
    "xwiki".to_string()
}

fn default_client() -> String {
    "xwiki".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    5
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("WIKI"))
            .build()?
            .try_deserialize()
    }

    pub fn wiki_client_config(&self) -> WikiClientConfig {
        WikiClientConfig {
            base_url: self.base_url.clone(),
            wiki_name: self.wiki_name.clone(),
            request_timeout_secs: self.request_timeout_secs,
            connect_timeout_secs: self.connect_timeout_secs,
        }
    }

    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self.service_name.clone(),
            log_level: self.log_level.clone(),
        }
    }

    /// Actor for `username` carrying the configured client token
    pub fn actor(&self, username: impl Into<String>) -> WikiActor {
        WikiActor::new(username, self.client.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure tests run serially and don't interfere with each other
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let _lock = TEST_LOCK.lock().unwrap();

        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::remove_var("WIKI_CLIENT");
            std::env::remove_var("WIKI_REQUEST_TIMEOUT_SECS");
        }

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.client, "xwiki");
        assert_eq!(config.wiki_client_config().request_timeout_secs, 30);
    }

    #[test]
    fn test_custom_config() {
        let _lock = TEST_LOCK.lock().unwrap();

        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::set_var("WIKI_CLIENT", "site-a");
            std::env::set_var("WIKI_REQUEST_TIMEOUT_SECS", "7");
        }

        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config.client, "site-a");
        assert_eq!(config.request_timeout_secs, 7);

        let actor = config.actor("alice");
        assert_eq!(actor.username, "alice");
        assert_eq!(actor.client, "site-a");

        // Clean up
        // SAFETY: Test runs with mutex lock to prevent concurrent env access
        unsafe {
            std::env::remove_var("WIKI_CLIENT");
            std::env::remove_var("WIKI_REQUEST_TIMEOUT_SECS");
        }
    }
}
