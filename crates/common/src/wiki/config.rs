use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wiki REST connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiClientConfig {
    /// Root URL of the wiki webapp, e.g. `http://wiki:8080/xwiki`
    pub base_url: String,
    /// Wiki (farm member) name in REST paths
    pub wiki_name: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl WikiClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for WikiClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/xwiki".to_string(),
            wiki_name: "xwiki".to_string(),
            request_timeout_secs: 30,
            connect_timeout_secs: 5,
        }
    }
}
