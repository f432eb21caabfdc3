use crate::config::ServiceConfig;
use crate::domain::GroupService;
use common::wiki::ReqwestWikiClient;
use common::WikiActor;
use std::sync::Arc;
use tracing::debug;

/// Wires the wiki transport and reconciler from configuration
pub struct WikiSync {
    group_service: Arc<GroupService>,
    config: ServiceConfig,
}

impl WikiSync {
    pub fn new(config: ServiceConfig) -> anyhow::Result<Self> {
        debug!("Initializing wiki sync module");

        let wiki_client = ReqwestWikiClient::new(&config.wiki_client_config())?;
        let document_oracle = wiki_client.create_document_oracle();
        let group_service = Arc::new(GroupService::new(Arc::new(wiki_client), document_oracle));

        Ok(Self {
            group_service,
            config,
        })
    }

    pub fn group_service(&self) -> Arc<GroupService> {
        self.group_service.clone()
    }

    /// Actor for `username` under the configured client token
    pub fn actor(&self, username: impl Into<String>) -> WikiActor {
        self.config.actor(username)
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}
