use crate::domain::{DocumentExistenceOracle, DomainError, DomainResult, WikiActor};
use crate::wiki::client::with_actor;
use crate::wiki::error::transport_error;
use crate::wiki::WikiPaths;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Checks document existence with a GET on the document's page resource.
///
/// Only 200 and 404 are answers; every other status is a failed check.
pub struct ReqwestDocumentOracle {
    http: reqwest::Client,
    paths: Arc<WikiPaths>,
}

impl ReqwestDocumentOracle {
    pub fn new(http: reqwest::Client, paths: Arc<WikiPaths>) -> Self {
        Self { http, paths }
    }
}

#[async_trait]
impl DocumentExistenceOracle for ReqwestDocumentOracle {
    #[instrument(skip(self, actor), fields(username = %actor.username))]
    async fn document_exists(&self, actor: &WikiActor, document: &str) -> DomainResult<bool> {
        let request = self.http.get(self.paths.document_page(document));
        let response = with_actor(request, actor)
            .send()
            .await
            .map_err(|e| transport_error("document_exists", &e))?;

        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => {
                debug!(document, "document absent");
                Ok(false)
            }
            status => Err(DomainError::DocumentCheckFailed {
                document: document.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}
