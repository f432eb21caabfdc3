use crate::domain::{
    DocumentExistenceOracle, DomainResult, GroupIdentity, MembershipForm, RightsForm,
    ScopeTarget, WikiActor, WikiClient, WikiResponse,
};
use crate::wiki::error::transport_error;
use crate::wiki::{ReqwestDocumentOracle, WikiClientConfig, WikiPaths};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::RequestBuilder;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Header carrying the acting username
pub const USERNAME_HEADER: &str = "username";

/// Header carrying the configured client/site token
pub const CLIENT_HEADER: &str = "client";

/// Attach the actor's identity to a request
pub(crate) fn with_actor(request: RequestBuilder, actor: &WikiActor) -> RequestBuilder {
    request
        .header(USERNAME_HEADER, actor.username.as_str())
        .header(CLIENT_HEADER, actor.client.as_str())
}

/// WikiClient over the wiki's REST API using a pooled reqwest client
#[derive(Clone)]
pub struct ReqwestWikiClient {
    http: reqwest::Client,
    paths: Arc<WikiPaths>,
}

impl ReqwestWikiClient {
    pub fn new(config: &WikiClientConfig) -> Result<Self> {
        let paths = WikiPaths::new(&config.base_url, &config.wiki_name)?;

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .context("Failed to build wiki HTTP client")?;

        info!(
            base_url = %config.base_url,
            wiki = %config.wiki_name,
            timeout_secs = config.request_timeout_secs,
            "Configured wiki client"
        );

        Ok(Self {
            http,
            paths: Arc::new(paths),
        })
    }

    /// Create a DocumentExistenceOracle sharing this client's connection pool
    pub fn create_document_oracle(&self) -> Arc<dyn DocumentExistenceOracle> {
        Arc::new(ReqwestDocumentOracle::new(self.http.clone(), self.paths.clone()))
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> DomainResult<WikiResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(operation, &e))?;

        debug!(operation, status, "wiki responded");
        Ok(WikiResponse { status, body })
    }
}

#[async_trait]
impl WikiClient for ReqwestWikiClient {
    #[instrument(
        skip(self, actor, group, xml_body),
        fields(group = %group, username = %actor.username)
    )]
    async fn create_group(
        &self,
        actor: &WikiActor,
        group: &GroupIdentity,
        xml_body: String,
    ) -> DomainResult<WikiResponse> {
        let request = self
            .http
            .put(self.paths.group_page(group))
            .header(CONTENT_TYPE, "application/xml")
            .body(xml_body);

        self.send("create_group", with_actor(request, actor)).await
    }

    #[instrument(skip(self, actor, form), fields(group = %form.group, member = %form.member_login))]
    async fn add_group_member(
        &self,
        actor: &WikiActor,
        form: MembershipForm,
    ) -> DomainResult<WikiResponse> {
        let request = self
            .http
            .post(self.paths.group_objects(&form.group))
            .form(&form.to_fields());

        self.send("add_group_member", with_actor(request, actor)).await
    }

    #[instrument(skip(self, actor, target, form), fields(group = %form.group, allow = form.allow))]
    async fn set_space_rights(
        &self,
        actor: &WikiActor,
        target: &ScopeTarget,
        form: RightsForm,
    ) -> DomainResult<WikiResponse> {
        let url = self.paths.space_rights_objects(target);
        debug!(path = %url.path(), levels = %form.levels.joined(), "writing rights object");

        let request = self.http.post(url).form(&form.to_fields());

        self.send("set_space_rights", with_actor(request, actor)).await
    }
}
