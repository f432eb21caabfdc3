use crate::domain::{
    DomainResult, GroupIdentity, MembershipForm, RightsForm, ScopeTarget, WikiActor,
};
use async_trait::async_trait;

/// Raw outcome of a wiki REST call. Status interpretation is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiResponse {
    pub status: u16,
    pub body: String,
}

impl WikiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport to the wiki's REST administration API.
///
/// Implementations return `DomainError::Transport` for network, IO and timeout
/// failures and never retry.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait WikiClient: Send + Sync {
    /// Create (or overwrite) the group document with the given XML body
    async fn create_group(
        &self,
        actor: &WikiActor,
        group: &GroupIdentity,
        xml_body: String,
    ) -> DomainResult<WikiResponse>;

    /// Add a membership object to a group document
    async fn add_group_member(
        &self,
        actor: &WikiActor,
        form: MembershipForm,
    ) -> DomainResult<WikiResponse>;

    /// Write a rights object on the target's wiki space
    async fn set_space_rights(
        &self,
        actor: &WikiActor,
        target: &ScopeTarget,
        form: RightsForm,
    ) -> DomainResult<WikiResponse>;
}

/// Answers whether a wiki document exists.
///
/// `Ok(false)` means the wiki reported the document absent; any failure to
/// find out is an `Err`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait DocumentExistenceOracle: Send + Sync {
    async fn document_exists(&self, actor: &WikiActor, document: &str) -> DomainResult<bool>;
}
