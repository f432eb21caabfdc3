use common::domain::{
    DocumentExistenceOracle, DomainError, DomainResult, GroupIdentity, GroupRole, MembershipForm,
    RightsForm, RightsLevels, ScopeTarget, WikiActor, WikiClient, group_xml,
};
use garde::Validate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

// ============================================================================
// Service Request Types
// ============================================================================

/// Request to add a user to a group
#[derive(Debug, Clone, Validate)]
pub struct AddMemberRequest {
    #[garde(skip)]
    pub group: GroupIdentity,
    #[garde(length(min = 1))]
    pub member_login: String,
}

/// Request to deny view on a target's space to its user group
#[derive(Debug, Clone, Validate)]
pub struct RevokeViewRequest {
    #[garde(dive)]
    pub target: ScopeTarget,
}

/// Request to grant rights on a target's space to its user or admin group
#[derive(Debug, Clone, Validate)]
pub struct GrantRightsRequest {
    #[garde(dive)]
    pub target: ScopeTarget,
    #[garde(length(min = 1), inner(length(min = 1)))]
    pub levels: Vec<String>,
    #[garde(skip)]
    pub is_admin: bool,
}

/// Request to deny view on an organization space
#[derive(Debug, Clone, Validate)]
pub struct DisableOrgGroupViewRequest {
    #[garde(length(min = 1))]
    pub organization_code: String,
    #[garde(length(min = 1))]
    pub organization_name: String,
}

/// Request to deny view on a project space
#[derive(Debug, Clone, Validate)]
pub struct DisableProjectGroupViewRequest {
    #[garde(length(min = 1))]
    pub organization_name: String,
    #[garde(length(min = 1))]
    pub project_code: String,
    #[garde(length(min = 1))]
    pub project_name: String,
}

/// Request to grant rights on an organization space
#[derive(Debug, Clone, Validate)]
pub struct AddOrgRightsRequest {
    #[garde(length(min = 1))]
    pub organization_code: String,
    #[garde(length(min = 1))]
    pub organization_name: String,
    #[garde(length(min = 1))]
    pub rights: Vec<String>,
    #[garde(skip)]
    pub is_admin: bool,
}

/// Request to grant rights on a project space
#[derive(Debug, Clone, Validate)]
pub struct AddProjectRightsRequest {
    #[garde(length(min = 1))]
    pub organization_name: String,
    #[garde(length(min = 1))]
    pub project_code: String,
    #[garde(length(min = 1))]
    pub project_name: String,
    #[garde(length(min = 1))]
    pub rights: Vec<String>,
    #[garde(skip)]
    pub is_admin: bool,
}

/// Reconciles platform groups and rights onto the wiki.
///
/// The boolean operations report remote failures (transport errors, timeouts,
/// unexpected status codes) as `Ok(false)` after logging them, and raise
/// precondition and contract failures as `Err`. The `try_*` operations return
/// every failure as a typed `Err` for callers that want fail-loud behavior.
/// Nothing here retries: rights documents are full replacements, so callers
/// may simply call again.
pub struct GroupService {
    wiki_client: Arc<dyn WikiClient>,
    document_oracle: Arc<dyn DocumentExistenceOracle>,
}

impl GroupService {
    pub fn new(
        wiki_client: Arc<dyn WikiClient>,
        document_oracle: Arc<dyn DocumentExistenceOracle>,
    ) -> Self {
        Self {
            wiki_client,
            document_oracle,
        }
    }

    /// Make sure the group document exists, creating it if absent.
    ///
    /// Returns `Ok(true)` if the group already existed or was created with 201/202.
    #[instrument(skip(self, group, actor), fields(group = %group, username = %actor.username))]
    pub async fn ensure_group_exists(
        &self,
        group: &GroupIdentity,
        actor: &WikiActor,
    ) -> DomainResult<bool> {
        settle(
            "ensure_group_exists",
            self.try_ensure_group_exists(group, actor).await,
        )
    }

    pub async fn try_ensure_group_exists(
        &self,
        group: &GroupIdentity,
        actor: &WikiActor,
    ) -> DomainResult<()> {
        if self.group_exists(group, actor).await? {
            debug!(group = %group, "group already exists");
            return Ok(());
        }

        self.create_group(group, actor).await
    }

    /// Add a user to a group, creating the group first if needed.
    ///
    /// Succeeds only on 201. A group that cannot be created is raised as
    /// `GroupCreationFailed`.
    #[instrument(
        skip(self, request, actor),
        fields(group = %request.group, member = %request.member_login)
    )]
    pub async fn add_member(
        &self,
        request: AddMemberRequest,
        actor: &WikiActor,
    ) -> DomainResult<bool> {
        settle("add_member", self.try_add_member(request, actor).await)
    }

    pub async fn try_add_member(
        &self,
        request: AddMemberRequest,
        actor: &WikiActor,
    ) -> DomainResult<()> {
        common::garde::validate(&request)?;

        let group = request.group;
        if !self.group_exists(&group, actor).await? {
            self.create_group(&group, actor).await.map_err(|e| match e {
                DomainError::Transport { .. } => {
                    error!(group = %group, error = %e, "could not create group for new member");
                    DomainError::GroupCreationFailed(group.to_string())
                }
                other => other,
            })?;
        }

        let form = MembershipForm::new(group, request.member_login);
        let response = self.wiki_client.add_group_member(actor, form).await?;
        expect_created("add_group_member", response.status)?;

        debug!("member added");
        Ok(())
    }

    /// Deny `view` on the target's space to its user group.
    ///
    /// The group must already exist; a missing group is `GroupNotFound`.
    #[instrument(
        skip(self, request, actor),
        fields(scope_code = %request.target.code(), username = %actor.username)
    )]
    pub async fn revoke_view(
        &self,
        request: RevokeViewRequest,
        actor: &WikiActor,
    ) -> DomainResult<bool> {
        settle("revoke_view", self.try_revoke_view(request, actor).await)
    }

    pub async fn try_revoke_view(
        &self,
        request: RevokeViewRequest,
        actor: &WikiActor,
    ) -> DomainResult<()> {
        common::garde::validate(&request)?;

        let group = request.target.group(GroupRole::User);
        self.require_group(&group, actor).await?;

        self.write_rights(&request.target, RightsForm::revoke_view(group), actor)
            .await
    }

    /// Grant `levels` on the target's space to its user or admin group.
    ///
    /// Empty levels are rejected before any remote call. The group must
    /// already exist; a missing group is `GroupNotFound`.
    #[instrument(
        skip(self, request, actor),
        fields(scope_code = %request.target.code(), is_admin = request.is_admin)
    )]
    pub async fn grant_rights(
        &self,
        request: GrantRightsRequest,
        actor: &WikiActor,
    ) -> DomainResult<bool> {
        settle("grant_rights", self.try_grant_rights(request, actor).await)
    }

    pub async fn try_grant_rights(
        &self,
        request: GrantRightsRequest,
        actor: &WikiActor,
    ) -> DomainResult<()> {
        common::garde::validate(&request)?;
        let levels = RightsLevels::new(&request.levels)?;

        let group = request
            .target
            .group(GroupRole::from_admin_flag(request.is_admin));
        self.require_group(&group, actor).await?;

        self.write_rights(&request.target, RightsForm::grant(group, levels), actor)
            .await
    }

    /// Deny view on an organization space to `O-{code}UserGroup`
    pub async fn disable_org_group_view(
        &self,
        request: DisableOrgGroupViewRequest,
        actor: &WikiActor,
    ) -> DomainResult<bool> {
        common::garde::validate(&request)?;

        let target =
            ScopeTarget::organization(request.organization_code, request.organization_name);
        self.revoke_view(RevokeViewRequest { target }, actor).await
    }

    /// Deny view on a project space to `P-{code}UserGroup`
    pub async fn disable_project_group_view(
        &self,
        request: DisableProjectGroupViewRequest,
        actor: &WikiActor,
    ) -> DomainResult<bool> {
        common::garde::validate(&request)?;

        let target = ScopeTarget::project(
            request.organization_name,
            request.project_code,
            request.project_name,
        );
        self.revoke_view(RevokeViewRequest { target }, actor).await
    }

    /// Grant rights on an organization space
    pub async fn add_rights_to_org(
        &self,
        request: AddOrgRightsRequest,
        actor: &WikiActor,
    ) -> DomainResult<bool> {
        common::garde::validate(&request)?;

        let target =
            ScopeTarget::organization(request.organization_code, request.organization_name);
        self.grant_rights(
            GrantRightsRequest {
                target,
                levels: request.rights,
                is_admin: request.is_admin,
            },
            actor,
        )
        .await
    }

    /// Grant rights on a project space
    pub async fn add_rights_to_project(
        &self,
        request: AddProjectRightsRequest,
        actor: &WikiActor,
    ) -> DomainResult<bool> {
        common::garde::validate(&request)?;

        let target = ScopeTarget::project(
            request.organization_name,
            request.project_code,
            request.project_name,
        );
        self.grant_rights(
            GrantRightsRequest {
                target,
                levels: request.rights,
                is_admin: request.is_admin,
            },
            actor,
        )
        .await
    }

    async fn group_exists(&self, group: &GroupIdentity, actor: &WikiActor) -> DomainResult<bool> {
        self.document_oracle
            .document_exists(actor, group.as_str())
            .await
    }

    async fn require_group(&self, group: &GroupIdentity, actor: &WikiActor) -> DomainResult<()> {
        if !self.group_exists(group, actor).await? {
            warn!(group = %group, "group document missing");
            return Err(DomainError::GroupNotFound(group.to_string()));
        }
        Ok(())
    }

    /// Transport errors pass through; an unexpected status is `GroupCreationFailed`.
    async fn create_group(&self, group: &GroupIdentity, actor: &WikiActor) -> DomainResult<()> {
        let response = self
            .wiki_client
            .create_group(actor, group, group_xml(&HashMap::new()))
            .await?;

        match response.status {
            201 | 202 => {
                info!(group = %group, status = response.status, "group created");
                Ok(())
            }
            status => {
                error!(group = %group, status, body = %response.body, "group creation rejected");
                Err(DomainError::GroupCreationFailed(group.to_string()))
            }
        }
    }

    async fn write_rights(
        &self,
        target: &ScopeTarget,
        form: RightsForm,
        actor: &WikiActor,
    ) -> DomainResult<()> {
        let response = self
            .wiki_client
            .set_space_rights(actor, target, form)
            .await?;
        expect_created("set_space_rights", response.status)?;

        debug!("rights object written");
        Ok(())
    }
}

fn expect_created(operation: &'static str, status: u16) -> DomainResult<()> {
    if status == 201 {
        Ok(())
    } else {
        Err(DomainError::UnexpectedStatus { operation, status })
    }
}

/// Fold fail-soft remote failures into `Ok(false)`.
fn settle(operation: &'static str, result: DomainResult<()>) -> DomainResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e @ DomainError::UnexpectedStatus { .. }) => {
            warn!(operation, error = %e, "wiki rejected request");
            Ok(false)
        }
        Err(e) if e.is_fail_soft() => {
            error!(operation, error = %e, "wiki request failed");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
