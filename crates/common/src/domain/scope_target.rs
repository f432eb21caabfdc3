use crate::domain::{GroupIdentity, GroupRole, Scope};
use garde::Validate;

/// Organization or project whose wiki space a rights document is written to.
///
/// Codes name the security groups; names name the wiki spaces.
#[derive(Debug, Clone, PartialEq, Eq, Validate)]
pub enum ScopeTarget {
    Organization {
        #[garde(length(min = 1))]
        code: String,
        #[garde(length(min = 1))]
        name: String,
    },
    Project {
        #[garde(length(min = 1))]
        organization_name: String,
        #[garde(length(min = 1))]
        code: String,
        #[garde(length(min = 1))]
        name: String,
    },
}

impl ScopeTarget {
    pub fn organization(code: impl Into<String>, name: impl Into<String>) -> Self {
        ScopeTarget::Organization {
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn project(
        organization_name: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        ScopeTarget::Project {
            organization_name: organization_name.into(),
            code: code.into(),
            name: name.into(),
        }
    }

    pub fn scope(&self) -> Scope {
        match self {
            ScopeTarget::Organization { .. } => Scope::Organization,
            ScopeTarget::Project { .. } => Scope::Project,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            ScopeTarget::Organization { code, .. } | ScopeTarget::Project { code, .. } => code,
        }
    }

    /// Group of the given role that owns this target
    pub fn group(&self, role: GroupRole) -> GroupIdentity {
        GroupIdentity::new(self.scope(), self.code(), role)
    }

    /// Unencoded wiki space path, outermost space first.
    ///
    /// Callers placing these in a URL must percent-encode each segment.
    pub fn space_segments(&self) -> Vec<String> {
        match self {
            ScopeTarget::Organization { name, .. } => {
                vec![format!("{}-{}", Scope::Organization.letter(), name)]
            }
            ScopeTarget::Project {
                organization_name,
                name,
                ..
            } => vec![
                format!("{}-{}", Scope::Organization.letter(), organization_name),
                format!("{}-{}", Scope::Project.letter(), name),
            ],
        }
    }
}
