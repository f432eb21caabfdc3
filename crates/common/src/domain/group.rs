use std::fmt;

/// Wiki space that holds user and group documents.
pub const WIKI_USER_SPACE: &str = "XWiki";

/// Unit a group or rights grant applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Organization,
    Project,
}

impl Scope {
    pub fn letter(self) -> &'static str {
        match self {
            Scope::Organization => "O",
            Scope::Project => "P",
        }
    }
}

/// Role a group plays within its scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupRole {
    User,
    Admin,
}

impl GroupRole {
    pub fn from_admin_flag(is_admin: bool) -> Self {
        if is_admin {
            GroupRole::Admin
        } else {
            GroupRole::User
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            GroupRole::User => "UserGroup",
            GroupRole::Admin => "AdminGroup",
        }
    }
}

/// Name of a remote security group, e.g. `O-ORG1AdminGroup`.
///
/// The same string is the group's primary key on the wiki and the document
/// name used for existence checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupIdentity(String);

impl GroupIdentity {
    pub fn new(scope: Scope, code: &str, role: GroupRole) -> Self {
        Self(format!("{}-{}{}", scope.letter(), code, role.suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully-namespaced reference used inside rights documents
    pub fn qualified_name(&self) -> String {
        qualify(&self.0)
    }
}

impl fmt::Display for GroupIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Prefix a user or group name with the wiki user space.
pub fn qualify(name: &str) -> String {
    format!("{}.{}", WIKI_USER_SPACE, name)
}
