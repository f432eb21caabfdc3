use crate::domain::{DomainError, DomainResult, GroupIdentity, qualify};

/// Object class of a global rights document
pub const GLOBAL_RIGHTS_CLASS: &str = "XWiki.XWikiGlobalRights";

/// Object class of a group membership entry
pub const GROUP_MEMBER_CLASS: &str = "XWiki.XWikiGroups";

/// Permission level revoked when a group loses read access
pub const VIEW_LEVEL: &str = "view";

/// Form-encoded request payload, in submission order
pub type FormFields = Vec<(&'static str, String)>;

/// Ordered, duplicate-free, non-empty set of permission level tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightsLevels(Vec<String>);

impl RightsLevels {
    pub fn new<I, S>(levels: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokens: Vec<String> = Vec::new();
        for level in levels {
            let level = level.as_ref().trim();
            if level.is_empty() {
                return Err(DomainError::ValidationError(
                    "rights level must not be blank".to_string(),
                ));
            }
            if level.contains(',') {
                return Err(DomainError::ValidationError(format!(
                    "rights level must not contain a comma: {}",
                    level
                )));
            }
            if !tokens.iter().any(|token| token == level) {
                tokens.push(level.to_string());
            }
        }

        if tokens.is_empty() {
            return Err(DomainError::ValidationError(
                "at least one rights level is required".to_string(),
            ));
        }

        Ok(Self(tokens))
    }

    pub fn view() -> Self {
        Self(vec![VIEW_LEVEL.to_string()])
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Comma-joined form value, no trailing separator
    pub fn joined(&self) -> String {
        self.0.join(",")
    }
}

/// Full replacement of a group's rights on a wiki space
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightsForm {
    pub group: GroupIdentity,
    pub allow: bool,
    pub levels: RightsLevels,
}

impl RightsForm {
    pub fn grant(group: GroupIdentity, levels: RightsLevels) -> Self {
        Self {
            group,
            allow: true,
            levels,
        }
    }

    pub fn revoke_view(group: GroupIdentity) -> Self {
        Self {
            group,
            allow: false,
            levels: RightsLevels::view(),
        }
    }

    pub fn to_fields(&self) -> FormFields {
        vec![
            ("className", GLOBAL_RIGHTS_CLASS.to_string()),
            ("property#allow", (if self.allow { "1" } else { "0" }).to_string()),
            ("property#groups", self.group.qualified_name()),
            ("property#levels", self.levels.joined()),
        ]
    }
}

/// A member to add to a group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MembershipForm {
    pub group: GroupIdentity,
    pub member_login: String,
}

impl MembershipForm {
    pub fn new(group: GroupIdentity, member_login: impl Into<String>) -> Self {
        Self {
            group,
            member_login: member_login.into(),
        }
    }

    pub fn to_fields(&self) -> FormFields {
        vec![
            ("className", GROUP_MEMBER_CLASS.to_string()),
            ("property#member", qualify(&self.member_login)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GroupRole, Scope};

    fn org_user_group() -> GroupIdentity {
        GroupIdentity::new(Scope::Organization, "ORG1", GroupRole::User)
    }

    fn field<'a>(fields: &'a FormFields, name: &str) -> &'a str {
        fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or_else(|| panic!("missing field {}", name))
    }

    #[test]
    fn test_levels_joined_with_single_commas() {
        let levels = RightsLevels::new(["view", "edit", "comment"]).unwrap();
        assert_eq!(levels.joined(), "view,edit,comment");
    }

    #[test]
    fn test_single_level_has_no_trailing_comma() {
        let levels = RightsLevels::new(vec!["edit".to_string()]).unwrap();
        assert_eq!(levels.joined(), "edit");
    }

    #[test]
    fn test_empty_levels_rejected() {
        let result = RightsLevels::new(Vec::<String>::new());
        assert!(matches!(result, Err(DomainError::ValidationError(_))));
    }

    #[test]
    fn test_blank_or_comma_levels_rejected() {
        assert!(matches!(
            RightsLevels::new(["view", " "]),
            Err(DomainError::ValidationError(_))
        ));
        assert!(matches!(
            RightsLevels::new(["view,edit"]),
            Err(DomainError::ValidationError(_))
        ));
    }

    #[test]
    fn test_duplicate_levels_keep_first_occurrence() {
        let levels = RightsLevels::new(["edit", "view", "edit"]).unwrap();
        assert_eq!(levels.as_slice(), ["edit".to_string(), "view".to_string()]);
        assert_eq!(levels.joined(), "edit,view");
    }

    #[test]
    fn test_grant_form_fields() {
        let levels = RightsLevels::new(["view", "edit"]).unwrap();
        let fields = RightsForm::grant(org_user_group(), levels).to_fields();

        assert_eq!(field(&fields, "className"), "XWiki.XWikiGlobalRights");
        assert_eq!(field(&fields, "property#allow"), "1");
        assert_eq!(field(&fields, "property#groups"), "XWiki.O-ORG1UserGroup");
        assert_eq!(field(&fields, "property#levels"), "view,edit");
    }

    #[test]
    fn test_revoke_view_form_fields() {
        let fields = RightsForm::revoke_view(org_user_group()).to_fields();

        assert_eq!(field(&fields, "property#allow"), "0");
        assert_eq!(field(&fields, "property#levels"), "view");
    }

    #[test]
    fn test_membership_form_fields() {
        let fields = MembershipForm::new(org_user_group(), "alice").to_fields();

        assert_eq!(field(&fields, "className"), "XWiki.XWikiGroups");
        assert_eq!(field(&fields, "property#member"), "XWiki.alice");
    }
}
