//! Role — a named permission bundle assigned to users.
//!
//! Roles are stored as documents:
//!
//! ```json
//! { "_id": "r1", "name": "Lab staff", "permissions": [{ "moduleID": "labs" }] }
//! { "_id": "r0", "name": "Administrators", "permissions": "admin" }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::RoleId;

/// Literal permission value that makes a role a superuser.
pub const ADMIN: &str = "admin";

/// Permission entry `moduleID` that grants access to every module.
pub const WILDCARD: &str = "all";

/// A role document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "_id")]
    pub id: RoleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Permissions,
}

/// What a role is allowed to access.
///
/// Serialized either as the literal string `"admin"` or as a list of
/// [`PermissionEntry`]. Any other value grants nothing and is normalised to
/// an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPermissions", into = "RawPermissions")]
pub enum Permissions {
    Admin,
    Entries(Vec<PermissionEntry>),
}

impl Default for Permissions {
    fn default() -> Self {
        Self::Entries(Vec::new())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPermissions {
    Literal(String),
    Entries(Vec<PermissionEntry>),
    Other(serde_json::Value),
}

impl From<RawPermissions> for Permissions {
    fn from(raw: RawPermissions) -> Self {
        match raw {
            RawPermissions::Literal(value) if value == ADMIN => Self::Admin,
            RawPermissions::Literal(_) | RawPermissions::Other(_) => Self::default(),
            RawPermissions::Entries(entries) => Self::Entries(entries),
        }
    }
}

impl From<Permissions> for RawPermissions {
    fn from(permissions: Permissions) -> Self {
        match permissions {
            Permissions::Admin => Self::Literal(ADMIN.to_string()),
            Permissions::Entries(entries) => Self::Entries(entries),
        }
    }
}

/// Associates a role with one module, or with every module via [`WILDCARD`].
///
/// Decoding is lenient: an entry that is not an object, or whose `moduleID`
/// is not a string, is kept without a target and never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value")]
pub struct PermissionEntry {
    #[serde(rename = "moduleID", skip_serializing_if = "Option::is_none")]
    pub module_id: Option<String>,
}

impl From<serde_json::Value> for PermissionEntry {
    fn from(value: serde_json::Value) -> Self {
        Self {
            module_id: value
                .get("moduleID")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
        }
    }
}

impl PermissionEntry {
    #[must_use]
    pub fn for_module(module_id: impl Into<String>) -> Self {
        Self {
            module_id: Some(module_id.into()),
        }
    }

    #[must_use]
    pub fn wildcard() -> Self {
        Self::for_module(WILDCARD)
    }

    /// Match this entry against a module, checking the id first, then the
    /// wildcard, then the display name if the module declares one.
    #[must_use]
    pub fn matches(&self, module_id: &str, module_name: Option<&str>) -> Option<Grant> {
        let target = self.module_id.as_deref()?;
        if target == module_id {
            Some(Grant::ModuleId)
        } else if target == WILDCARD {
            Some(Grant::Wildcard)
        } else if Some(target) == module_name {
            Some(Grant::DisplayName)
        } else {
            None
        }
    }
}

/// The rule through which a role was granted access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// The role is a superuser.
    Admin,
    /// An entry names the module id.
    ModuleId,
    /// An entry is the `"all"` wildcard.
    Wildcard,
    /// An entry names the module's display name. Two modules sharing a
    /// display name are both granted by such an entry.
    DisplayName,
}

impl Role {
    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyId`] when the id is blank, which can
    /// only happen for documents deserialized from an untrusted source.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(())
    }

    /// Whether this role is a superuser.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.permissions, Permissions::Admin)
    }

    /// Decide whether this role grants access to the given module.
    ///
    /// Entries are scanned in order and the first match wins.
    #[must_use]
    pub fn grants(&self, module_id: &str, module_name: Option<&str>) -> Option<Grant> {
        match &self.permissions {
            Permissions::Admin => Some(Grant::Admin),
            Permissions::Entries(entries) => entries
                .iter()
                .find_map(|entry| entry.matches(module_id, module_name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn role(permissions: serde_json::Value) -> Role {
        serde_json::from_value(json!({ "_id": "r1", "permissions": permissions })).unwrap()
    }

    #[test]
    fn should_parse_admin_literal() {
        let role = role(json!("admin"));
        assert_eq!(role.permissions, Permissions::Admin);
    }

    #[test]
    fn should_parse_entry_list() {
        let role = role(json!([{ "moduleID": "labs" }, { "moduleID": "all" }]));
        assert_eq!(
            role.permissions,
            Permissions::Entries(vec![
                PermissionEntry::for_module("labs"),
                PermissionEntry::wildcard()
            ])
        );
    }

    #[test]
    fn should_default_to_no_permissions_when_field_missing() {
        let role: Role = serde_json::from_value(json!({ "_id": "r1" })).unwrap();
        assert_eq!(role.permissions, Permissions::default());
        assert_eq!(role.grants("labs", Some("Labs")), None);
    }

    #[test]
    fn should_grant_nothing_for_unknown_literal() {
        let role = role(json!("superuser"));
        assert_eq!(role.grants("labs", Some("Labs")), None);
    }

    #[test]
    fn should_serialize_admin_as_literal() {
        let role = Role {
            id: RoleId::new("r0").unwrap(),
            name: None,
            permissions: Permissions::Admin,
        };
        assert_eq!(
            serde_json::to_value(&role).unwrap(),
            json!({ "_id": "r0", "permissions": "admin" })
        );
    }

    #[test]
    fn should_fail_validation_when_deserialized_id_is_blank() {
        let role: Role = serde_json::from_value(json!({ "_id": "" })).unwrap();
        assert_eq!(role.validate(), Err(ValidationError::EmptyId));
    }

    #[test]
    fn should_grant_admin_regardless_of_module() {
        let role = role(json!("admin"));
        assert_eq!(role.grants("anything", Some("Anything")), Some(Grant::Admin));
    }

    #[test]
    fn should_grant_by_module_id() {
        let role = role(json!([{ "moduleID": "labs" }]));
        assert_eq!(role.grants("labs", Some("Labs")), Some(Grant::ModuleId));
    }

    #[test]
    fn should_grant_by_wildcard() {
        let role = role(json!([{ "moduleID": "all" }]));
        assert_eq!(role.grants("labs", Some("Labs")), Some(Grant::Wildcard));
    }

    #[test]
    fn should_grant_by_display_name() {
        let role = role(json!([{ "moduleID": "Labs" }]));
        assert_eq!(role.grants("labs", Some("Labs")), Some(Grant::DisplayName));
    }

    #[test]
    fn should_prefer_module_id_over_later_wildcard() {
        let role = role(json!([{ "moduleID": "labs" }, { "moduleID": "all" }]));
        assert_eq!(role.grants("labs", Some("Labs")), Some(Grant::ModuleId));
    }

    #[test]
    fn should_not_grant_other_module() {
        let role = role(json!([{ "moduleID": "other" }]));
        assert_eq!(role.grants("labs", Some("Labs")), None);
    }

    #[test]
    fn should_ignore_entry_without_module_id() {
        let role = role(json!([{ "comment": "empty" }]));
        assert_eq!(role.grants("labs", Some("Labs")), None);
    }

    #[test]
    fn should_skip_malformed_entries_and_keep_matching() {
        let role = role(json!([123, { "moduleID": 5 }, "labs", { "moduleID": "labs" }]));
        assert_eq!(role.grants("labs", Some("Labs")), Some(Grant::ModuleId));
        assert_eq!(role.grants("pharmacy", Some("Pharmacy")), None);
    }

    #[test]
    fn should_grant_nothing_for_non_list_permissions() {
        let role = role(json!({ "moduleID": "labs" }));
        assert_eq!(role.permissions, Permissions::default());
    }

    #[test]
    fn should_not_match_display_name_when_module_declares_none() {
        let role = role(json!([{ "moduleID": "Labs" }]));
        assert_eq!(role.grants("labs", None), None);
    }

    #[test]
    fn should_report_admin_only_for_admin_literal() {
        assert!(role(json!("admin")).is_admin());
        assert!(!role(json!([{ "moduleID": "all" }])).is_admin());
    }
}
