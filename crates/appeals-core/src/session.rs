//! Session and permission names
//!
//! The session carries the capability set resolved by the excluded
//! authorisation layer; checks go through an injected evaluator.

use appeals_mapping::{HasCapabilities, SessionCapabilities};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Permission names checked by submappers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Permission {
    /// Edit case details
    UpdateCase,
    /// Assign the case officer
    SetCaseOfficer,
    /// Assign the inspector
    SetInspector,
    /// Upload and manage costs documents
    ManageCosts,
    /// Issue the decision
    IssueDecision,
    /// View the case history
    ViewCaseHistory,
    /// Arrange hearings and inquiries
    SetEvents,
}

impl Permission {
    /// Every permission
    pub const ALL: [Self; 7] = [
        Self::UpdateCase,
        Self::SetCaseOfficer,
        Self::SetInspector,
        Self::ManageCosts,
        Self::IssueDecision,
        Self::ViewCaseHistory,
        Self::SetEvents,
    ];

    /// Kebab-case name
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UpdateCase => "update-case",
            Self::SetCaseOfficer => "set-case-officer",
            Self::SetInspector => "set-inspector",
            Self::ManageCosts => "manage-costs",
            Self::IssueDecision => "issue-decision",
            Self::ViewCaseHistory => "view-case-history",
            Self::SetEvents => "set-events",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised permission name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission '{0}'")]
pub struct UnknownPermission(pub String);

impl FromStr for Permission {
    type Err = UnknownPermission;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| UnknownPermission(s.to_string()))
    }
}

/// Signed-in principal
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Directory id
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
}

/// Request session with its resolved capabilities
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Principal
    pub account: Account,
    /// Granted permissions
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
}

impl Session {
    /// Session for `account` with no permissions
    #[inline]
    #[must_use]
    pub fn new(account: Account) -> Self {
        Self {
            account,
            permissions: BTreeSet::new(),
        }
    }

    /// With a granted permission
    #[inline]
    #[must_use]
    pub fn with_permission(mut self, permission: Permission) -> Self {
        self.permissions.insert(permission);
        self
    }

    /// With granted permissions
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }
}

impl HasCapabilities<Permission> for Session {
    fn capabilities(&self) -> &BTreeSet<Permission> {
        &self.permissions
    }
}

/// Default evaluator: reads the capabilities resolved onto the session
pub type SessionEvaluator = SessionCapabilities<Permission, Session>;

/// Evaluator object carried in the submapper context
pub type DynEvaluator =
    dyn appeals_mapping::PermissionEvaluator<Permission = Permission, Session = Session>;
