use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::{MemberRole, Permission};

/// A (user, workspace) pairing carrying a role and an explicit
/// permission set. A user appears at most once per workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceMember {
    pub id: String,
    pub workspace_id: String,
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub role: MemberRole,
    pub permissions: Vec<Permission>,
    pub joined_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active_at: Option<DateTime<Utc>>,
}

impl WorkspaceMember {
    pub fn new(
        workspace_id: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: MemberRole,
        permissions: Vec<Permission>,
    ) -> Self {
        Self {
            id: pagecraft_common::member_id(),
            workspace_id: workspace_id.into(),
            user_id: user_id.into(),
            email: email.into(),
            name: name.into(),
            role,
            permissions,
            joined_at: Utc::now(),
            last_active_at: None,
        }
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}
