use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::member::WorkspaceMember;
use crate::role::{MemberRole, Permission};

/// Tenant-wide defaults and toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSettings {
    pub allow_guest_invites: bool,
    pub default_permission: Permission,
    pub require_approval: bool,
    pub public_pages: bool,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            allow_guest_invites: true,
            default_permission: Permission::CanView,
            require_approval: false,
            public_pages: false,
        }
    }
}

/// Input for creating a workspace. The owner's profile is seeded into
/// the first member entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkspaceInput {
    pub name: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub owner_id: String,
    pub owner_email: String,
    pub owner_name: String,
}

/// Administrative update of a member. Absent fields keep their current
/// value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMemberInput {
    pub member_id: String,
    pub role: Option<MemberRole>,
    pub permissions: Option<Vec<Permission>>,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MemberError {
    #[error("Member not found: {0}")]
    NotFound(String),

    #[error("The workspace owner cannot be edited or removed")]
    OwnerImmutable,

    #[error("User is already a member of this workspace: {0}")]
    DuplicateUser(String),
}

/// A tenant boundary containing pages and members. Exactly one member
/// holds the `owner` role (the creator); ownership is not transferable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub owner_id: String,
    pub members: Vec<WorkspaceMember>,
    pub settings: WorkspaceSettings,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Current user's role, when the workspace came from a
    /// current-user-scoped fetch. Permission resolution prefers this
    /// over searching `members`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
}

impl Workspace {
    /// Create a workspace with the owner seeded as its first member.
    pub fn new(input: CreateWorkspaceInput) -> Self {
        let now = Utc::now();
        let id = pagecraft_common::workspace_id();

        let owner = WorkspaceMember::new(
            id.clone(),
            input.owner_id.clone(),
            input.owner_email,
            input.owner_name,
            MemberRole::Owner,
            MemberRole::Owner.default_permissions().to_vec(),
        );

        Self {
            id,
            name: input.name,
            description: input.description,
            icon: input.icon,
            owner_id: input.owner_id,
            members: vec![owner],
            settings: WorkspaceSettings::default(),
            created_at: now,
            updated_at: now,
            role: None,
        }
    }

    /// Add a member. Each user joins a workspace at most once.
    pub fn add_member(
        &mut self,
        user_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: MemberRole,
        permissions: Vec<Permission>,
    ) -> Result<&WorkspaceMember, MemberError> {
        let user_id = user_id.into();
        if self.members.iter().any(|m| m.user_id == user_id) {
            return Err(MemberError::DuplicateUser(user_id));
        }

        let member = WorkspaceMember::new(self.id.clone(), user_id, email, name, role, permissions);
        self.members.push(member);
        self.updated_at = Utc::now();
        Ok(self.members.last().expect("member just pushed"))
    }

    /// Remove a member by member id. The owner-role member is immutable
    /// through this path.
    pub fn remove_member(&mut self, member_id: &str) -> Result<(), MemberError> {
        let member = self
            .members
            .iter()
            .find(|m| m.id == member_id)
            .ok_or_else(|| MemberError::NotFound(member_id.to_string()))?;

        if member.role == MemberRole::Owner {
            return Err(MemberError::OwnerImmutable);
        }

        self.members.retain(|m| m.id != member_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Update a member's role and/or permission set. The owner-role
    /// member is immutable through this path.
    pub fn update_member(&mut self, input: UpdateMemberInput) -> Result<(), MemberError> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.id == input.member_id)
            .ok_or_else(|| MemberError::NotFound(input.member_id.clone()))?;

        if member.role == MemberRole::Owner {
            return Err(MemberError::OwnerImmutable);
        }

        if let Some(role) = input.role {
            member.role = role;
        }
        if let Some(permissions) = input.permissions {
            member.permissions = permissions;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace() -> Workspace {
        Workspace::new(CreateWorkspaceInput {
            name: "Docs".into(),
            description: None,
            icon: None,
            owner_id: "user_owner".into(),
            owner_email: "owner@example.com".into(),
            owner_name: "Owner".into(),
        })
    }

    #[test]
    fn test_creation_seeds_owner_member() {
        let ws = workspace();
        assert_eq!(ws.members.len(), 1);
        assert_eq!(ws.members[0].role, MemberRole::Owner);
        assert_eq!(ws.members[0].user_id, ws.owner_id);
        assert_eq!(ws.members[0].workspace_id, ws.id);
    }

    #[test]
    fn test_duplicate_user_rejected() {
        let mut ws = workspace();
        ws.add_member(
            "user_2",
            "b@example.com",
            "B",
            MemberRole::Member,
            MemberRole::Member.default_permissions().to_vec(),
        )
        .unwrap();

        let err = ws
            .add_member(
                "user_2",
                "b@example.com",
                "B",
                MemberRole::Guest,
                vec![],
            )
            .unwrap_err();
        assert_eq!(err, MemberError::DuplicateUser("user_2".into()));
    }

    #[test]
    fn test_owner_member_is_immutable() {
        let mut ws = workspace();
        let owner_member_id = ws.members[0].id.clone();

        assert_eq!(
            ws.remove_member(&owner_member_id),
            Err(MemberError::OwnerImmutable)
        );
        assert_eq!(
            ws.update_member(UpdateMemberInput {
                member_id: owner_member_id,
                role: Some(MemberRole::Guest),
                permissions: None,
            }),
            Err(MemberError::OwnerImmutable)
        );
        assert_eq!(ws.members[0].role, MemberRole::Owner);
    }

    #[test]
    fn test_update_member_partial_fields() {
        let mut ws = workspace();
        let member_id = ws
            .add_member(
                "user_2",
                "b@example.com",
                "B",
                MemberRole::Member,
                MemberRole::Member.default_permissions().to_vec(),
            )
            .unwrap()
            .id
            .clone();

        ws.update_member(UpdateMemberInput {
            member_id: member_id.clone(),
            role: Some(MemberRole::Admin),
            permissions: None,
        })
        .unwrap();

        let member = ws.members.iter().find(|m| m.id == member_id).unwrap();
        assert_eq!(member.role, MemberRole::Admin);
        // Explicit permission set survives a role change.
        assert_eq!(
            member.permissions,
            MemberRole::Member.default_permissions().to_vec()
        );
    }

    #[test]
    fn test_remove_unknown_member() {
        let mut ws = workspace();
        assert!(matches!(
            ws.remove_member("member_missing"),
            Err(MemberError::NotFound(_))
        ));
    }
}
