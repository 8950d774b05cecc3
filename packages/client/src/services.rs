//! Collaborator interfaces consumed by the store.
//!
//! Implementations live outside this workspace (HTTP, test doubles).
//! Every call must be idempotent under retry from the caller's
//! perspective; the store treats them as fire-and-forget and never
//! propagates their failures into document state.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use pagecraft_document::{Block, Page};
use pagecraft_workspace::{MemberRole, Permission, Workspace};

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWorkspaceRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteMemberRequest {
    pub email: String,
    pub role: MemberRole,
    pub permissions: Vec<Permission>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMemberRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<MemberRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
}

/// Page persistence collaborator.
#[async_trait]
pub trait PageService: Send + Sync {
    async fn create_page(&self, page: &Page) -> Result<(), ApiError>;
    async fn delete_page(&self, page_id: &str) -> Result<(), ApiError>;
    async fn update_page_title(&self, page_id: &str, title: &str) -> Result<(), ApiError>;
    async fn update_page_blocks(&self, page_id: &str, blocks: &[Block]) -> Result<(), ApiError>;
}

/// Workspace administration collaborator.
#[async_trait]
pub trait WorkspaceService: Send + Sync {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError>;
    async fn create_workspace(&self, request: &CreateWorkspaceRequest) -> Result<(), ApiError>;
    async fn update_workspace(
        &self,
        workspace_id: &str,
        request: &UpdateWorkspaceRequest,
    ) -> Result<(), ApiError>;
    async fn delete_workspace(&self, workspace_id: &str) -> Result<(), ApiError>;
    async fn invite_member(
        &self,
        workspace_id: &str,
        request: &InviteMemberRequest,
    ) -> Result<(), ApiError>;
    async fn remove_member(&self, workspace_id: &str, member_id: &str) -> Result<(), ApiError>;
    async fn update_member(
        &self,
        workspace_id: &str,
        member_id: &str,
        request: &UpdateMemberRequest,
    ) -> Result<(), ApiError>;
}

/// Where collaborator failures surface. The store converts every
/// failure into one user-facing message; auth failures additionally hit
/// the teardown hook (logout + redirect live behind it).
pub trait ErrorReporter: Send + Sync {
    fn report(&self, message: &str);
    fn auth_expired(&self);
}
