//! # Workspace Store
//!
//! The explicit session object a signed-in user holds for one browser
//! tab: the workspace list, the active workspace, its pages and
//! invitations, and every action the host UI dispatches.
//!
//! Mutations are optimistic: local state changes first, then the
//! matching collaborator call is awaited fire-and-forget. A failed call
//! never rolls local state back or surfaces through the document model —
//! it becomes one user-facing message on the [`ErrorReporter`], and auth
//! failures additionally hit the teardown hook. Reconciliation (re-fetch
//! or roll back) is the host's responsibility.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use pagecraft_document::{descendant_ids, Page};
use pagecraft_editor::EditorSession;
use pagecraft_workspace::{
    can_edit_settings, get_user_permissions, CreateWorkspaceInput, InviteMemberInput, MemberRole,
    Permission, PermissionCheck, UpdateMemberInput, Workspace, WorkspaceInvitation,
};

use crate::error::ApiError;
use crate::services::{
    CreateWorkspaceRequest, ErrorReporter, InviteMemberRequest, PageService, UpdateMemberRequest,
    UpdateWorkspaceRequest, WorkspaceService,
};

/// Identity of the signed-in user this store belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Per-tab session state over workspaces, pages, and invitations.
pub struct WorkspaceStore {
    user: UserProfile,
    workspaces: Vec<Workspace>,
    current_workspace_id: Option<String>,
    pages: Vec<Page>,
    invitations: Vec<WorkspaceInvitation>,
    page_service: Arc<dyn PageService>,
    workspace_service: Arc<dyn WorkspaceService>,
    reporter: Arc<dyn ErrorReporter>,
}

impl WorkspaceStore {
    pub fn new(
        user: UserProfile,
        page_service: Arc<dyn PageService>,
        workspace_service: Arc<dyn WorkspaceService>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            user,
            workspaces: Vec::new(),
            current_workspace_id: None,
            pages: Vec::new(),
            invitations: Vec::new(),
            page_service,
            workspace_service,
            reporter,
        }
    }

    pub fn current_user(&self) -> &UserProfile {
        &self.user
    }

    pub fn workspaces(&self) -> &[Workspace] {
        &self.workspaces
    }

    pub fn current_workspace(&self) -> Option<&Workspace> {
        let id = self.current_workspace_id.as_deref()?;
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn invitations(&self) -> &[WorkspaceInvitation] {
        &self.invitations
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Pages belonging to the active workspace.
    pub fn workspace_pages(&self) -> Vec<&Page> {
        match self.current_workspace_id.as_deref() {
            Some(id) => self.pages.iter().filter(|p| p.workspace_id == id).collect(),
            None => Vec::new(),
        }
    }

    pub fn page(&self, page_id: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == page_id)
    }

    /// Select the active workspace. Unknown ids clear the selection.
    pub fn set_current_workspace(&mut self, workspace_id: Option<&str>) {
        self.current_workspace_id = workspace_id
            .filter(|id| self.workspaces.iter().any(|w| w.id == *id))
            .map(str::to_string);
    }

    // ---- permission checks -------------------------------------------------

    /// Resolved permissions of the current user in the active workspace;
    /// all-false when no workspace is selected.
    pub fn user_permissions(&self) -> PermissionCheck {
        self.current_workspace()
            .map(|ws| get_user_permissions(ws, &self.user.id))
            .unwrap_or_else(PermissionCheck::none)
    }

    pub fn can_user_edit(&self) -> bool {
        self.user_permissions().can_edit
    }

    pub fn can_user_view(&self) -> bool {
        self.user_permissions().can_view
    }

    pub fn can_user_comment(&self) -> bool {
        self.user_permissions().can_comment
    }

    pub fn can_user_invite(&self) -> bool {
        self.user_permissions().can_invite
    }

    pub fn can_user_manage_members(&self) -> bool {
        self.user_permissions().can_manage_members
    }

    // ---- workspace actions -------------------------------------------------

    /// Fetch the user's workspaces, replacing the local list. Keeps the
    /// current selection when it still exists.
    pub async fn load_workspaces(&mut self) {
        match self.workspace_service.list_workspaces().await {
            Ok(workspaces) => {
                self.workspaces = workspaces;
                let current = self.current_workspace_id.take();
                self.set_current_workspace(current.as_deref());
            }
            Err(err) => self.handle_error(err, "loading workspaces"),
        }
    }

    /// Create a workspace owned by the current user and make it active.
    /// Returns the new workspace id.
    pub async fn create_workspace(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        icon: Option<String>,
    ) -> String {
        let name = name.into();
        let workspace = Workspace::new(CreateWorkspaceInput {
            name: name.clone(),
            description: description.clone(),
            icon: icon.clone(),
            owner_id: self.user.id.clone(),
            owner_email: self.user.email.clone(),
            owner_name: self.user.name.clone(),
        });
        let id = workspace.id.clone();
        debug!(workspace_id = %id, "creating workspace");

        self.workspaces.push(workspace);
        self.current_workspace_id = Some(id.clone());

        let request = CreateWorkspaceRequest {
            name,
            description,
            icon,
        };
        if let Err(err) = self.workspace_service.create_workspace(&request).await {
            self.handle_error(err, "creating workspace");
        }
        id
    }

    /// Rename a workspace. Requires the settings capability.
    pub async fn rename_workspace(&mut self, workspace_id: &str, name: impl Into<String>) {
        let allowed = self
            .workspaces
            .iter()
            .find(|w| w.id == workspace_id)
            .map(|ws| can_edit_settings(ws, &self.user.id))
            .unwrap_or(false);
        if !allowed {
            return;
        }

        let name = name.into();
        if let Some(ws) = self.workspaces.iter_mut().find(|w| w.id == workspace_id) {
            ws.rename(name.clone());
        }

        let request = UpdateWorkspaceRequest {
            name: Some(name),
            description: None,
            icon: None,
        };
        if let Err(err) = self
            .workspace_service
            .update_workspace(workspace_id, &request)
            .await
        {
            self.handle_error(err, "renaming workspace");
        }
    }

    /// Delete a workspace and every page it owns. Owner-only.
    pub async fn delete_workspace(&mut self, workspace_id: &str) {
        let allowed = self
            .workspaces
            .iter()
            .find(|w| w.id == workspace_id)
            .map(|ws| get_user_permissions(ws, &self.user.id).can_delete)
            .unwrap_or(false);
        if !allowed {
            return;
        }

        self.workspaces.retain(|w| w.id != workspace_id);
        self.pages.retain(|p| p.workspace_id != workspace_id);
        self.invitations.retain(|i| i.workspace_id != workspace_id);
        if self.current_workspace_id.as_deref() == Some(workspace_id) {
            self.current_workspace_id = None;
        }

        if let Err(err) = self.workspace_service.delete_workspace(workspace_id).await {
            self.handle_error(err, "deleting workspace");
        }
    }

    // ---- member actions ----------------------------------------------------

    /// Invite someone to the active workspace. Returns the invitation id.
    pub async fn invite_member(
        &mut self,
        email: impl Into<String>,
        role: MemberRole,
        permissions: Vec<Permission>,
    ) -> Option<String> {
        let workspace_id = self.current_workspace()?.id.clone();
        if !self.can_user_invite() {
            return None;
        }

        let email = email.into();
        let invitation = WorkspaceInvitation::new(InviteMemberInput {
            workspace_id: workspace_id.clone(),
            email: email.clone(),
            role,
            permissions: permissions.clone(),
            invited_by: self.user.id.clone(),
            invited_by_name: self.user.name.clone(),
        });
        let id = invitation.id.clone();
        self.invitations.push(invitation);

        let request = InviteMemberRequest {
            email,
            role,
            permissions,
        };
        if let Err(err) = self
            .workspace_service
            .invite_member(&workspace_id, &request)
            .await
        {
            self.handle_error(err, "inviting member");
        }
        Some(id)
    }

    /// Remove a member from the active workspace.
    pub async fn remove_member(&mut self, member_id: &str) {
        let Some(workspace_id) = self.current_workspace().map(|w| w.id.clone()) else {
            return;
        };
        if !self.can_user_manage_members() {
            return;
        }

        let removed = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == workspace_id)
            .map(|ws| ws.remove_member(member_id));
        match removed {
            Some(Ok(())) => {
                if let Err(err) = self
                    .workspace_service
                    .remove_member(&workspace_id, member_id)
                    .await
                {
                    self.handle_error(err, "removing member");
                }
            }
            Some(Err(err)) => self.reporter.report(&err.to_string()),
            None => {}
        }
    }

    /// Change a member's role and/or explicit permission set.
    pub async fn update_member_role(
        &mut self,
        member_id: &str,
        role: Option<MemberRole>,
        permissions: Option<Vec<Permission>>,
    ) {
        let Some(workspace_id) = self.current_workspace().map(|w| w.id.clone()) else {
            return;
        };
        if !self.can_user_manage_members() {
            return;
        }

        let updated = self
            .workspaces
            .iter_mut()
            .find(|w| w.id == workspace_id)
            .map(|ws| {
                ws.update_member(UpdateMemberInput {
                    member_id: member_id.to_string(),
                    role,
                    permissions: permissions.clone(),
                })
            });
        match updated {
            Some(Ok(())) => {
                let request = UpdateMemberRequest { role, permissions };
                if let Err(err) = self
                    .workspace_service
                    .update_member(&workspace_id, member_id, &request)
                    .await
                {
                    self.handle_error(err, "updating member");
                }
            }
            Some(Err(err)) => self.reporter.report(&err.to_string()),
            None => {}
        }
    }

    /// Accept a pending invitation (membership lands via the backend).
    pub fn accept_invitation(&mut self, invitation_id: &str) -> bool {
        self.invitations
            .iter_mut()
            .find(|i| i.id == invitation_id)
            .map(|i| i.accept())
            .unwrap_or(false)
    }

    /// Decline a pending invitation.
    pub fn decline_invitation(&mut self, invitation_id: &str) -> bool {
        self.invitations
            .iter_mut()
            .find(|i| i.id == invitation_id)
            .map(|i| i.decline())
            .unwrap_or(false)
    }

    /// Lazy expiry sweep: flip lapsed pending invitations to expired.
    pub fn expire_lapsed_invitations(&mut self) {
        let now = Utc::now();
        for invitation in &mut self.invitations {
            invitation.lapse_if_expired_at(now);
        }
    }

    // ---- page actions ------------------------------------------------------

    /// Create a page in the active workspace. Returns its id.
    pub async fn create_page(&mut self, title: impl Into<String>) -> Option<String> {
        let workspace_id = self.current_workspace()?.id.clone();
        if !self.can_user_edit() {
            return None;
        }

        let page = Page::new(workspace_id, title, self.user.id.clone());
        let id = page.id.clone();
        debug!(page_id = %id, "creating page");
        self.pages.push(page.clone());

        if let Err(err) = self.page_service.create_page(&page).await {
            self.handle_error(err, "creating page");
        }
        Some(id)
    }

    /// Create a page nested under `parent_id`, ordered after its
    /// existing siblings. Returns the new page's id.
    pub async fn create_child_page(
        &mut self,
        title: impl Into<String>,
        parent_id: &str,
    ) -> Option<String> {
        let workspace_id = self.current_workspace()?.id.clone();
        if !self.can_user_edit() {
            return None;
        }
        let parent = self.page(parent_id)?;
        if parent.workspace_id != workspace_id {
            return None;
        }

        let next_order = pagecraft_document::children_of(&self.pages, parent_id)
            .last()
            .map(|p| p.order + 1)
            .unwrap_or(0);
        let page = Page::new(workspace_id, title, self.user.id.clone())
            .with_parent(parent_id, next_order);
        let id = page.id.clone();
        self.pages.push(page.clone());

        if let Err(err) = self.page_service.create_page(&page).await {
            self.handle_error(err, "creating page");
        }
        Some(id)
    }

    /// Delete a page and all of its descendants.
    pub async fn delete_page(&mut self, page_id: &str) {
        if !self.can_user_edit() {
            return;
        }
        if self.page(page_id).is_none() {
            return;
        }

        let mut doomed = descendant_ids(&self.pages, page_id);
        doomed.push(page_id.to_string());
        debug!(page_id, cascade = doomed.len() - 1, "deleting page");
        self.pages.retain(|p| !doomed.contains(&p.id));

        for id in doomed {
            if let Err(err) = self.page_service.delete_page(&id).await {
                self.handle_error(err, "deleting page");
            }
        }
    }

    /// Propagate a title edit to the owning page.
    pub async fn update_page_title(&mut self, page_id: &str, title: impl Into<String>) {
        if !self.can_user_edit() {
            return;
        }
        let title = title.into();
        let Some(page) = self.pages.iter_mut().find(|p| p.id == page_id) else {
            return;
        };
        page.set_title(title.clone(), self.user.id.clone());

        if let Err(err) = self.page_service.update_page_title(page_id, &title).await {
            self.handle_error(err, "updating page title");
        }
    }

    /// Open an editing session over a page, resolving the current user's
    /// permissions against the active workspace.
    pub fn open_editor(&self, page_id: &str) -> Option<EditorSession> {
        let page = self.page(page_id)?;
        Some(EditorSession::open(page, self.user_permissions()))
    }

    /// Persist an editing session's block list back onto its page.
    pub async fn save_page(&mut self, session: &EditorSession) {
        if !self.can_user_edit() {
            return;
        }
        let page_id = session.page_id().to_string();
        let Some(page) = self.pages.iter_mut().find(|p| p.id == page_id) else {
            return;
        };
        page.set_blocks(session.blocks().to_vec(), self.user.id.clone());

        let blocks = session.blocks().to_vec();
        if let Err(err) = self.page_service.update_page_blocks(&page_id, &blocks).await {
            self.handle_error(err, "saving page blocks");
        }
    }

    // ---- error surface -----------------------------------------------------

    fn handle_error(&self, err: ApiError, context: &str) {
        warn!(error = %err, context, "collaborator call failed");
        if err.is_auth_error() {
            self.reporter.auth_expired();
        }
        self.reporter.report(&err.message);
    }
}
