//! Drives a full editing session against in-memory collaborators:
//! create a workspace and a page, type into it, use the slash menu,
//! reorder blocks, and save.
//!
//! Run with: cargo run -p pagecraft-client --example editing_demo

use std::sync::Arc;

use async_trait::async_trait;
use pagecraft_client::{
    ApiError, CreateWorkspaceRequest, ErrorReporter, InviteMemberRequest, PageService,
    UpdateMemberRequest, UpdateWorkspaceRequest, UserProfile, WorkspaceService, WorkspaceStore,
};
use pagecraft_document::{Block, BlockKind, Page};
use pagecraft_workspace::Workspace;

struct LoggingPageService;

#[async_trait]
impl PageService for LoggingPageService {
    async fn create_page(&self, page: &Page) -> Result<(), ApiError> {
        tracing::info!(page_id = %page.id, title = %page.title, "persist: create page");
        Ok(())
    }

    async fn delete_page(&self, page_id: &str) -> Result<(), ApiError> {
        tracing::info!(page_id, "persist: delete page");
        Ok(())
    }

    async fn update_page_title(&self, page_id: &str, title: &str) -> Result<(), ApiError> {
        tracing::info!(page_id, title, "persist: update title");
        Ok(())
    }

    async fn update_page_blocks(&self, page_id: &str, blocks: &[Block]) -> Result<(), ApiError> {
        tracing::info!(page_id, count = blocks.len(), "persist: update blocks");
        Ok(())
    }
}

struct LoggingWorkspaceService;

#[async_trait]
impl WorkspaceService for LoggingWorkspaceService {
    async fn list_workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        Ok(Vec::new())
    }

    async fn create_workspace(&self, request: &CreateWorkspaceRequest) -> Result<(), ApiError> {
        tracing::info!(name = %request.name, "persist: create workspace");
        Ok(())
    }

    async fn update_workspace(
        &self,
        workspace_id: &str,
        _request: &UpdateWorkspaceRequest,
    ) -> Result<(), ApiError> {
        tracing::info!(workspace_id, "persist: update workspace");
        Ok(())
    }

    async fn delete_workspace(&self, workspace_id: &str) -> Result<(), ApiError> {
        tracing::info!(workspace_id, "persist: delete workspace");
        Ok(())
    }

    async fn invite_member(
        &self,
        workspace_id: &str,
        request: &InviteMemberRequest,
    ) -> Result<(), ApiError> {
        tracing::info!(workspace_id, email = %request.email, "persist: invite member");
        Ok(())
    }

    async fn remove_member(&self, workspace_id: &str, member_id: &str) -> Result<(), ApiError> {
        tracing::info!(workspace_id, member_id, "persist: remove member");
        Ok(())
    }

    async fn update_member(
        &self,
        workspace_id: &str,
        member_id: &str,
        _request: &UpdateMemberRequest,
    ) -> Result<(), ApiError> {
        tracing::info!(workspace_id, member_id, "persist: update member");
        Ok(())
    }
}

struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn auth_expired(&self) {
        eprintln!("session expired, signing out");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let mut store = WorkspaceStore::new(
        UserProfile {
            id: "user_demo".into(),
            email: "demo@example.com".into(),
            name: "Demo".into(),
        },
        Arc::new(LoggingPageService),
        Arc::new(LoggingWorkspaceService),
        Arc::new(StderrReporter),
    );

    store.create_workspace("Demo workspace", None, None).await;
    let page_id = store
        .create_page("Release checklist")
        .await
        .expect("workspace is selected and editable");

    let mut session = store.open_editor(&page_id).expect("page exists");

    // Type a heading via the slash menu.
    let first = session.blocks()[0].id.clone();
    session.focus_block(&first);
    session.edit_text(&first, "/head", 5);
    session.press_enter();
    session.edit_text(&first, "Launch day", 10);

    // A short checklist as a bulleted list.
    let item = session
        .add_block(BlockKind::BulletList, Some(first.as_str()))
        .unwrap();
    session.edit_text(&item, "tag the release", 15);
    session.press_enter();
    let second_item = session.focused_block_id().unwrap().to_string();
    session.edit_text(&second_item, "update the changelog", 20);

    // Drag the second item above the first.
    session.drag_drop(&second_item, &item);

    for (index, block) in session.blocks().iter().enumerate() {
        println!(
            "{index}: {:?} {:?}",
            block.kind(),
            block.text().unwrap_or("<opaque>")
        );
    }

    store.save_page(&session).await;
    Ok(())
}
