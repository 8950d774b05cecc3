//! # Pagecraft Client
//!
//! Host-facing surface of the pagecraft engine: the collaborator
//! interfaces a backend implements, the typed error they speak, and the
//! [`WorkspaceStore`] session object a signed-in user holds per tab.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_client::{WorkspaceStore, UserProfile};
//!
//! let mut store = WorkspaceStore::new(user, pages, workspaces, reporter);
//! store.load_workspaces().await;
//!
//! let page_id = store.create_page("Meeting notes").await.unwrap();
//! let mut session = store.open_editor(&page_id).unwrap();
//!
//! // ...drive the session from UI events...
//! store.save_page(&session).await;
//! ```

mod config;
mod error;
mod services;
mod store;

pub use config::ClientConfig;
pub use error::ApiError;
pub use services::{
    CreateWorkspaceRequest, ErrorReporter, InviteMemberRequest, PageService,
    UpdateMemberRequest, UpdateWorkspaceRequest, WorkspaceService,
};
pub use store::{UserProfile, WorkspaceStore};
