use thiserror::Error;

/// Typed failure from a backend collaborator. Carries the HTTP status
/// when one was received; network-level failures have none.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status: Option<u16>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, status: u16) -> Self {
        Self {
            message: message.into(),
            status: Some(status),
        }
    }

    /// A failure with no HTTP response (connection refused, timeout).
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Whether this failure means the session's credentials are no
    /// longer usable. The consuming session tears down and redirects on
    /// these; every other failure is surfaced as a plain message.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}
