use std::env;

const BASE_URL_VAR: &str = "PAGECRAFT_API_BASE_URL";
const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Connection settings for backend collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    /// Read configuration from the environment, falling back to the
    /// local development backend.
    pub fn from_env() -> Self {
        Self {
            base_url: env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Absolute url for an API endpoint path.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_cleanly() {
        let config = ClientConfig::with_base_url("http://localhost:4000/");
        assert_eq!(
            config.endpoint("/api/v1/workspaces"),
            "http://localhost:4000/api/v1/workspaces"
        );
    }
}
