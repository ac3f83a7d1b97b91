//! Client configuration.

use crate::signer::BASE_URL;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Settings for [`QobuzClient`](crate::QobuzClient) and its HTTP transport.
///
/// App credentials are not part of this struct; they live in the
/// [`CredentialRegistry`](crate::CredentialRegistry).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, `https://www.qobuz.com/api.json/0.2/` by default.
    pub base_url: String,
    pub user_agent: String,
    /// Per-request timeout applied by the transport.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_owned(),
            user_agent: USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    /// Point the client at another API root (a proxy or a local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
