//! Blocking client for the Qobuz JSON API.
//!
//! Every call goes through the same pipeline:
//!
//! 1. [`RequestSigner`] snapshots the [`CredentialRegistry`] and builds a
//!    [`SignedRequest`](crate::signer::SignedRequest) (`app_id`, `request_ts`,
//!    `request_sig`, `user_auth_token`)
//! 2. The [`Transport`] sends it: GET with a query string, or POST with a
//!    form body for `user/login`
//! 3. The JSON body is returned as-is, or mapped onto a type from
//!    [`types`](crate::types)
//!
//! Resource methods live in separate modules (`track`, `album`, `artist`,
//! `playlist`, `favorite`, `user`) as `impl QobuzClient` blocks.

use crate::config::ClientConfig;
use crate::credentials::{AppCredentials, CredentialRegistry};
use crate::error::{QobuzError, Result};
use crate::signer::{Params, RequestSigner};
use crate::transport::{HttpTransport, Transport};
use crate::types::Page;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

/// Qobuz API client.
///
/// Holds a shared [`CredentialRegistry`] and a [`Transport`]. Several clients
/// may share one registry; a login through any of them is visible to all.
pub struct QobuzClient<T = HttpTransport> {
    registry: Arc<CredentialRegistry>,
    transport: T,
    config: ClientConfig,
}

impl QobuzClient<HttpTransport> {
    /// Create a client with a fresh registry holding the given credentials.
    pub fn new(app_id: &str, app_secret: Option<&str>) -> Result<Self> {
        let registry = Arc::new(CredentialRegistry::new());
        registry.register_app(app_id, app_secret)?;
        Self::with_config(registry, ClientConfig::default())
    }

    /// Create a client from `QOBUZ_APP_ID` / `QOBUZ_APP_SECRET`.
    pub fn from_env() -> Result<Self> {
        let registry = Arc::new(CredentialRegistry::new());
        registry.register(AppCredentials::from_env()?);
        Self::with_config(registry, ClientConfig::default())
    }

    /// Create a client over an existing registry.
    pub fn with_config(registry: Arc<CredentialRegistry>, config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(registry, transport, config))
    }
}

impl<T: Transport> QobuzClient<T> {
    /// Create a client with a custom [`Transport`].
    pub fn with_transport(registry: Arc<CredentialRegistry>, transport: T, config: ClientConfig) -> Self {
        Self {
            registry,
            transport,
            config,
        }
    }

    /// The credential registry this client signs with.
    pub fn registry(&self) -> &CredentialRegistry {
        &self.registry
    }

    /// Base URL, user agent and timeout.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// A signer over this client's registry and base URL.
    pub fn signer(&self) -> RequestSigner<'_> {
        RequestSigner::new(&self.registry, &self.config.base_url)
    }

    /// Sign and send a request to `endpoint` (e.g. `album/get`).
    ///
    /// Returns the JSON body exactly as the server sent it.
    pub fn request(&self, endpoint: &str, params: Params) -> Result<Value> {
        let request = self.signer().build_request(endpoint, params)?;
        self.transport.send(&request)
    }

    /// [`request`](Self::request), then deserialize the whole body.
    pub(crate) fn fetch<D: DeserializeOwned>(&self, endpoint: &str, params: Params) -> Result<D> {
        let resp = self.request(endpoint, params)?;
        Ok(serde_json::from_value(resp)?)
    }

    /// [`request`](Self::request), then deserialize the paged list under `key`
    /// (`{"albums": {"items": [...], "total": 12, ...}}`).
    pub(crate) fn fetch_page<D: DeserializeOwned>(
        &self,
        endpoint: &str,
        key: &str,
        params: Params,
    ) -> Result<Page<D>> {
        let mut resp = self.request(endpoint, params)?;
        page_at(&mut resp, key)
    }

    /// Fail with [`QobuzError::NotLoggedIn`] unless a user session exists.
    pub(crate) fn require_session(&self) -> Result<()> {
        if self.registry.is_logged_in() {
            Ok(())
        } else {
            Err(QobuzError::NotLoggedIn)
        }
    }
}

/// The paged list under `key`; empty when the key is missing or `null`.
pub(crate) fn page_at<D: DeserializeOwned>(resp: &mut Value, key: &str) -> Result<Page<D>> {
    match resp.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(Page::default()),
        Some(list) => Ok(serde_json::from_value(list)?),
    }
}

/// `{"status": "success"}`, the acknowledgement of mutating endpoints.
pub(crate) fn is_success(resp: &Value) -> bool {
    resp["status"].as_str() == Some("success")
}


#[cfg(test)]
mod tests {
    use super::test_support::{client, logged_in};
    use super::*;
    use crate::signer::params;
    use serde_json::json;

    #[test]
    fn request_passes_body_through() {
        let client = client([Ok(json!({ "id": 1, "anything": [1, 2, 3] }))]);
        let resp = client
            .request("track/get", params([("track_id", "1")]))
            .unwrap();
        assert_eq!(resp, json!({ "id": 1, "anything": [1, 2, 3] }));

        let sent = client.transport().requests();
        assert_eq!(sent[0].parameters["app_id"], "X");
        assert!(!sent[0].parameters.contains_key("user_auth_token"));
    }

    #[test]
    fn signing_failure_sends_nothing() {
        let registry = Arc::new(CredentialRegistry::new());
        registry.register_app("X", None).unwrap();
        let client = QobuzClient::with_transport(
            registry,
            crate::transport::mock::MockTransport::new([]),
            ClientConfig::default(),
        );

        let err = client
            .request("track/getFileUrl", params([("track_id", "1")]))
            .unwrap_err();
        assert!(matches!(err, QobuzError::Configuration(_)));
        assert!(client.transport().requests().is_empty());
    }

    #[test]
    fn session_token_follows_registry() {
        let client = logged_in([Ok(json!({})), Ok(json!({}))]);
        client.request("album/get", Params::new()).unwrap();
        client.registry().logout();
        client.request("album/get", Params::new()).unwrap();

        let sent = client.transport().requests();
        assert_eq!(sent[0].parameters["user_auth_token"], "tok");
        assert!(!sent[1].parameters.contains_key("user_auth_token"));
    }

    #[test]
    fn require_session() {
        let client = client([]);
        assert!(matches!(client.require_session(), Err(QobuzError::NotLoggedIn)));
        let client = logged_in([]);
        assert!(client.require_session().is_ok());
    }

    #[test]
    fn missing_page_is_empty() {
        let mut resp = json!({ "id": 1 });
        let page: Page<Value> = page_at(&mut resp, "albums").unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);

        let mut resp = json!({ "albums": null });
        let page: Page<Value> = page_at(&mut resp, "albums").unwrap();
        assert!(page.items.is_empty());

        let mut resp = json!({ "albums": { "items": [1, 2], "total": 2 } });
        let page: Page<Value> = page_at(&mut resp, "albums").unwrap();
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn custom_base_url() {
        let registry = Arc::new(CredentialRegistry::new());
        registry.register_app("X", None).unwrap();
        let client = QobuzClient::with_transport(
            registry,
            crate::transport::mock::MockTransport::new([Ok(json!({}))]),
            ClientConfig::default().with_base_url("http://127.0.0.1:9000/api.json/0.2"),
        );
        client.request("album/get", Params::new()).unwrap();
        assert_eq!(
            client.transport().requests()[0].url,
            "http://127.0.0.1:9000/api.json/0.2/album/get"
        );
    }
}
