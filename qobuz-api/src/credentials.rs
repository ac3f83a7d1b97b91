//! Application credentials and the user session.
//!
//! A [`CredentialRegistry`] is constructed once by the caller and shared (by
//! reference or `Arc`) with every [`QobuzClient`](crate::QobuzClient) and
//! [`RequestSigner`]. It never touches disk: credentials live in memory for
//! the lifetime of the registry.
//!
//! ```no_run
//! use qobuz_api::CredentialRegistry;
//!
//! let registry = CredentialRegistry::new();
//! registry.register_app("100000000", Some("app-secret")).unwrap();
//! assert!(registry.current_session().is_none());
//! ```

use crate::error::{QobuzError, Result, display_status};
use crate::signer::{self, LOGIN_ENDPOINT, RequestSigner};
use crate::transport::Transport;
use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

const APP_ID_VAR: &str = "QOBUZ_APP_ID";
const APP_SECRET_VAR: &str = "QOBUZ_APP_SECRET";

/// Application id and (optional) application secret issued by Qobuz.
///
/// The secret is held in a [`SecretString`] and never shows up in `Debug`
/// output.
#[derive(Clone)]
pub struct AppCredentials {
    app_id: String,
    app_secret: Option<SecretString>,
}

impl AppCredentials {
    /// Create credentials from explicit values.
    ///
    /// An empty `app_secret` is treated as absent.
    ///
    /// # Errors
    ///
    /// [`QobuzError::Configuration`] if `app_id` is empty.
    pub fn new(app_id: &str, app_secret: Option<&str>) -> Result<Self> {
        if app_id.trim().is_empty() {
            return Err(QobuzError::Configuration("app id must not be empty".into()));
        }
        Ok(Self {
            app_id: app_id.to_owned(),
            app_secret: app_secret
                .filter(|s| !s.is_empty())
                .map(|s| SecretString::from(s.to_owned())),
        })
    }

    /// Load credentials from `QOBUZ_APP_ID` and `QOBUZ_APP_SECRET`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let app_id = lookup(APP_ID_VAR)
            .ok_or_else(|| QobuzError::Configuration(format!("{APP_ID_VAR} is not set")))?;
        let app_secret = lookup(APP_SECRET_VAR);
        Self::new(&app_id, app_secret.as_deref())
    }

    /// The registered app id.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Whether an app secret is available for signing.
    pub fn has_secret(&self) -> bool {
        self.app_secret.is_some()
    }

    /// Expose the app secret for signing. Never log the return value.
    pub(crate) fn expose_secret(&self) -> Option<&str> {
        self.app_secret.as_ref().map(ExposeSecret::expose_secret)
    }
}

impl fmt::Debug for AppCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCredentials")
            .field("app_id", &self.app_id)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Session returned by `user/login`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct UserSession {
    /// `user_auth_token`, sent with every call made on behalf of the user.
    pub auth_token: Option<String>,
    pub user_id: Option<String>,
    pub credential_id: Option<String>,
    pub device_id: Option<String>,
}

impl UserSession {
    /// Build a session from a token obtained elsewhere (e.g. a previous run).
    pub fn from_token(auth_token: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            auth_token: Some(auth_token.into()),
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    fn from_login_response(resp: &Value) -> Result<Self> {
        let auth_token = resp["user_auth_token"]
            .as_str()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                QobuzError::Authentication("login response has no user_auth_token".into())
            })?;
        let user = &resp["user"];
        let user_id = id_string(&user["id"]).ok_or_else(|| {
            QobuzError::Authentication("login response has no user.id".into())
        })?;
        Ok(Self {
            auth_token: Some(auth_token.to_owned()),
            user_id: Some(user_id),
            credential_id: id_string(&user["credential"]["id"]),
            device_id: id_string(&user["device"]["id"]),
        })
    }
}

impl fmt::Debug for UserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserSession")
            .field("auth_token", &self.auth_token.as_ref().map(|_| "[REDACTED]"))
            .field("user_id", &self.user_id)
            .field("credential_id", &self.credential_id)
            .field("device_id", &self.device_id)
            .finish()
    }
}

/// Qobuz ids come back as numbers or strings depending on the endpoint.
fn id_string(v: &Value) -> Option<String> {
    match v {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[derive(Default)]
struct State {
    app: Option<AppCredentials>,
    session: Option<UserSession>,
    /// Bumped on every registration; a login only completes in the
    /// generation it started in.
    generation: u64,
}

/// Shared, lock-guarded authentication state.
///
/// Writers (`register_app`, `login`, `logout`) replace whole values under the
/// write lock, so readers see either the old state or the new one.
#[derive(Default)]
pub struct CredentialRegistry {
    state: RwLock<State>,
}

impl CredentialRegistry {
    /// An empty registry: no app, no session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the application credentials.
    ///
    /// Any existing user session is dropped, since it belongs to the previous
    /// app identity.
    pub fn register_app(&self, app_id: &str, app_secret: Option<&str>) -> Result<()> {
        self.register(AppCredentials::new(app_id, app_secret)?);
        Ok(())
    }

    /// Register prebuilt credentials, e.g. from [`AppCredentials::from_env`].
    pub fn register(&self, credentials: AppCredentials) {
        info!(
            app_id = credentials.app_id(),
            signing = credentials.has_secret(),
            "registered app credentials"
        );
        let mut state = self.write();
        state.app = Some(credentials);
        state.session = None;
        state.generation = state.generation.wrapping_add(1);
    }

    /// Log in with a Qobuz username (or e-mail) and plain password.
    ///
    /// A random device id is generated for the login request.
    pub fn login<T: Transport + ?Sized>(
        &self,
        transport: &T,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<UserSession> {
        let device_id = uuid::Uuid::new_v4().to_string();
        self.login_with_device(transport, base_url, username, password, &device_id)
    }

    /// Log in with an explicit `device_manufacturer_id`.
    ///
    /// # Errors
    ///
    /// - [`QobuzError::Configuration`]: no app secret registered
    /// - [`QobuzError::Authentication`]: login rejected or response malformed
    /// - [`QobuzError::Network`]: transport failure
    ///
    /// On any error the current session is left untouched.
    pub fn login_with_device<T: Transport + ?Sized>(
        &self,
        transport: &T,
        base_url: &str,
        username: &str,
        password: &str,
        device_id: &str,
    ) -> Result<UserSession> {
        let (app, generation) = {
            let state = self.read();
            (state.app.clone(), state.generation)
        };
        let app = app.ok_or_else(|| QobuzError::Configuration("no app id registered".into()))?;
        if !app.has_secret() {
            return Err(QobuzError::Configuration(
                "login requires an app secret".into(),
            ));
        }

        let params = signer::params([
            ("username", username.to_owned()),
            ("password", hash_password(password)),
            ("device_manufacturer_id", device_id.to_owned()),
        ]);
        let request = RequestSigner::new(self, base_url).build_request(LOGIN_ENDPOINT, params)?;
        debug!(endpoint = LOGIN_ENDPOINT, "sending login request");

        let resp = transport.send(&request).map_err(|e| match e {
            QobuzError::Remote { status, message, .. } => QobuzError::Authentication(
                format!("login rejected (status {}): {message}", display_status(status)),
            ),
            other => other,
        })?;
        let session = UserSession::from_login_response(&resp)?;

        let mut state = self.write();
        if state.generation != generation {
            return Err(QobuzError::Authentication(
                "app credentials changed during login".into(),
            ));
        }
        state.session = Some(session.clone());
        drop(state);

        info!(user_id = session.user_id.as_deref(), "logged in");
        Ok(session)
    }

    /// Install a session obtained elsewhere.
    ///
    /// # Errors
    ///
    /// [`QobuzError::Configuration`] if no app is registered.
    pub fn restore_session(&self, session: UserSession) -> Result<()> {
        let mut state = self.write();
        if state.app.is_none() {
            return Err(QobuzError::Configuration("no app id registered".into()));
        }
        state.session = Some(session);
        Ok(())
    }

    /// Drop the user session. Safe to call when nobody is logged in.
    pub fn logout(&self) {
        if self.write().session.take().is_some() {
            info!("logged out");
        }
    }

    /// Snapshot of the registered app credentials.
    pub fn current_credentials(&self) -> Option<AppCredentials> {
        self.read().app.clone()
    }

    /// App credentials and user session, read under one lock.
    ///
    /// The pair always comes from the same registry state.
    pub fn snapshot(&self) -> (Option<AppCredentials>, Option<UserSession>) {
        let state = self.read();
        (state.app.clone(), state.session.clone())
    }

    /// Snapshot of the user session, if logged in.
    pub fn current_session(&self) -> Option<UserSession> {
        self.read().session.clone()
    }

    /// Whether a session with an auth token is installed.
    pub fn is_logged_in(&self) -> bool {
        self.read()
            .session
            .as_ref()
            .is_some_and(|s| s.auth_token.is_some())
    }

    fn read(&self) -> RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Qobuz expects the lowercase hex MD5 of the password, never the plain text.
fn hash_password(password: &str) -> String {
    format!("{:x}", Md5::digest(password.as_bytes()))
}
