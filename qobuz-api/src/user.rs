//! User login and account APIs.
//!
//! Endpoint: `POST user/login` (signed)
//!
//! Request (form body): `username`, `password` (MD5 hex), `device_manufacturer_id`.
//!
//! Response:
//! ```json
//! {
//!   "user_auth_token": "aBcD...",
//!   "user": {
//!     "id": 2113466,
//!     "credential": { "id": 57, "label": "..." },
//!     "device": { "id": 991 }
//!   }
//! }
//! ```
//!
//! Returns 401 for a wrong username/password pair, 400 for a bad signature.

use crate::client::{QobuzClient, is_success};
use crate::credentials::UserSession;
use crate::error::Result;
use crate::signer::params;
use crate::transport::Transport;

impl<T: Transport> QobuzClient<T> {
    /// Log in and store the session in this client's registry.
    ///
    /// See [`CredentialRegistry::login_with_device`](crate::CredentialRegistry::login_with_device)
    /// for the error cases.
    pub fn login(&self, username: &str, password: &str) -> Result<UserSession> {
        self.registry()
            .login(self.transport(), &self.config().base_url, username, password)
    }

    /// Drop the user session. Safe to call when nobody is logged in.
    pub fn logout(&self) {
        self.registry().logout();
    }

    /// Ask Qobuz to send a password-reset e-mail.
    pub fn reset_password(&self, username: &str) -> Result<bool> {
        let resp = self.request("user/resetPassword", params([("username", username)]))?;
        Ok(is_success(&resp))
    }
}
