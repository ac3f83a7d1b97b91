//! Sending signed requests.
//!
//! The core only needs one operation from the network layer:
//! [`Transport::send`]. [`HttpTransport`] is the blocking `reqwest`
//! implementation used by [`QobuzClient`](crate::QobuzClient); tests swap in
//! an in-memory one.
//!
//! Qobuz error payloads look like:
//!
//! ```json
//! { "status": "error", "code": 400, "message": "Invalid Request Signature parameter (request_sig)" }
//! ```

use crate::config::ClientConfig;
use crate::error::{QobuzError, Result};
use crate::signer::{Method, SignedRequest};
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, warn};

/// Sends a [`SignedRequest`] and returns the JSON body unchanged.
pub trait Transport {
    /// # Errors
    ///
    /// - [`QobuzError::Network`]: the request could not be completed
    /// - [`QobuzError::Remote`]: non-2xx status, unparsable body, or an
    ///   error payload
    fn send(&self, request: &SignedRequest) -> Result<Value>;
}

/// Blocking HTTP transport backed by [`reqwest::blocking::Client`].
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    /// Build the HTTP client with the configured user agent and timeout.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| QobuzError::Configuration(format!("cannot build HTTP client: {e}")))?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &SignedRequest) -> Result<Value> {
        let builder = match request.method {
            Method::Get => self.http.get(&request.url).query(&request.parameters),
            Method::Post => self.http.post(&request.url).form(&request.parameters),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(*name, value));

        debug!(endpoint = %request.endpoint, method = ?request.method, "sending request");
        let network = |source| QobuzError::Network {
            endpoint: request.endpoint.clone(),
            source,
        };
        let resp = builder.send().map_err(network)?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(network)?;

        interpret_response(&request.endpoint, status, &body)
    }
}

/// Map an HTTP status and body onto the JSON payload or a typed error.
pub(crate) fn interpret_response(endpoint: &str, status: u16, body: &str) -> Result<Value> {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let remote = |status: Option<u16>, message: String| {
        warn!(endpoint, status, %message, "remote error");
        QobuzError::Remote {
            endpoint: endpoint.to_owned(),
            status,
            message,
        }
    };

    if !(200..300).contains(&status) {
        let message = parsed
            .as_ref()
            .and_then(error_message)
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(remote(Some(status), message));
    }

    let Some(json) = parsed else {
        return Err(remote(Some(status), "response body is not valid JSON".into()));
    };
    if json.get("status").and_then(Value::as_str) == Some("error") {
        let code = json
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|c| u16::try_from(c).ok())
            .unwrap_or(status);
        let message = error_message(&json).unwrap_or_else(|| "unknown error".into());
        return Err(remote(Some(code), message));
    }
    Ok(json)
}

fn error_message(json: &Value) -> Option<String> {
    json.get("message")
        .and_then(Value::as_str)
        .map(String::from)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_passes_through() {
        let json = interpret_response("track/get", 200, r#"{"id":1,"title":"x"}"#).unwrap();
        assert_eq!(json["title"], "x");
    }

    #[test]
    fn non_success_status_uses_payload_message() {
        let err = interpret_response(
            "track/getFileUrl",
            400,
            r#"{"status":"error","code":400,"message":"Invalid Request Signature parameter (request_sig)"}"#,
        )
        .unwrap_err();
        match err {
            QobuzError::Remote {
                endpoint,
                status,
                message,
            } => {
                assert_eq!(endpoint, "track/getFileUrl");
                assert_eq!(status, Some(400));
                assert!(message.contains("request_sig"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body() {
        let err = interpret_response("album/get", 502, "<html>Bad Gateway</html>").unwrap_err();
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn unparsable_success_body_is_remote_error() {
        let err = interpret_response("album/get", 200, "not json").unwrap_err();
        assert!(matches!(err, QobuzError::Remote { status: Some(200), .. }));
    }

    #[test]
    fn error_payload_with_ok_status() {
        let err = interpret_response(
            "playlist/get",
            200,
            r#"{"status":"error","code":404,"message":"No result matching given argument"}"#,
        )
        .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn status_field_other_than_error_is_fine() {
        let json = interpret_response("favorite/status", 200, r#"{"status":"true"}"#).unwrap();
        assert_eq!(json["status"], "true");
    }
}
