//! Request execution: middleware chain, transport hand-off, and response
//! classification.
//!
//! A [`Session`] turns a [`Method`] into a [`RequestPayload`], folds it
//! through the registered [`RequestMiddleware`] chain into the
//! [`Transport`], and classifies the [`RawResponse`] that comes back:
//! either a typed reply or a [`ClientError`] whose kind reflects the HTTP
//! status.

pub mod middleware;
pub mod transport;

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::client::Bot;
use crate::enums::RequestType;
use crate::errors::{ApiError, ApiErrorKind, ClientError};
use crate::methods::{Method, Response};
use crate::types::InputFile;

use middleware::{NextRequest, RequestMiddleware};
use transport::{ReqwestTransport, Transport};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// A fully prepared request, as seen by request middleware and transports.
#[derive(Debug, Clone)]
pub struct RequestPayload {
    /// Name of the API method.
    pub method_name: &'static str,
    /// HTTP shape of the call.
    pub request_type: RequestType,
    /// Endpoint path relative to the API base.
    pub path: String,
    /// The method serialized to JSON.
    pub data: Value,
    /// Files to attach on multipart calls.
    pub files: Vec<InputFile>,
    /// Timeout for this call.
    pub timeout: Duration,
}

/// What came back over the wire, before classification.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

/// Executes methods: middleware fold, transport, response classification.
pub struct Session {
    transport: Arc<dyn Transport>,
    middlewares: Vec<Arc<dyn RequestMiddleware>>,
    timeout: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ReqwestTransport::new())
    }
}

impl Session {
    /// A session over `transport` with the default timeout and no
    /// middleware.
    pub fn new<T: Transport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            middlewares: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the default per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Appends a request middleware; the first registered is the outermost.
    pub fn middleware<M: RequestMiddleware + 'static>(&mut self, middleware: M) -> &mut Self {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Executes `method` against `bot` and classifies the outcome.
    pub async fn execute<M: Method>(
        &self,
        bot: &Bot,
        method: &M,
        timeout: Option<Duration>,
    ) -> Result<M::Reply, ClientError> {
        let data = serde_json::to_value(method).map_err(|err| ClientError::Decode {
            message: format!("failed to serialize request: {err}"),
            data: String::new(),
        })?;
        let payload = RequestPayload {
            method_name: M::NAME,
            request_type: method.request_type(),
            path: method.path().into_owned(),
            data,
            files: method.files(),
            timeout: timeout.unwrap_or(self.timeout),
        };
        let next = NextRequest::new(&self.middlewares, self.transport.as_ref());
        let raw = next.run(bot, payload).await?;
        let response = check_response::<M::Reply>(M::NAME, raw.status, &raw.body)?;
        match response.result {
            Some(reply) => Ok(reply),
            None => Err(ClientError::Decode {
                message: "successful response carried no result".into(),
                data: raw.body,
            }),
        }
    }

    /// Shuts the transport down.
    pub async fn close(&self) -> Result<(), ClientError> {
        self.transport.close().await
    }
}

#[derive(serde::Deserialize)]
struct RawEnvelope {
    ok: bool,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error_code: Option<i32>,
}

fn success_status(status: u16) -> bool {
    (200..=226).contains(&status)
}

/// Classifies a raw response into a typed envelope or a [`ClientError`].
///
/// An empty body is synthesized into an envelope from the status code
/// alone. A body that is itself an envelope (an object with a boolean
/// `ok`) is taken as-is; any other JSON value is treated as a bare result
/// and wrapped.
pub fn check_response<T: serde::de::DeserializeOwned>(
    method: &'static str,
    status: u16,
    content: &str,
) -> Result<Response<T>, ClientError> {
    let trimmed = content.trim();
    let envelope = if trimmed.is_empty() {
        RawEnvelope {
            ok: status == 200,
            result: Some(Value::Bool(status == 200)),
            error_code: Some(i32::from(status)),
        }
    } else {
        let parsed: Value =
            serde_json::from_str(trimmed).map_err(|err| ClientError::Decode {
                message: format!("invalid JSON in response: {err}"),
                data: content.to_owned(),
            })?;
        let is_envelope =
            matches!(&parsed, Value::Object(map) if map.get("ok").is_some_and(Value::is_boolean));
        if is_envelope {
            serde_json::from_value(parsed).map_err(|err| ClientError::Decode {
                message: format!("malformed response envelope: {err}"),
                data: content.to_owned(),
            })?
        } else {
            RawEnvelope { ok: success_status(status), result: Some(parsed), error_code: None }
        }
    };

    if success_status(status) && envelope.ok {
        let value = envelope.result.unwrap_or(Value::Bool(true));
        let reply: T = serde_json::from_value(value).map_err(|err| ClientError::Decode {
            message: format!("failed to decode result: {err}"),
            data: content.to_owned(),
        })?;
        return Ok(Response { ok: true, result: Some(reply), error_code: envelope.error_code });
    }

    let message = match envelope.result {
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
        None => format!("request failed with status {status}"),
    };
    let kind = match status {
        400 => ApiErrorKind::BadRequest,
        401 => ApiErrorKind::Unauthorized,
        403 => ApiErrorKind::Forbidden,
        404 => ApiErrorKind::NotFound,
        409 => ApiErrorKind::Conflict,
        413 => ApiErrorKind::EntityTooLarge,
        422 => ApiErrorKind::UnprocessableEntity,
        500.. => {
            if message.contains("restart") {
                ApiErrorKind::RestartingServer
            } else {
                ApiErrorKind::ServerError
            }
        }
        _ => ApiErrorKind::Other,
    };
    Err(ApiError { method, message, kind }.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_synthesizes_from_status() {
        let response = check_response::<bool>("Test", 200, "").unwrap();
        assert_eq!(response.result, Some(true));

        let err = check_response::<bool>("Test", 404, "").unwrap_err();
        match err {
            ClientError::Api(api) => assert_eq!(api.kind, ApiErrorKind::NotFound),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn bare_result_is_wrapped() {
        let response = check_response::<Vec<u32>>("Test", 200, "[1, 2, 3]").unwrap();
        assert_eq!(response.result, Some(vec![1, 2, 3]));
    }

    #[test]
    fn envelope_error_message_is_extracted() {
        let err =
            check_response::<bool>("Test", 404, r#"{"ok": false, "result": "not found"}"#)
                .unwrap_err();
        match err {
            ClientError::Api(api) => {
                assert_eq!(api.kind, ApiErrorKind::NotFound);
                assert_eq!(api.message, "not found");
                assert_eq!(api.to_string(), "Server says - not found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn restart_message_is_classified() {
        let err = check_response::<bool>(
            "Test",
            503,
            r#"{"ok": false, "result": "server is restarting"}"#,
        )
        .unwrap_err();
        match err {
            ClientError::Api(api) => assert_eq!(api.kind, ApiErrorKind::RestartingServer),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = check_response::<bool>("Test", 200, "{not json").unwrap_err();
        assert!(matches!(err, ClientError::Decode { .. }));
    }
}
