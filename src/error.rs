// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::error::Error as StdError;
use std::str::from_utf8;
use std::time::Duration;

use http::header::RETRY_AFTER;
use http::Error as HttpError;
use http::HeaderMap;
use http::StatusCode;

use serde::Deserialize;
use serde_json::from_slice;
use serde_json::from_value;
use serde_json::Error as JsonError;
use serde_json::Value;

use thiserror::Error;

use url::ParseError;

use crate::Str;


/// The type of error a transport may report.
pub type TransportError = Box<dyn StdError + Send + Sync + 'static>;


/// The error type as used by this crate.
///
/// Failures reported by the API are classified by HTTP status into
/// dedicated variants, so that callers can match on them directly
/// (e.g., to implement their own back off on [`Error::RateLimit`]).
#[derive(Debug, Error)]
pub enum Error {
  /// The client configuration is invalid. Reported before any network
  /// activity takes place.
  #[error("invalid configuration: {0}")]
  Configuration(Str),
  /// The request could not be completed at the transport level, either
  /// because it timed out or because of a connection problem.
  #[error("{message}")]
  Network {
    /// A description of the failure.
    message: String,
    /// The underlying transport error, if any.
    #[source]
    source: Option<TransportError>,
  },
  /// The API rejected the request as malformed (HTTP 400).
  #[error("{message}")]
  BadRequest {
    /// The message provided by the API or a generic one.
    message: String,
    /// The decoded response body, if it was valid JSON.
    body: Option<Value>,
  },
  /// The request was not authenticated, e.g., because the session is
  /// missing or expired (HTTP 401).
  #[error("{message}")]
  Authentication {
    /// The message provided by the API or a generic one.
    message: String,
    /// The decoded response body, if it was valid JSON.
    body: Option<Value>,
  },
  /// The session is not permitted to access the resource (HTTP 403).
  #[error("{message}")]
  Authorization {
    /// The message provided by the API or a generic one.
    message: String,
    /// The decoded response body, if it was valid JSON.
    body: Option<Value>,
  },
  /// The requested resource does not exist (HTTP 404).
  #[error("{message}")]
  NotFound {
    /// The message provided by the API or a generic one.
    message: String,
    /// The decoded response body, if it was valid JSON.
    body: Option<Value>,
  },
  /// The rate limit was exceeded, causing the request to be denied
  /// (HTTP 429).
  #[error("{message}")]
  RateLimit {
    /// The message provided by the API or a generic one.
    message: String,
    /// The number of seconds to wait before retrying, as advertised by
    /// the `Retry-After` header.
    retry_after: Option<u64>,
    /// The decoded response body, if it was valid JSON.
    body: Option<Value>,
  },
  /// The service is temporarily unavailable (HTTP 503).
  #[error("{message}")]
  ServiceUnavailable {
    /// The message provided by the API or a generic one.
    message: String,
    /// The number of seconds to wait before retrying, as advertised by
    /// the `Retry-After` header.
    retry_after: Option<u64>,
    /// The decoded response body, if it was valid JSON.
    body: Option<Value>,
  },
  /// The API reported a failure with an HTTP status not covered by any
  /// of the other variants.
  #[error("HTTP status {status}: {message}")]
  Api {
    /// The message provided by the API or a generic one.
    message: String,
    /// The HTTP status of the response.
    status: StatusCode,
    /// A machine readable error code, as provided by the API.
    code: Option<String>,
    /// The decoded response body, if it was valid JSON.
    body: Option<Value>,
  },
  /// An HTTP related error.
  #[error("encountered an HTTP related error")]
  Http(
    #[from]
    #[source]
    HttpError,
  ),
  /// A JSON conversion error.
  #[error("a JSON conversion failed")]
  Json(
    #[from]
    #[source]
    JsonError,
  ),
  /// An URL parsing error.
  #[error("failed to parse the URL")]
  Url(
    #[from]
    #[source]
    ParseError,
  ),
}

impl Error {
  /// Create an [`Error::Network`] carrying only a message.
  pub(crate) fn network(message: impl Into<String>) -> Self {
    Error::Network {
      message: message.into(),
      source: None,
    }
  }

  /// Classify a non-success HTTP response.
  pub(crate) fn from_response(status: StatusCode, headers: &HeaderMap, body: &[u8]) -> Self {
    let body = ErrorBody::decode(body);
    let message = body.message(status);
    let code = body.code();
    let body = body.into_json();

    match status {
      StatusCode::BAD_REQUEST => Error::BadRequest { message, body },
      StatusCode::UNAUTHORIZED => Error::Authentication { message, body },
      StatusCode::FORBIDDEN => Error::Authorization { message, body },
      StatusCode::NOT_FOUND => Error::NotFound { message, body },
      StatusCode::TOO_MANY_REQUESTS => Error::RateLimit {
        message,
        retry_after: retry_after(headers),
        body,
      },
      StatusCode::SERVICE_UNAVAILABLE => Error::ServiceUnavailable {
        message,
        retry_after: retry_after(headers),
        body,
      },
      status => Error::Api {
        message,
        status,
        code,
        body,
      },
    }
  }

  /// Retrieve the HTTP status associated with this error, if any.
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Error::BadRequest { .. } => Some(StatusCode::BAD_REQUEST),
      Error::Authentication { .. } => Some(StatusCode::UNAUTHORIZED),
      Error::Authorization { .. } => Some(StatusCode::FORBIDDEN),
      Error::NotFound { .. } => Some(StatusCode::NOT_FOUND),
      Error::RateLimit { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
      Error::ServiceUnavailable { .. } => Some(StatusCode::SERVICE_UNAVAILABLE),
      Error::Api { status, .. } => Some(*status),
      Error::Configuration(..)
      | Error::Network { .. }
      | Error::Http(..)
      | Error::Json(..)
      | Error::Url(..) => None,
    }
  }

  /// Retrieve the time the API asked us to wait before retrying, if
  /// any.
  pub fn retry_after(&self) -> Option<Duration> {
    match self {
      Error::RateLimit { retry_after, .. } | Error::ServiceUnavailable { retry_after, .. } => {
        retry_after.map(Duration::from_secs)
      },
      _ => None,
    }
  }

  /// Retrieve the decoded response body the API sent along with a
  /// failure, if any.
  pub fn body(&self) -> Option<&Value> {
    match self {
      Error::BadRequest { body, .. }
      | Error::Authentication { body, .. }
      | Error::Authorization { body, .. }
      | Error::NotFound { body, .. }
      | Error::RateLimit { body, .. }
      | Error::ServiceUnavailable { body, .. }
      | Error::Api { body, .. } => body.as_ref(),
      _ => None,
    }
  }
}


/// Parse the `Retry-After` header, in seconds.
///
/// Only the delay-seconds form is supported. The leading digits are
/// used, so that "120.5" and "60s" are read as 120 and 60. HTTP dates
/// and other garbage are treated as absent.
fn retry_after(headers: &HeaderMap) -> Option<u64> {
  let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim_start();
  let end = value
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(value.len());
  value[..end].parse().ok()
}


/// The error envelope as provided by the API.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub(crate) struct ErrorMessage {
  /// A human readable message.
  #[serde(rename = "message")]
  pub message: Option<Value>,
  /// A machine readable error code.
  #[serde(rename = "code")]
  pub code: Option<Value>,
  /// Arbitrary details about the failure.
  #[serde(rename = "details")]
  pub details: Option<Value>,
}


/// The body of a failed response, decoded as far as possible.
///
/// Decoding proceeds in stages: the body is first interpreted as JSON,
/// then as text, and if neither works it is considered empty.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ErrorBody {
  /// The body was valid JSON.
  Json(Value),
  /// The body was non-empty text, but not JSON.
  Text(String),
  /// The body was empty or not valid UTF-8.
  Empty,
}

impl ErrorBody {
  /// Decode a response body.
  pub fn decode(body: &[u8]) -> Self {
    Self::try_json(body)
      .or_else(|| Self::try_text(body))
      .unwrap_or(ErrorBody::Empty)
  }

  /// Attempt to interpret the body as JSON.
  pub fn try_json(body: &[u8]) -> Option<Self> {
    from_slice::<Value>(body).ok().map(ErrorBody::Json)
  }

  /// Attempt to interpret the body as non-empty text.
  pub fn try_text(body: &[u8]) -> Option<Self> {
    match from_utf8(body) {
      Ok(text) if !text.is_empty() => Some(ErrorBody::Text(text.to_string())),
      _ => None,
    }
  }

  /// Decode the JSON body into the error envelope, if possible.
  fn envelope(&self) -> Option<ErrorMessage> {
    match self {
      ErrorBody::Json(value @ Value::Object(..)) => from_value(value.clone()).ok(),
      _ => None,
    }
  }

  /// Determine the error message to report.
  pub fn message(&self, status: StatusCode) -> String {
    let message = match self {
      ErrorBody::Json(..) => self.envelope().and_then(|envelope| match envelope.message {
        Some(Value::String(message)) if !message.is_empty() => Some(message),
        _ => None,
      }),
      ErrorBody::Text(text) => Some(text.clone()),
      ErrorBody::Empty => None,
    };

    message.unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()))
  }

  /// Retrieve the machine readable error code, if any.
  pub fn code(&self) -> Option<String> {
    match self.envelope()?.code? {
      Value::String(code) => Some(code),
      Value::Null => None,
      code => Some(code.to_string()),
    }
  }

  /// Convert the body into its JSON representation, if it was JSON.
  pub fn into_json(self) -> Option<Value> {
    match self {
      ErrorBody::Json(value) => Some(value),
      ErrorBody::Text(..) | ErrorBody::Empty => None,
    }
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use http::HeaderValue;

  use serde_json::json;


  fn classify(status: u16, body: &str) -> Error {
    let status = StatusCode::from_u16(status).unwrap();
    Error::from_response(status, &HeaderMap::new(), body.as_bytes())
  }

  /// Check that the error body is decoded as JSON first.
  #[test]
  fn error_body_json() {
    let body = ErrorBody::decode(br#"{"message": "Invalid session", "code": "NEXT_INVALID_SESSION"}"#);
    assert_eq!(
      body,
      ErrorBody::Json(json!({"message": "Invalid session", "code": "NEXT_INVALID_SESSION"}))
    );
    assert_eq!(body.message(StatusCode::UNAUTHORIZED), "Invalid session");
    assert_eq!(body.code().as_deref(), Some("NEXT_INVALID_SESSION"));
  }

  /// Check that a JSON body without a message uses the generic message.
  #[test]
  fn error_body_json_without_message() {
    let body = ErrorBody::decode(br#"{"details": [1, 2]}"#);
    assert_eq!(
      body.message(StatusCode::BAD_GATEWAY),
      "Request failed with status 502"
    );
    assert_eq!(body.code(), None);
    assert_eq!(body.into_json(), Some(json!({"details": [1, 2]})));

    let body = ErrorBody::decode(br#"[1, 2, 3]"#);
    assert_eq!(body.message(StatusCode::BAD_GATEWAY), "Request failed with status 502");
  }

  /// Check that non-JSON text is used as the message verbatim.
  #[test]
  fn error_body_text() {
    assert_eq!(ErrorBody::try_json(b"<html>oops</html>"), None);
    let body = ErrorBody::decode(b"<html>oops</html>");
    assert_eq!(body, ErrorBody::Text("<html>oops</html>".to_string()));
    assert_eq!(body.message(StatusCode::BAD_GATEWAY), "<html>oops</html>");
    assert_eq!(body.into_json(), None);
  }

  /// Check that empty and binary bodies fall back to a generic message.
  #[test]
  fn error_body_empty() {
    assert_eq!(ErrorBody::try_text(b""), None);
    assert_eq!(ErrorBody::try_text(&[0xff, 0xfe]), None);

    for body in [&b""[..], &[0xff, 0xfe, 0x00][..]] {
      let body = ErrorBody::decode(body);
      assert_eq!(body, ErrorBody::Empty);
      assert_eq!(
        body.message(StatusCode::INTERNAL_SERVER_ERROR),
        "Request failed with status 500"
      );
    }
  }

  /// Check that numeric error codes are stringified.
  #[test]
  fn numeric_error_code() {
    let body = ErrorBody::decode(br#"{"code": 42}"#);
    assert_eq!(body.code().as_deref(), Some("42"));
  }

  /// Check that status codes are mapped to the expected variants.
  #[test]
  fn status_classification() {
    let body = r#"{"message": "nope"}"#;
    assert!(matches!(classify(400, body), Error::BadRequest { .. }));
    assert!(matches!(classify(401, body), Error::Authentication { .. }));
    assert!(matches!(classify(403, body), Error::Authorization { .. }));
    assert!(matches!(classify(404, body), Error::NotFound { .. }));
    assert!(matches!(
      classify(429, body),
      Error::RateLimit {
        retry_after: None,
        ..
      }
    ));
    assert!(matches!(
      classify(503, body),
      Error::ServiceUnavailable {
        retry_after: None,
        ..
      }
    ));

    for status in [300, 402, 409, 418, 422, 500, 502, 504] {
      match classify(status, body) {
        Error::Api {
          status: actual,
          message,
          ..
        } => {
          assert_eq!(actual.as_u16(), status);
          assert_eq!(message, "nope");
        },
        err => panic!("unexpected error for status {status}: {err:?}"),
      }
    }
  }

  /// Check that the generic API error carries code and body.
  #[test]
  fn api_error_details() {
    let err = classify(409, r#"{"message": "Conflict", "code": "DUPLICATE", "details": {"x": 1}}"#);
    match err {
      Error::Api {
        message,
        status,
        code,
        body,
      } => {
        assert_eq!(message, "Conflict");
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(code.as_deref(), Some("DUPLICATE"));
        assert_eq!(
          body,
          Some(json!({"message": "Conflict", "code": "DUPLICATE", "details": {"x": 1}}))
        );
      },
      err => panic!("unexpected error: {err:?}"),
    }
  }

  /// Check that the `Retry-After` header is honored.
  #[test]
  fn retry_after_header() {
    let mut headers = HeaderMap::new();
    let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static("60"));

    let err = Error::from_response(
      StatusCode::TOO_MANY_REQUESTS,
      &headers,
      br#"{"message":"Too many requests"}"#,
    );
    assert_eq!(err.to_string(), "Too many requests");
    assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
    assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));

    let err = Error::from_response(StatusCode::SERVICE_UNAVAILABLE, &headers, b"");
    match err {
      Error::ServiceUnavailable {
        message,
        retry_after,
        body,
      } => {
        assert_eq!(message, "Request failed with status 503");
        assert_eq!(retry_after, Some(60));
        assert_eq!(body, None);
      },
      err => panic!("unexpected error: {err:?}"),
    }
  }

  /// Check that non-numeric `Retry-After` values are ignored.
  #[test]
  fn retry_after_non_numeric() {
    let mut headers = HeaderMap::new();
    let _ = headers.insert(
      RETRY_AFTER,
      HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
    );

    let err = Error::from_response(StatusCode::TOO_MANY_REQUESTS, &headers, b"");
    assert_eq!(err.retry_after(), None);
  }

  /// Check that only the leading digits of `Retry-After` are used.
  #[test]
  fn retry_after_leading_digits() {
    let values = [
      ("120.5", Some(120)),
      ("60s", Some(60)),
      (" 7 ", Some(7)),
      ("s60", None),
      ("", None),
    ];
    for (value, expected) in values {
      let mut headers = HeaderMap::new();
      let _ = headers.insert(RETRY_AFTER, HeaderValue::from_static(value));

      let err = Error::from_response(StatusCode::SERVICE_UNAVAILABLE, &headers, b"");
      assert_eq!(err.retry_after(), expected.map(Duration::from_secs), "{value}");
    }
  }

  /// Check that errors without an HTTP status report none.
  #[test]
  fn status_of_non_api_errors() {
    assert_eq!(Error::network("Request timeout").status(), None);
    assert_eq!(Error::Configuration("bad".into()).status(), None);
    assert_eq!(Error::network("Request timeout").to_string(), "Request timeout");
  }
}
