// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::from_utf8;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use http::header::ACCEPT;
use http::header::ACCEPT_LANGUAGE;
use http::header::AUTHORIZATION;
use http::header::CONTENT_TYPE;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use http::Request;
use http::StatusCode;

use hyper::body::Bytes;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::from_slice;
use serde_json::from_value;
use serde_json::to_vec;
use serde_json::Value;

use tokio::time::timeout;

use tracing::debug;
use tracing::error;
use tracing::field::debug;
use tracing::field::DebugValue;
use tracing::info;
use tracing::span;
use tracing::trace;
use tracing::Level;
use tracing_futures::Instrument;

use url::Url;

use crate::endpoint::Endpoint;
use crate::endpoint::Params;
use crate::transport::HyperTransport;
use crate::transport::Transport;
use crate::util::query_pairs;
use crate::ApiInfo;
use crate::Error;


/// A type providing a debug representation of HTTP headers, with
/// sensitive data being masked out.
struct DebugHeaders<'h> {
  headers: &'h HeaderMap<HeaderValue>,
}

impl Debug for DebugHeaders<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    static MASKED: HeaderValue = HeaderValue::from_static("<masked>");

    f.debug_map()
      .entries(self.headers.iter().map(|(k, v)| {
        if k == AUTHORIZATION || v.is_sensitive() {
          (k, &MASKED)
        } else {
          (k, v)
        }
      }))
      .finish()
  }
}


/// A type providing a debug representation of an HTTP request, with
/// sensitive data being masked out.
struct DebugRequest<'r> {
  request: &'r Request<Option<Bytes>>,
}

impl Debug for DebugRequest<'_> {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    // Method and URI are part of the surrounding span already.
    f.debug_struct("Request")
      .field("version", &self.request.version())
      .field(
        "headers",
        &DebugHeaders {
          headers: self.request.headers(),
        },
      )
      .field("body", self.request.body())
      .finish()
  }
}


/// Emit a debug representation of an HTTP request.
fn debug_request(request: &Request<Option<Bytes>>) -> DebugValue<DebugRequest<'_>> {
  debug(DebugRequest { request })
}


/// Overwrite entries in `headers` with those from `overrides`.
///
/// All values present for a header name in `overrides` replace all
/// values stored for it in `headers`.
fn merge_headers(headers: &mut HeaderMap, overrides: &HeaderMap) {
  for name in overrides.keys() {
    let _ = headers.remove(name);
    for value in overrides.get_all(name) {
      let _ = headers.append(name.clone(), value.clone());
    }
  }
}


/// Create the value of the `Authorization` header for the given
/// session credential.
fn authorization(credential: &str) -> Result<HeaderValue, Error> {
  let encoded = STANDARD.encode(format!("{credential}:{credential}"));
  let mut value = HeaderValue::try_from(format!("Basic {encoded}")).map_err(http::Error::from)?;
  value.set_sensitive(true);
  Ok(value)
}


/// Per-request options for [`Client::execute`].
#[derive(Clone, Debug, Default)]
pub struct RequestOptions {
  /// Query parameters to append to the URL.
  ///
  /// Arrays are sent as repeated parameters, objects as JSON text, and
  /// `null` values are left out.
  pub params: Option<Params>,
  /// Headers taking precedence over the client's default ones.
  pub headers: HeaderMap,
  /// A timeout to use instead of the configured one.
  pub timeout: Option<Duration>,
}


/// A `Client` is the entity used by clients of this module for
/// interacting with the Nordnet API.
///
/// A client holds at most one session credential, which gets attached
/// to every request it issues. The credential can be changed at any
/// time, affecting all requests issued subsequently.
pub struct Client {
  api_info: ApiInfo,
  timeout: Duration,
  headers: HeaderMap,
  credential: RwLock<Option<String>>,
  transport: Arc<dyn Transport>,
}

impl Client {
  /// Create a new `Client` using the given configuration and the
  /// default HTTP transport.
  ///
  /// # Errors
  /// - [`Error::Configuration`] if the configuration is invalid, e.g.,
  ///   because of a negative timeout
  #[inline]
  pub fn new(api_info: ApiInfo) -> Result<Self, Error> {
    Self::with_transport(api_info, Arc::new(HyperTransport::default()))
  }

  /// Create a new `Client` using the given configuration and sending
  /// requests through the provided transport.
  pub fn with_transport(api_info: ApiInfo, transport: Arc<dyn Transport>) -> Result<Self, Error> {
    let timeout = api_info.timeout()?;

    let mut headers = HeaderMap::new();
    let json = HeaderValue::from_static("application/json");
    let _ = headers.insert(CONTENT_TYPE, json.clone());
    let _ = headers.insert(ACCEPT, json);
    let language = HeaderValue::from_str(api_info.language.as_ref()).map_err(http::Error::from)?;
    let _ = headers.insert(ACCEPT_LANGUAGE, language);
    merge_headers(&mut headers, &api_info.headers);

    let credential = RwLock::new(api_info.session_key.clone());

    Ok(Self {
      api_info,
      timeout,
      headers,
      credential,
      transport,
    })
  }

  /// Retrieve the `ApiInfo` object this `Client` was created with.
  ///
  /// Note that the session key it contains reflects the state at
  /// creation time. Use [`Client::credential`] to inquire the one
  /// currently in use.
  #[inline]
  pub fn api_info(&self) -> &ApiInfo {
    &self.api_info
  }

  /// Retrieve the transport used by this `Client`.
  #[inline]
  pub(crate) fn transport(&self) -> &Arc<dyn Transport> {
    &self.transport
  }

  /// Install a session credential, replacing any existing one.
  ///
  /// The previous session, if any, is not invalidated remotely.
  pub fn set_credential(&self, credential: impl Into<String>) {
    let mut guard = self
      .credential
      .write()
      .unwrap_or_else(PoisonError::into_inner);
    *guard = Some(credential.into());
  }

  /// Retrieve the currently installed session credential, if any.
  pub fn credential(&self) -> Option<String> {
    self
      .credential
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .clone()
  }

  /// Remove the session credential, if any.
  pub fn clear_credential(&self) {
    let mut guard = self
      .credential
      .write()
      .unwrap_or_else(PoisonError::into_inner);
    *guard = None;
  }

  /// Create a `Request` to the given path.
  fn request<B>(
    &self,
    method: Method,
    path: &str,
    body: Option<&B>,
    options: &RequestOptions,
  ) -> Result<Request<Option<Bytes>>, Error>
  where
    B: Serialize + ?Sized,
  {
    let base_url = self.api_info.base_url.as_str().trim_end_matches('/');
    let mut url = Url::parse(&format!("{base_url}{path}"))?;

    if let Some(params) = &options.params {
      let pairs = query_pairs(params);
      if !pairs.is_empty() {
        let _ = url.query_pairs_mut().extend_pairs(pairs);
      }
    }

    let mut headers = self.headers.clone();
    merge_headers(&mut headers, &options.headers);

    if let Some(credential) = self.credential().filter(|credential| !credential.is_empty()) {
      let _ = headers.insert(AUTHORIZATION, authorization(&credential)?);
    }

    let body = body.map(to_vec).transpose()?.map(Bytes::from);
    let mut request = Request::builder()
      .method(method)
      .uri(url.as_str())
      .body(body)?;
    *request.headers_mut() = headers;
    Ok(request)
  }

  /// Execute a single request and decode the response.
  ///
  /// The provided `path` is appended verbatim to the configured base
  /// URL. A response with status `204 No Content` results in `None`
  /// without any decoding attempt; other successful responses are
  /// decoded as JSON.
  ///
  /// # Errors
  /// - [`Error::Network`] if the request timed out or could not be
  ///   transmitted
  /// - one of the HTTP status specific variants if the API reported a
  ///   failure
  /// - [`Error::Json`] if a successful response could not be decoded
  pub async fn execute<B, T>(
    &self,
    method: Method,
    path: &str,
    body: Option<&B>,
    options: RequestOptions,
  ) -> Result<Option<T>, Error>
  where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
  {
    // A zero timeout means the configured one, just like in `ApiInfo`.
    let duration = options
      .timeout
      .filter(|timeout| !timeout.is_zero())
      .unwrap_or(self.timeout);
    let request = self.request(method, path, body, &options)?;
    let span = span!(
      Level::INFO,
      "issue",
      method = display(request.method()),
      uri = display(request.uri())
    );
    self.execute_::<T>(request, duration).instrument(span).await
  }

  /// Issue a request.
  #[allow(clippy::cognitive_complexity)]
  async fn execute_<T>(
    &self,
    request: Request<Option<Bytes>>,
    duration: Duration,
  ) -> Result<Option<T>, Error>
  where
    T: DeserializeOwned,
  {
    debug!("requesting");
    trace!(request = debug_request(&request));

    if self.api_info.debug {
      info!("{} {}", request.method(), request.uri());
      if let Some(body) = request.body() {
        info!("request body: {}", String::from_utf8_lossy(body));
      }
    }

    // Dropping the in-flight future on expiry cancels the request.
    let response = match timeout(duration, self.transport.send(request)).await {
      Ok(Ok(response)) => response,
      Ok(Err(err)) => {
        let err = Error::Network {
          message: err.to_string(),
          source: Some(err),
        };
        if self.api_info.debug {
          error!("request failed: {err}");
        }
        return Err(err)
      },
      Err(_elapsed) => {
        if self.api_info.debug {
          error!("request timed out after {duration:?}");
        }
        return Err(Error::network("Request timeout"))
      },
    };

    let status = response.status();
    debug!(status = debug(&status));
    trace!(response = debug(&response));

    let (parts, bytes) = response.into_parts();
    match from_utf8(&bytes) {
      Ok(s) => trace!(body = display(&s)),
      Err(b) => trace!(body = display(&b)),
    }

    if self.api_info.debug {
      info!("response status: {status}");
      info!("response body: {}", String::from_utf8_lossy(&bytes));
    }

    if status == StatusCode::NO_CONTENT {
      Ok(None)
    } else if status.is_success() {
      let output = from_slice::<T>(&bytes)?;
      Ok(Some(output))
    } else {
      let err = Error::from_response(status, &parts.headers, &bytes);
      if self.api_info.debug {
        error!("request failed with status {}: {err}", status.as_u16());
      }
      Err(err)
    }
  }

  /// Create and issue a request to the given endpoint and decode the
  /// response.
  ///
  /// A `204 No Content` response is decoded as if the API had sent
  /// JSON `null`.
  pub async fn issue<E>(&self, input: &E::Input) -> Result<E::Output, Error>
  where
    E: Endpoint,
  {
    let options = RequestOptions {
      params: E::query(input)?,
      ..Default::default()
    };
    let body = E::body(input)?;
    let path = E::path(input);

    let output = self
      .execute::<Value, E::Output>(E::method(), &path, body.as_ref(), options)
      .await?;

    match output {
      Some(output) => Ok(output),
      None => Ok(from_value(Value::Null)?),
    }
  }
}

impl Debug for Client {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("Client")
      .field("api_info", &self.api_info)
      .field("timeout", &self.timeout)
      .field("headers", &DebugHeaders {
        headers: &self.headers,
      })
      .field("credential", &self.credential().map(|_| "<masked>"))
      .field("transport", &self.transport)
      .finish()
  }
}
