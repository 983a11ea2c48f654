// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;

use async_trait::async_trait;

use http::Request;
use http::Response;
use http_body_util::BodyExt;
use http_body_util::Full;

use hyper::body::Bytes;
use hyper::body::Incoming;
#[cfg(feature = "native-tls")]
use hyper_tls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Builder as HttpClientBuilder;
use hyper_util::client::legacy::Client as HttpClient;
use hyper_util::rt::TokioExecutor;

pub use crate::error::TransportError;


/// The connector used for establishing connections.
#[cfg(feature = "native-tls")]
type Connector = HttpsConnector<HttpConnector>;
#[cfg(not(feature = "native-tls"))]
type Connector = HttpConnector;


/// A capability for exchanging a single HTTP request for a response.
///
/// The [`Client`][crate::Client] funnels every request through an
/// implementation of this trait. The response body is expected to be
/// fully received (and decoded, if it was transferred compressed).
#[async_trait]
pub trait Transport: Debug + Send + Sync {
  /// Send a request and wait for the full response.
  ///
  /// A request without body is different from one with an empty body:
  /// the former is sent with no payload at all.
  async fn send(&self, request: Request<Option<Bytes>>) -> Result<Response<Bytes>, TransportError>;
}


/// A builder for creating customized [`HyperTransport`] objects.
#[derive(Debug)]
pub struct Builder {
  builder: HttpClientBuilder,
}

impl Builder {
  /// Adjust the maximum number of idle connections per host.
  #[inline]
  pub fn max_idle_per_host(&mut self, max_idle: usize) -> &mut Self {
    let _ = self.builder.pool_max_idle_per_host(max_idle);
    self
  }

  /// Build the final `HyperTransport` object.
  pub fn build(&self) -> HyperTransport {
    #[cfg(feature = "native-tls")]
    let connector = HttpsConnector::new();
    #[cfg(not(feature = "native-tls"))]
    let connector = HttpConnector::new();

    HyperTransport {
      client: self.builder.build(connector),
    }
  }
}

impl Default for Builder {
  #[cfg(test)]
  fn default() -> Self {
    // Idle connections are backed by spawned tasks that would outlive
    // the per-test runtime, so we keep none of them around in tests.
    let mut builder = HttpClient::builder(TokioExecutor::new());
    let _ = builder.pool_max_idle_per_host(0);

    Self { builder }
  }

  #[cfg(not(test))]
  #[inline]
  fn default() -> Self {
    Self {
      builder: HttpClient::builder(TokioExecutor::new()),
    }
  }
}


/// The default [`Transport`], based on `hyper`.
#[derive(Debug)]
pub struct HyperTransport {
  client: HttpClient<Connector, Full<Bytes>>,
}

impl HyperTransport {
  /// Instantiate a new `Builder` which allows for creating a customized
  /// `HyperTransport`.
  #[inline]
  pub fn builder() -> Builder {
    Builder::default()
  }

  /// Add "gzip" as an accepted encoding to the request.
  #[cfg(feature = "gzip")]
  fn maybe_add_gzip_header(request: &mut Request<Full<Bytes>>) {
    use http::header::ACCEPT_ENCODING;
    use http::HeaderValue;

    let _ = request
      .headers_mut()
      .insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
  }

  /// An implementation stub not actually doing anything.
  #[cfg(not(feature = "gzip"))]
  fn maybe_add_gzip_header(_request: &mut Request<Full<Bytes>>) {}

  async fn retrieve_raw_body(body: Incoming) -> Result<Bytes, TransportError> {
    // We always wait for the full body. Error bodies are small and
    // success bodies get decoded in their entirety anyway.
    let bytes = BodyExt::collect(body).await?.to_bytes();
    Ok(bytes)
  }

  /// Retrieve the HTTP body, possibly uncompressing it if it was gzip
  /// encoded.
  #[cfg(feature = "gzip")]
  async fn retrieve_body(response: Response<Incoming>) -> Result<Response<Bytes>, TransportError> {
    use async_compression::futures::bufread::GzipDecoder;
    use futures::AsyncReadExt as _;
    use http::header::CONTENT_ENCODING;

    let (mut parts, body) = response.into_parts();
    let bytes = Self::retrieve_raw_body(body).await?;

    let bytes = match parts.headers.get(CONTENT_ENCODING) {
      Some(value) if value == "gzip" => {
        let mut buffer = Vec::new();
        let _count = GzipDecoder::new(&*bytes).read_to_end(&mut buffer).await?;
        // The body handed out is no longer encoded.
        let _ = parts.headers.remove(CONTENT_ENCODING);
        Bytes::from(buffer)
      },
      _ => bytes,
    };

    Ok(Response::from_parts(parts, bytes))
  }

  /// Retrieve the HTTP body.
  #[cfg(not(feature = "gzip"))]
  async fn retrieve_body(response: Response<Incoming>) -> Result<Response<Bytes>, TransportError> {
    let (parts, body) = response.into_parts();
    let bytes = Self::retrieve_raw_body(body).await?;
    Ok(Response::from_parts(parts, bytes))
  }
}

impl Default for HyperTransport {
  #[inline]
  fn default() -> Self {
    Builder::default().build()
  }
}

#[async_trait]
impl Transport for HyperTransport {
  async fn send(&self, request: Request<Option<Bytes>>) -> Result<Response<Bytes>, TransportError> {
    let mut request = request.map(|body| Full::new(body.unwrap_or_default()));
    Self::maybe_add_gzip_header(&mut request);

    let response = self.client.request(request).await?;
    Self::retrieve_body(response).await
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use http::Method;
  use http::StatusCode;

  use test_log::test;

  use wiremock::matchers::body_string;
  use wiremock::matchers::method;
  use wiremock::matchers::path;
  use wiremock::Mock;
  use wiremock::MockServer;
  use wiremock::ResponseTemplate;


  /// Check that we can exchange a request with an actual HTTP server.
  #[test(tokio::test)]
  async fn send_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
      .and(path("/api/2/echo"))
      .and(body_string(r#"{"ping":true}"#))
      .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"pong":true}"#))
      .expect(1)
      .mount(&server)
      .await;

    let transport = HyperTransport::builder().max_idle_per_host(0).build();
    let request = Request::builder()
      .method(Method::POST)
      .uri(format!("{}/api/2/echo", server.uri()))
      .body(Some(Bytes::from_static(br#"{"ping":true}"#)))
      .unwrap();

    let response = transport.send(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.body().as_ref(), br#"{"pong":true}"#);
  }

  /// Check that connection failures are reported as errors.
  #[test(tokio::test)]
  async fn connection_refused() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let transport = HyperTransport::default();
    let request = Request::builder()
      .uri(format!("{uri}/api/2/"))
      .body(None)
      .unwrap();

    let result = transport.send(request).await;
    assert!(result.is_err());
  }

  /// Check that gzip encoded responses are inflated transparently.
  #[cfg(feature = "gzip")]
  #[test(tokio::test)]
  async fn gzip_response() {
    use async_compression::futures::bufread::GzipEncoder;
    use futures::AsyncReadExt as _;
    use wiremock::matchers::header;

    let mut encoded = Vec::new();
    let _count = GzipEncoder::new(&br#"{"system_open":true}"#[..])
      .read_to_end(&mut encoded)
      .await
      .unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(header("accept-encoding", "gzip"))
      .respond_with(
        ResponseTemplate::new(200)
          .insert_header("content-encoding", "gzip")
          .set_body_bytes(encoded),
      )
      .mount(&server)
      .await;

    let transport = HyperTransport::default();
    let request = Request::builder()
      .uri(format!("{}/", server.uri()))
      .body(None)
      .unwrap();

    let response = transport.send(request).await.unwrap();
    assert_eq!(response.body().as_ref(), br#"{"system_open":true}"#);
    assert!(response.headers().get("content-encoding").is_none());
  }
}
