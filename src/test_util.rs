// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::collections::VecDeque;
use std::future::pending;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use http::HeaderMap;
use http::Method;
use http::Request;
use http::Response;
use http::StatusCode;

use hyper::body::Bytes;

use crate::transport::Transport;
use crate::transport::TransportError;
use crate::ApiInfo;
use crate::Client;


/// A request as observed by the [`MockTransport`].
#[derive(Clone, Debug)]
pub(crate) struct Recorded {
  pub method: Method,
  pub uri: String,
  pub headers: HeaderMap,
  pub body: Option<Bytes>,
}

impl Recorded {
  /// Retrieve a header value as string.
  pub fn header(&self, name: &str) -> Option<&str> {
    self
      .headers
      .get(name)
      .map(|value| value.to_str().unwrap())
  }

  /// Retrieve the request body as string.
  pub fn body_str(&self) -> Option<&str> {
    self
      .body
      .as_ref()
      .map(|body| std::str::from_utf8(body).unwrap())
  }
}


#[derive(Debug)]
enum Reply {
  Respond(Response<Bytes>),
  Delay(Duration, Response<Bytes>),
  Fail(String),
  Hang,
}


/// A `Transport` handing out canned replies in order while recording
/// every request it receives.
#[derive(Debug, Default)]
pub(crate) struct MockTransport {
  requests: Mutex<Vec<Recorded>>,
  replies: Mutex<VecDeque<Reply>>,
}

impl MockTransport {
  pub fn new() -> Arc<Self> {
    Arc::new(Self::default())
  }

  /// Queue a response with the given status and body.
  pub fn respond(&self, status: u16, body: &str) -> &Self {
    let response = Response::builder()
      .status(StatusCode::from_u16(status).unwrap())
      .body(Bytes::copy_from_slice(body.as_bytes()))
      .unwrap();
    self.respond_with(response)
  }

  /// Queue a fully custom response.
  pub fn respond_with(&self, response: Response<Bytes>) -> &Self {
    self
      .replies
      .lock()
      .unwrap()
      .push_back(Reply::Respond(response));
    self
  }

  /// Queue a response that only arrives after the given delay.
  pub fn respond_after(&self, delay: Duration, status: u16, body: &str) -> &Self {
    let response = Response::builder()
      .status(StatusCode::from_u16(status).unwrap())
      .body(Bytes::copy_from_slice(body.as_bytes()))
      .unwrap();
    self
      .replies
      .lock()
      .unwrap()
      .push_back(Reply::Delay(delay, response));
    self
  }

  /// Queue a transport level failure.
  pub fn fail(&self, message: &str) -> &Self {
    self
      .replies
      .lock()
      .unwrap()
      .push_back(Reply::Fail(message.to_string()));
    self
  }

  /// Queue a reply that never arrives.
  pub fn hang(&self) -> &Self {
    self.replies.lock().unwrap().push_back(Reply::Hang);
    self
  }

  /// Retrieve all requests received so far.
  pub fn requests(&self) -> Vec<Recorded> {
    self.requests.lock().unwrap().clone()
  }

  /// Retrieve the most recently received request.
  pub fn last(&self) -> Recorded {
    self.requests.lock().unwrap().last().cloned().unwrap()
  }
}

#[async_trait]
impl Transport for MockTransport {
  async fn send(&self, request: Request<Option<Bytes>>) -> Result<Response<Bytes>, TransportError> {
    let (parts, body) = request.into_parts();
    self.requests.lock().unwrap().push(Recorded {
      method: parts.method,
      uri: parts.uri.to_string(),
      headers: parts.headers,
      body,
    });

    let reply = self
      .replies
      .lock()
      .unwrap()
      .pop_front()
      .expect("no reply queued for request");

    match reply {
      Reply::Respond(response) => Ok(response),
      Reply::Delay(delay, response) => {
        let () = tokio::time::sleep(delay).await;
        Ok(response)
      },
      Reply::Fail(message) => Err(message.into()),
      Reply::Hang => pending().await,
    }
  }
}


/// Create a `Client` backed by a fresh `MockTransport`.
pub(crate) fn mock_client(api_info: ApiInfo) -> (Client, Arc<MockTransport>) {
  let transport = MockTransport::new();
  let client = Client::with_transport(api_info, transport.clone()).unwrap();
  (client, transport)
}
