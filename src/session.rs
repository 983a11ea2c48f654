// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::future::Future;

use tracing::debug;
use tracing::instrument;

use crate::api::login;
use crate::api::login::Challenge;
use crate::api::login::LoggedInStatus;
use crate::api::login::Login;
use crate::ApiInfo;
use crate::Client;
use crate::Error;


impl Client {
  /// Start a login, resulting in a second factor challenge.
  ///
  /// The client's credential is left untouched.
  #[instrument(level = "debug", skip(self, password))]
  pub async fn start_login(&self, username: &str, password: &str) -> Result<Challenge, Error> {
    let request = login::StartReq {
      username: username.to_string(),
      password: password.to_string(),
    };
    self.issue::<login::Start>(&request).await
  }

  /// Verify a login by responding to its challenge.
  ///
  /// On success, the session key of the newly established session is
  /// installed as this client's credential.
  #[instrument(level = "debug", skip_all)]
  pub async fn verify_login(
    &self,
    challenge_response: &str,
    session_key: &str,
  ) -> Result<Login, Error> {
    let request = login::VerifyReq {
      challenge_response: challenge_response.to_string(),
      session_key: session_key.to_string(),
    };
    let login = self.issue::<login::Verify>(&request).await?;

    if !login.session_key.is_empty() {
      debug!("installing session credential");
      self.set_credential(login.session_key.clone());
    }
    Ok(login)
  }

  /// Keep the current session alive.
  #[instrument(level = "debug", skip(self))]
  pub async fn touch_session(&self) -> Result<LoggedInStatus, Error> {
    self.issue::<login::Touch>(&()).await
  }

  /// Terminate the current session.
  ///
  /// The client's credential is cleared in any case, even if the API
  /// reports that the session is still active or the request failed
  /// altogether.
  #[instrument(level = "debug", skip(self))]
  pub async fn logout(&self) -> Result<LoggedInStatus, Error> {
    let result = self.issue::<login::Logout>(&()).await;
    self.clear_credential();
    result
  }

  /// Perform the full login flow, resulting in an authenticated
  /// client.
  ///
  /// `second_factor` is invoked with the challenge issued by the API
  /// and has to produce the response to it, e.g., by prompting the user
  /// for a one-time code. It may take as long as it needs. The
  /// returned client shares its transport with the one used during
  /// the flow.
  ///
  /// ```no_run
  /// # async fn example() -> Result<(), nordnet::Error> {
  /// use nordnet::ApiInfo;
  /// use nordnet::Client;
  ///
  /// let client = Client::login(ApiInfo::default(), "user", "pass", |challenge| async move {
  ///   println!("responding to {} challenge", challenge.method);
  ///   "123456".to_string()
  /// })
  /// .await?;
  /// let status = client.touch_session().await?;
  /// assert!(status.logged_in);
  /// # Ok(())
  /// # }
  /// ```
  pub async fn login<F, Fut>(
    api_info: ApiInfo,
    username: &str,
    password: &str,
    second_factor: F,
  ) -> Result<Client, Error>
  where
    F: FnOnce(Challenge) -> Fut,
    Fut: Future<Output = String>,
  {
    let unauthenticated = ApiInfo {
      session_key: None,
      ..api_info.clone()
    };
    let client = Client::new(unauthenticated)?;
    Self::login_with(client, api_info, username, password, second_factor).await
  }

  /// Perform the login flow using `client` for the unauthenticated
  /// part.
  pub(crate) async fn login_with<F, Fut>(
    client: Client,
    api_info: ApiInfo,
    username: &str,
    password: &str,
    second_factor: F,
  ) -> Result<Client, Error>
  where
    F: FnOnce(Challenge) -> Fut,
    Fut: Future<Output = String>,
  {
    let challenge = client.start_login(username, password).await?;
    let session_key = challenge.session_key.clone();
    let response = second_factor(challenge).await;

    // Verify through the endpoint directly, so that the temporary
    // client never carries the credential.
    let request = login::VerifyReq {
      challenge_response: response,
      session_key,
    };
    let login = client.issue::<login::Verify>(&request).await?;

    let api_info = ApiInfo {
      session_key: Some(login.session_key).filter(|key| !key.is_empty()),
      ..api_info
    };
    Client::with_transport(api_info, client.transport().clone())
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use std::future::Ready;

  use http::Method;

  use serde_json::from_str as from_json;

  use test_log::test;

  use crate::test_util::mock_client;

  const LOGIN: &str = r#"{
  "country": "SE",
  "environment": "prod",
  "logged_in": true,
  "public_feed": {"hostname": "pub.nordnet.se", "port": 443, "public_feed": true, "secure": true},
  "session_key": "S2"
}"#;


  /// Check that starting a login sends the credentials.
  #[test(tokio::test)]
  async fn start_login() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(
      200,
      r#"{"challenge_method":"device","challenge_type":"totp","session_key":"S1"}"#,
    );

    let challenge = client.start_login("user", "pass").await.unwrap();
    assert_eq!(challenge.session_key, "S1");
    assert_eq!(client.credential(), None);

    let request = transport.last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.uri, "https://public.nordnet.se/api/2/login/start");
    assert_eq!(
      request.body_str(),
      Some(r#"{"username":"user","password":"pass"}"#)
    );
  }

  /// Check that verifying a login installs the session key.
  #[test(tokio::test)]
  async fn verify_login_installs_credential() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(200, LOGIN).respond(200, "[]");

    let login = client.verify_login("123456", "S1").await.unwrap();
    assert_eq!(login.session_key, "S2");
    assert_eq!(client.credential().as_deref(), Some("S2"));

    let request = &transport.requests()[0];
    assert_eq!(
      request.body_str(),
      Some(r#"{"challenge_response":"123456","session_key":"S1"}"#)
    );

    let _ = client
      .execute::<(), serde_json::Value>(Method::GET, "/accounts", None, Default::default())
      .await
      .unwrap();
    // base64("S2:S2")
    assert_eq!(transport.last().header("authorization"), Some("Basic UzI6UzI="));
  }

  /// Check that an empty session key is not installed.
  #[test(tokio::test)]
  async fn verify_login_empty_session_key() {
    let (client, transport) = mock_client(ApiInfo::default());
    client.set_credential("old");
    let _ = transport.respond(200, &LOGIN.replace(r#""S2""#, r#""""#));

    let login = client.verify_login("123456", "S1").await.unwrap();
    assert_eq!(login.session_key, "");
    assert_eq!(client.credential().as_deref(), Some("old"));
  }

  /// Check that a verification response carrying little more than the
  /// session key still installs it.
  #[test(tokio::test)]
  async fn verify_login_minimal_response() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(200, r#"{"session_key":"S2","logged_in":true}"#);

    let login = client.verify_login("123456", "S1").await.unwrap();
    assert_eq!(login.country, "");
    assert_eq!(login.public_feed, None);
    assert_eq!(client.credential().as_deref(), Some("S2"));
  }

  /// Check that a failed verification leaves the credential alone.
  #[test(tokio::test)]
  async fn verify_login_failure() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(401, r#"{"message":"Invalid code"}"#);

    let err = client.verify_login("000000", "S1").await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }), "{err:?}");
    assert_eq!(client.credential(), None);
  }

  /// Check that touching a session keeps the credential.
  #[test(tokio::test)]
  async fn touch_session() {
    let (client, transport) = mock_client(ApiInfo::default());
    client.set_credential("S3");
    let _ = transport.respond(200, r#"{"logged_in":true}"#);

    let status = client.touch_session().await.unwrap();
    assert!(status.logged_in);
    assert_eq!(client.credential().as_deref(), Some("S3"));
    assert_eq!(transport.last().method, Method::PUT);
  }

  /// Check that an unauthenticated touch is left for the API to reject.
  #[test(tokio::test)]
  async fn touch_session_unauthenticated() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(401, "");

    let err = client.touch_session().await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }), "{err:?}");
    assert_eq!(transport.last().header("authorization"), None);
  }

  /// Check that logging out clears the credential, no matter what.
  #[test(tokio::test)]
  async fn logout_clears_credential() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport
      .respond(200, r#"{"logged_in":false}"#)
      .respond(200, r#"{"logged_in":true}"#)
      .respond(500, "")
      .fail("connection reset");

    client.set_credential("S4");
    let status = client.logout().await.unwrap();
    assert!(!status.logged_in);
    assert_eq!(client.credential(), None);
    assert_eq!(transport.last().method, Method::DELETE);

    client.set_credential("S4");
    let status = client.logout().await.unwrap();
    assert!(status.logged_in);
    assert_eq!(client.credential(), None);

    client.set_credential("S4");
    let err = client.logout().await.unwrap_err();
    assert!(matches!(err, Error::Api { .. }), "{err:?}");
    assert_eq!(client.credential(), None);

    client.set_credential("S4");
    let err = client.logout().await.unwrap_err();
    assert!(matches!(err, Error::Network { .. }), "{err:?}");
    assert_eq!(client.credential(), None);
  }

  /// Check that the full login flow results in an authenticated client.
  #[test(tokio::test)]
  async fn login_flow() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport
      .respond(
        200,
        r#"{"challenge_method":"device","challenge_type":"totp","challenge_value":"C","session_key":"S1"}"#,
      )
      .respond(200, LOGIN)
      .respond(200, r#"{"logged_in":true}"#);

    let api_info = ApiInfo {
      timeout: 1234,
      ..Default::default()
    };
    let authenticated = Client::login_with(client, api_info, "user", "pass", |challenge| async move {
      assert_eq!(challenge.value.as_deref(), Some("C"));
      tokio::task::yield_now().await;
      "654321".to_string()
    })
    .await
    .unwrap();

    assert_eq!(authenticated.credential().as_deref(), Some("S2"));
    assert_eq!(authenticated.api_info().timeout, 1234);

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].header("authorization"), None);
    assert_eq!(requests[1].header("authorization"), None);
    let verify = from_json::<serde_json::Value>(requests[1].body_str().unwrap()).unwrap();
    assert_eq!(verify["challenge_response"], "654321");
    assert_eq!(verify["session_key"], "S1");

    // The new client goes through the same transport.
    let _ = authenticated.touch_session().await.unwrap();
    assert_eq!(transport.last().header("authorization"), Some("Basic UzI6UzI="));
  }

  /// Check that an empty session key from the login flow does not end
  /// up as credential.
  #[test(tokio::test)]
  async fn login_flow_empty_session_key() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport
      .respond(
        200,
        r#"{"challenge_method":"device","challenge_type":"totp","session_key":"S1"}"#,
      )
      .respond(200, r#"{"session_key":"","logged_in":false}"#)
      .respond(401, "");

    let client = Client::login_with(client, ApiInfo::default(), "user", "pass", |_| async {
      "654321".to_string()
    })
    .await
    .unwrap();
    assert_eq!(client.credential(), None);

    let err = client.touch_session().await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }), "{err:?}");
    assert_eq!(transport.last().header("authorization"), None);
  }

  /// Check that a failing login step aborts the flow.
  #[test(tokio::test)]
  async fn login_flow_failure() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(400, r#"{"message":"Bad credentials"}"#);

    let result = Client::login_with(client, ApiInfo::default(), "user", "wrong", |_| -> Ready<String> {
      panic!("second factor must not be requested")
    })
    .await;
    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Bad credentials");
    assert_eq!(transport.requests().len(), 1);
  }
}
