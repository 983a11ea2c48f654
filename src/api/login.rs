// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use http::Method;

use serde::Deserialize;
use serde::Serialize;
use serde_json::to_value;
use serde_json::Error as JsonError;
use serde_json::Value;

use crate::Str;


/// The credentials to start a login with.
#[derive(Clone, Serialize, PartialEq)]
pub struct StartReq {
  /// The user name.
  #[serde(rename = "username")]
  pub username: String,
  /// The password.
  #[serde(rename = "password")]
  pub password: String,
}

impl Debug for StartReq {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("StartReq")
      .field("username", &self.username)
      .field("password", &"<masked>")
      .finish()
  }
}


/// The second factor challenge issued when starting a login.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Challenge {
  /// The method used for delivering the challenge (e.g., a device
  /// app).
  #[serde(rename = "challenge_method")]
  pub method: String,
  /// The type of the challenge.
  #[serde(rename = "challenge_type")]
  pub type_: String,
  /// An opaque value accompanying the challenge, if any.
  #[serde(rename = "challenge_value", default)]
  pub value: Option<String>,
  /// The key to echo back when verifying the login.
  #[serde(rename = "session_key")]
  pub session_key: String,
}


/// The response to a login challenge.
#[derive(Clone, Serialize, PartialEq)]
pub struct VerifyReq {
  /// The second factor, as obtained out of band.
  #[serde(rename = "challenge_response")]
  pub challenge_response: String,
  /// The session key of the [`Challenge`] being responded to.
  #[serde(rename = "session_key")]
  pub session_key: String,
}

impl Debug for VerifyReq {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("VerifyReq")
      .field("challenge_response", &"<masked>")
      .field("session_key", &"<masked>")
      .finish()
  }
}


/// A description of a streaming feed made available to a session.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Feed {
  /// The host to connect to.
  #[serde(rename = "hostname")]
  pub hostname: String,
  /// The port to connect to.
  #[serde(rename = "port")]
  pub port: u16,
  /// Whether this is the public feed.
  #[serde(rename = "public_feed")]
  pub public: bool,
  /// Whether the connection has to be encrypted.
  #[serde(rename = "secure")]
  pub secure: bool,
}


/// The result of a successfully verified login.
#[derive(Clone, Deserialize, PartialEq)]
pub struct Login {
  /// The country the session belongs to.
  #[serde(rename = "country", default)]
  pub country: String,
  /// The environment the session is bound to.
  #[serde(rename = "environment", default)]
  pub environment: String,
  /// Whether the session is logged in.
  #[serde(rename = "logged_in")]
  pub logged_in: bool,
  /// The public feed, if any.
  #[serde(rename = "public_feed", default)]
  pub public_feed: Option<Feed>,
  /// The private feed, if any.
  #[serde(rename = "private_feed", default)]
  pub private_feed: Option<Feed>,
  /// The key identifying the newly created session.
  #[serde(rename = "session_key")]
  pub session_key: String,
}

impl Debug for Login {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("Login")
      .field("country", &self.country)
      .field("environment", &self.environment)
      .field("logged_in", &self.logged_in)
      .field("public_feed", &self.public_feed)
      .field("private_feed", &self.private_feed)
      .field("session_key", &"<masked>")
      .finish()
  }
}


/// The login state of a session.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub struct LoggedInStatus {
  /// Whether the session is logged in.
  #[serde(rename = "logged_in")]
  pub logged_in: bool,
}


fn to_body<T>(input: &T) -> Result<Option<Value>, JsonError>
where
  T: Serialize,
{
  to_value(input).map(Some)
}


Endpoint! {
  /// The representation of a POST request to the /login/start
  /// endpoint.
  pub Start(StartReq),
  Ok => Challenge,

  fn method() -> Method {
    Method::POST
  }

  fn path(_input: &Self::Input) -> Str {
    "/login/start".into()
  }

  fn body(input: &Self::Input) -> Result<Option<Value>, JsonError> {
    to_body(input)
  }
}


Endpoint! {
  /// The representation of a POST request to the /login/verify
  /// endpoint.
  pub Verify(VerifyReq),
  Ok => Login,

  fn method() -> Method {
    Method::POST
  }

  fn path(_input: &Self::Input) -> Str {
    "/login/verify".into()
  }

  fn body(input: &Self::Input) -> Result<Option<Value>, JsonError> {
    to_body(input)
  }
}


Endpoint! {
  /// The representation of a PUT request to the /login endpoint,
  /// keeping the current session alive.
  pub Touch(()),
  Ok => LoggedInStatus,

  fn method() -> Method {
    Method::PUT
  }

  fn path(_input: &Self::Input) -> Str {
    "/login".into()
  }
}


Endpoint! {
  /// The representation of a DELETE request to the /login endpoint,
  /// terminating the current session.
  pub Logout(()),
  Ok => LoggedInStatus,

  fn method() -> Method {
    Method::DELETE
  }

  fn path(_input: &Self::Input) -> Str {
    "/login".into()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::from_str as from_json;
  use serde_json::json;

  use crate::endpoint::Endpoint as _;


  /// Check that we can parse a challenge as sent by the API.
  #[test]
  fn parse_challenge() {
    let response = r#"{
  "challenge_method": "device",
  "challenge_type": "totp",
  "session_key": "S1"
}"#;
    let challenge = from_json::<Challenge>(response).unwrap();
    assert_eq!(challenge.method, "device");
    assert_eq!(challenge.type_, "totp");
    assert_eq!(challenge.value, None);
    assert_eq!(challenge.session_key, "S1");
  }

  /// Check that we can parse a login response with both feeds.
  #[test]
  fn parse_login() {
    let response = r#"{
  "country": "SE",
  "environment": "prod",
  "logged_in": true,
  "public_feed": {"hostname": "pub.nordnet.se", "port": 443, "public_feed": true, "secure": true},
  "private_feed": {"hostname": "priv.nordnet.se", "port": 443, "public_feed": false, "secure": true},
  "session_key": "S2"
}"#;
    let login = from_json::<Login>(response).unwrap();
    assert_eq!(login.country, "SE");
    assert!(login.logged_in);
    assert!(login.public_feed.as_ref().unwrap().public);
    assert_eq!(login.private_feed.as_ref().unwrap().hostname, "priv.nordnet.se");
    assert_eq!(login.session_key, "S2");

    let string = format!("{login:?}");
    assert!(!string.contains("S2"), "{string}");
  }

  /// Check that the login requests are defined as expected.
  #[test]
  fn login_requests() {
    let start = StartReq {
      username: "user".to_string(),
      password: "pass".to_string(),
    };
    assert_eq!(Start::method(), Method::POST);
    assert_eq!(Start::path(&start), "/login/start");
    assert_eq!(
      Start::body(&start).unwrap(),
      Some(json!({"username": "user", "password": "pass"}))
    );
    assert!(!format!("{start:?}").contains("pass\""));

    let verify = VerifyReq {
      challenge_response: "123456".to_string(),
      session_key: "S1".to_string(),
    };
    assert_eq!(Verify::path(&verify), "/login/verify");
    assert_eq!(
      Verify::body(&verify).unwrap(),
      Some(json!({"challenge_response": "123456", "session_key": "S1"}))
    );

    assert_eq!(Touch::method(), Method::PUT);
    assert_eq!(Touch::path(&()), "/login");
    assert_eq!(Logout::method(), Method::DELETE);
    assert_eq!(Logout::path(&()), "/login");
  }
}
