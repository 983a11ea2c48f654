// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::env::var_os;
use std::ffi::OsString;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;
use std::time::Duration;

use http::HeaderMap;

use serde::Deserialize;
use serde::Serialize;

use url::Url;

use crate::api::API_BASE_URL;
use crate::api::DEFAULT_TIMEOUT_MS;
use crate::Error;

/// The base URL to the API to use.
const ENV_API_URL: &str = "NORDNET_API_BASE_URL";
/// The environment variable representing an existing session key.
const ENV_SESSION_KEY: &str = "NORDNET_SESSION_KEY";
/// The environment variable representing the request timeout, in
/// milliseconds.
const ENV_TIMEOUT: &str = "NORDNET_TIMEOUT_MS";
/// The environment variable representing the preferred language.
const ENV_LANGUAGE: &str = "NORDNET_LANGUAGE";


/// The languages the API can produce responses in.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Language {
  /// Danish.
  #[serde(rename = "da")]
  Danish,
  /// German.
  #[serde(rename = "de")]
  German,
  /// English.
  #[default]
  #[serde(rename = "en")]
  English,
  /// Finnish.
  #[serde(rename = "fi")]
  Finnish,
  /// Norwegian Bokmål.
  #[serde(rename = "nb")]
  NorwegianBokmal,
  /// Norwegian Nynorsk.
  #[serde(rename = "nn")]
  NorwegianNynorsk,
  /// Norwegian.
  #[serde(rename = "no")]
  Norwegian,
  /// Swedish.
  #[serde(rename = "sv")]
  Swedish,
}

impl AsRef<str> for Language {
  fn as_ref(&self) -> &'static str {
    match *self {
      Language::Danish => "da",
      Language::German => "de",
      Language::English => "en",
      Language::Finnish => "fi",
      Language::NorwegianBokmal => "nb",
      Language::NorwegianNynorsk => "nn",
      Language::Norwegian => "no",
      Language::Swedish => "sv",
    }
  }
}

impl Display for Language {
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    fmt.write_str(self.as_ref())
  }
}

impl FromStr for Language {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let language = match s {
      "da" => Language::Danish,
      "de" => Language::German,
      "en" => Language::English,
      "fi" => Language::Finnish,
      "nb" => Language::NorwegianBokmal,
      "nn" => Language::NorwegianNynorsk,
      "no" => Language::Norwegian,
      "sv" => Language::Swedish,
      _ => return Err(Error::Configuration(format!("unsupported language: {s}").into())),
    };
    Ok(language)
  }
}


/// An object encapsulating the information used for working with the
/// Nordnet API.
///
/// The object is consumed by [`Client::new`][crate::Client::new], which
/// validates it. Fields not of interest can be left at their defaults:
/// ```
/// # use nordnet::ApiInfo;
/// # use nordnet::Language;
/// let api_info = ApiInfo {
///   language: Language::Swedish,
///   timeout: 5000,
///   ..Default::default()
/// };
/// ```
#[derive(Clone, PartialEq)]
pub struct ApiInfo {
  /// The base URL for the API. Endpoint paths are appended to it
  /// verbatim.
  pub base_url: Url,
  /// The request timeout, in milliseconds.
  ///
  /// Negative values are rejected when creating a client. A value of
  /// zero selects the default timeout.
  pub timeout: i64,
  /// The language responses should be provided in.
  pub language: Language,
  /// Additional headers to include with every request. These take
  /// precedence over the headers the client sets by default.
  pub headers: HeaderMap,
  /// Whether to emit human readable request and response logs at the
  /// `INFO` level.
  pub debug: bool,
  /// The session key of an already authenticated session, if any.
  pub session_key: Option<String>,
}

impl ApiInfo {
  /// Create an `ApiInfo` from the required data.
  ///
  /// # Errors
  /// - [`Error::Url`](crate::Error::Url) If `base_url` cannot be parsed
  ///   into a [`url::Url`](url::Url).
  pub fn from_parts(
    base_url: impl AsRef<str>,
    session_key: Option<&str>,
  ) -> Result<Self, Error> {
    Ok(Self {
      base_url: Url::parse(base_url.as_ref())?,
      session_key: session_key.map(str::to_string),
      ..Default::default()
    })
  }

  /// Create an `ApiInfo` object with information from the environment.
  ///
  /// This constructor retrieves API related information from the
  /// environment and performs some preliminary validation on it. The
  /// following information is used:
  /// - the Nordnet API base URL is retrieved from the
  ///   NORDNET_API_BASE_URL variable, falling back to the public
  ///   endpoint
  /// - an existing session key is retrieved from the
  ///   NORDNET_SESSION_KEY variable, if present
  /// - the request timeout in milliseconds is retrieved from the
  ///   NORDNET_TIMEOUT_MS variable, if present
  /// - the response language is retrieved from the NORDNET_LANGUAGE
  ///   variable, if present
  pub fn from_env() -> Result<Self, Error> {
    fn var_string(name: &str) -> Result<Option<String>, Error> {
      var_os(name)
        .map(OsString::into_string)
        .transpose()
        .map_err(|_| {
          Error::Configuration(format!("{name} environment variable is not a valid string").into())
        })
    }

    let base_url = var_string(ENV_API_URL)?.unwrap_or_else(|| API_BASE_URL.to_string());
    let base_url = Url::parse(&base_url)?;
    let session_key = var_string(ENV_SESSION_KEY)?;
    let timeout = var_string(ENV_TIMEOUT)?
      .map(|timeout| {
        timeout.parse::<i64>().map_err(|_| {
          Error::Configuration(format!("{ENV_TIMEOUT} environment variable is not a number").into())
        })
      })
      .transpose()?
      .unwrap_or(DEFAULT_TIMEOUT_MS);
    let language = var_string(ENV_LANGUAGE)?
      .map(|language| language.parse())
      .transpose()?
      .unwrap_or_default();

    Ok(Self {
      base_url,
      timeout,
      language,
      session_key,
      ..Default::default()
    })
  }

  /// Validate the configured timeout and convert it into a `Duration`.
  pub(crate) fn timeout(&self) -> Result<Duration, Error> {
    match u64::try_from(self.timeout) {
      Ok(0) => Ok(Duration::from_millis(DEFAULT_TIMEOUT_MS.unsigned_abs())),
      Ok(timeout) => Ok(Duration::from_millis(timeout)),
      Err(_) => Err(Error::Configuration(
        format!("timeout must be a non-negative number of milliseconds, got {}", self.timeout).into(),
      )),
    }
  }
}

impl Default for ApiInfo {
  fn default() -> Self {
    Self {
      // SANITY: The constant is known to be a valid URL.
      base_url: Url::parse(API_BASE_URL).expect("API base URL constant is invalid"),
      timeout: DEFAULT_TIMEOUT_MS,
      language: Language::default(),
      headers: HeaderMap::new(),
      debug: false,
      session_key: None,
    }
  }
}

impl Debug for ApiInfo {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    f.debug_struct("ApiInfo")
      .field("base_url", &self.base_url.as_str())
      .field("timeout", &self.timeout)
      .field("language", &self.language)
      .field("headers", &self.headers)
      .field("debug", &self.debug)
      .field("session_key", &self.session_key.as_ref().map(|_| "<masked>"))
      .finish()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use std::env::remove_var;
  use std::env::set_var;

  use serial_test::serial;


  /// Check that the defaults match the public endpoint.
  #[test]
  fn default_api_info() {
    let api_info = ApiInfo::default();
    assert_eq!(api_info.base_url.as_str(), API_BASE_URL);
    assert_eq!(api_info.timeout, 30000);
    assert_eq!(api_info.language, Language::English);
    assert_eq!(api_info.session_key, None);
    assert!(!api_info.debug);
  }

  /// Check that negative timeouts are rejected and others accepted.
  #[test]
  fn timeout_validation() {
    for timeout in [-1, -5000, i64::MIN] {
      let api_info = ApiInfo {
        timeout,
        ..Default::default()
      };
      let err = api_info.timeout().unwrap_err();
      assert!(matches!(err, Error::Configuration(..)), "{err:?}");
    }

    for (timeout, expected) in [(0, 30000), (1, 1), (5000, 5000)] {
      let api_info = ApiInfo {
        timeout,
        ..Default::default()
      };
      assert_eq!(api_info.timeout().unwrap(), Duration::from_millis(expected));
    }
  }

  /// Check that languages can be converted from and to their tags.
  #[test]
  fn language_tags() {
    for tag in ["da", "de", "en", "fi", "nb", "nn", "no", "sv"] {
      let language = tag.parse::<Language>().unwrap();
      assert_eq!(language.as_ref(), tag);
      assert_eq!(language.to_string(), tag);
    }

    assert!("xx".parse::<Language>().is_err());
  }

  /// Check that the session key is not part of the debug output.
  #[test]
  fn debug_masks_session_key() {
    let api_info = ApiInfo::from_parts(API_BASE_URL, Some("super-secret")).unwrap();
    let string = format!("{api_info:?}");
    assert!(!string.contains("super-secret"), "{string}");
    assert!(string.contains("<masked>"), "{string}");
  }

  /// Check that an invalid base URL is reported.
  #[test]
  fn invalid_base_url() {
    let err = ApiInfo::from_parts("not a url", None).unwrap_err();
    assert!(matches!(err, Error::Url(..)), "{err:?}");
  }

  /// Check that we can assemble an `ApiInfo` from the environment.
  #[test]
  #[serial]
  fn api_info_from_env() {
    set_var(ENV_API_URL, "https://api.test.com/api/2");
    set_var(ENV_SESSION_KEY, "env-session");
    set_var(ENV_TIMEOUT, "1500");
    set_var(ENV_LANGUAGE, "sv");

    let result = ApiInfo::from_env();

    remove_var(ENV_API_URL);
    remove_var(ENV_SESSION_KEY);
    remove_var(ENV_TIMEOUT);
    remove_var(ENV_LANGUAGE);

    let api_info = result.unwrap();
    assert_eq!(api_info.base_url.as_str(), "https://api.test.com/api/2");
    assert_eq!(api_info.session_key.as_deref(), Some("env-session"));
    assert_eq!(api_info.timeout, 1500);
    assert_eq!(api_info.language, Language::Swedish);
  }

  /// Check that missing environment variables fall back to defaults.
  #[test]
  #[serial]
  fn api_info_from_empty_env() {
    remove_var(ENV_API_URL);
    remove_var(ENV_SESSION_KEY);
    remove_var(ENV_TIMEOUT);
    remove_var(ENV_LANGUAGE);

    let api_info = ApiInfo::from_env().unwrap();
    assert_eq!(api_info, ApiInfo::default());
  }

  /// Check that a malformed timeout in the environment is reported.
  #[test]
  #[serial]
  fn api_info_from_env_invalid_timeout() {
    set_var(ENV_TIMEOUT, "soon");
    let result = ApiInfo::from_env();
    remove_var(ENV_TIMEOUT);

    let err = result.unwrap_err();
    assert!(matches!(err, Error::Configuration(..)), "{err:?}");
  }
}
