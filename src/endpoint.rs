// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use http::Method;

use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::Serialize;
use serde_json::to_value;
use serde_json::Error as JsonError;
use serde_json::Map;
use serde_json::Value;

use crate::Str;


/// Query parameters of a request, keyed by parameter name.
///
/// Scalar values are emitted in their textual form, arrays are emitted
/// as one parameter per element, objects are emitted as JSON text, and
/// `null` values are omitted.
pub type Params = Map<String, Value>;


/// Convert a serializable object into a set of query parameters.
///
/// Objects serializing to `null` (such as `()`) produce no parameters
/// at all.
pub fn to_params<T>(value: &T) -> Result<Option<Params>, JsonError>
where
  T: Serialize + ?Sized,
{
  match to_value(value)? {
    Value::Object(params) => Ok(Some(params)),
    Value::Null => Ok(None),
    other => Err(JsonError::custom(format!(
      "query parameters must serialize to a map, got {other}"
    ))),
  }
}


/// A trait describing an HTTP endpoint.
///
/// An endpoint for our intents and purposes is basically a path and an
/// HTTP request method (e.g., GET or POST). The path will be appended
/// to the configured base URL. Query parameters and a JSON body are
/// supported as well. Endpoints are issued through
/// [`Client::issue`][crate::Client::issue].
pub trait Endpoint {
  /// The type of data being passed in as part of a request to this
  /// endpoint.
  type Input;
  /// The type of data being returned in the response from this
  /// endpoint.
  type Output: DeserializeOwned;

  /// Retrieve the HTTP method to use.
  ///
  /// The default method being used is GET.
  fn method() -> Method {
    Method::GET
  }

  /// Inquire the path the request should go to.
  fn path(input: &Self::Input) -> Str;

  /// Inquire the query parameters the request should use.
  ///
  /// By default no query is emitted.
  #[allow(unused)]
  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    Ok(None)
  }

  /// Retrieve the request's body.
  ///
  /// By default no body is sent.
  #[allow(unused)]
  fn body(input: &Self::Input) -> Result<Option<Value>, JsonError> {
    Ok(None)
  }
}


/// A macro used for defining the properties for a request to a
/// particular HTTP endpoint.
macro_rules! Endpoint {
  ( $(#[$docs:meta])* $pub:vis $name:ident($in:ty),
    Ok => $out:ty,
    $($defs:tt)* ) => {

    $(#[$docs])*
    #[derive(Clone, Copy, Debug)]
    $pub enum $name {}

    #[allow(unused_qualifications)]
    impl crate::endpoint::Endpoint for $name {
      type Input = $in;
      type Output = $out;

      $($defs)*
    }
  };
}
