// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;

use serde::Deserialize;
use serde::Serialize;

use crate::api::tradables::CalendarDay;
use crate::Str;


/// A type representing a market ID.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Id(pub u32);

impl Deref for Id {
  type Target = u32;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Id {
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    Display::fmt(&self.0, fmt)
  }
}


/// A market.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Market {
  /// The market's ID.
  #[serde(rename = "market_id")]
  pub id: Id,
  /// The country the market is located in.
  #[serde(rename = "country")]
  pub country: String,
  /// The market's name.
  #[serde(rename = "name")]
  pub name: String,
}


/// Detailed information about a market.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MarketInfo {
  /// The market's ID.
  #[serde(rename = "market_id")]
  pub id: Id,
  /// The country the market is located in.
  #[serde(rename = "country")]
  pub country: String,
  /// The market's name.
  #[serde(rename = "name")]
  pub name: String,
  /// The market's trading calendar.
  #[serde(rename = "trading_calendar", default)]
  pub trading_calendar: Option<Vec<CalendarDay>>,
}


/// A country.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Country {
  /// The ISO 3166-1 alpha-2 country code.
  #[serde(rename = "country")]
  pub code: String,
  /// The country's name, in the requested language.
  #[serde(rename = "name")]
  pub name: String,
}


Endpoint! {
  /// The representation of a GET request to the /markets endpoint.
  pub List(()),
  Ok => Vec<Market>,

  fn path(_input: &Self::Input) -> Str {
    "/markets".into()
  }
}


Endpoint! {
  /// The representation of a GET request to the /markets/<market-id>
  /// endpoint.
  pub Get(Id),
  Ok => MarketInfo,

  fn path(input: &Self::Input) -> Str {
    format!("/markets/{input}").into()
  }
}


Endpoint! {
  /// The representation of a GET request to the /countries endpoint.
  pub ListCountries(()),
  Ok => Vec<Country>,

  fn path(_input: &Self::Input) -> Str {
    "/countries".into()
  }
}


Endpoint! {
  /// The representation of a GET request to the /countries/<code>
  /// endpoint.
  pub GetCountry(String),
  Ok => Country,

  fn path(input: &Self::Input) -> Str {
    format!("/countries/{input}").into()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use serde_json::from_str as from_json;

  use test_log::test;

  use crate::endpoint::Endpoint as _;
  use crate::test_util::mock_client;
  use crate::ApiInfo;
  use crate::Error;


  /// Check that we can parse market information.
  #[test]
  fn parse_market_info() {
    let response = r#"{
  "market_id": 11,
  "country": "SE",
  "name": "Nasdaq Stockholm",
  "trading_calendar": [{"date": "2026-06-19", "open": false}]
}"#;
    let market = from_json::<MarketInfo>(response).unwrap();
    assert_eq!(market.id, Id(11));
    assert_eq!(market.country, "SE");
    let calendar = market.trading_calendar.unwrap();
    assert_eq!(calendar.len(), 1);
    assert_eq!(calendar[0].description, None);
  }

  /// Check the paths of the endpoints.
  #[test]
  fn paths() {
    assert_eq!(List::path(&()), "/markets");
    assert_eq!(Get::path(&Id(80)), "/markets/80");
    assert_eq!(ListCountries::path(&()), "/countries");
    assert_eq!(GetCountry::path(&"NO".to_string()), "/countries/NO");
  }

  /// Check that we can list markets.
  #[test(tokio::test)]
  async fn list_markets() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(
      200,
      r#"[{"market_id": 11, "country": "SE", "name": "Nasdaq Stockholm"},
          {"market_id": 15, "country": "NO", "name": "Oslo Børs"}]"#,
    );

    let markets = client.issue::<List>(&()).await.unwrap();
    assert_eq!(markets.len(), 2);
    assert_eq!(markets[1].name, "Oslo Børs");
  }

  /// Check that an unknown market is reported as not found.
  #[test(tokio::test)]
  async fn unknown_market() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(404, r#"{"code": "NEXT_INVALID_MARKET", "message": "Unknown market"}"#);

    let err = client.issue::<Get>(&Id(9999)).await.unwrap_err();
    match err {
      Error::NotFound { message, .. } => assert_eq!(message, "Unknown market"),
      err => panic!("unexpected error: {err:?}"),
    }
  }
}
