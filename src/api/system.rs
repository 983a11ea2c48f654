// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::Utc;

use serde::Deserialize;

use crate::Str;


/// The status of the API.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct Status {
  /// Whether the system is open for business.
  #[serde(rename = "system_open")]
  pub system_open: bool,
  /// The current server time.
  #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
  pub timestamp: DateTime<Utc>,
  /// Whether the API version used is still valid.
  #[serde(rename = "valid_version")]
  pub valid_version: bool,
}


/// An interval of a tick size table.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct TickSizeInterval {
  /// The number of decimals of prices in this interval.
  #[serde(rename = "decimals")]
  pub decimals: u32,
  /// The lower bound of the interval.
  #[serde(rename = "from_price")]
  pub from_price: f64,
  /// The upper bound of the interval.
  #[serde(rename = "to_price")]
  pub to_price: f64,
  /// The tick size in this interval.
  #[serde(rename = "tick")]
  pub tick: f64,
}


/// A table defining valid price increments.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TickSizeTable {
  /// The ID of the table.
  #[serde(rename = "tick_size_id")]
  pub id: u64,
  /// The intervals.
  #[serde(rename = "ticks")]
  pub ticks: Vec<TickSizeInterval>,
}

impl TickSizeTable {
  /// Find the tick size applying to the given price, if any.
  pub fn tick_for(&self, price: f64) -> Option<f64> {
    self
      .ticks
      .iter()
      .find(|interval| interval.from_price <= price && price <= interval.to_price)
      .map(|interval| interval.tick)
  }
}


Endpoint! {
  /// The representation of a GET request to the / endpoint.
  pub GetStatus(()),
  Ok => Status,

  fn path(_input: &Self::Input) -> Str {
    "/".into()
  }
}


Endpoint! {
  /// The representation of a GET request to the /tick_sizes endpoint.
  pub ListTickSizes(()),
  Ok => Vec<TickSizeTable>,

  fn path(_input: &Self::Input) -> Str {
    "/tick_sizes".into()
  }
}


Endpoint! {
  /// The representation of a GET request to the /tick_sizes/<id>
  /// endpoint.
  pub GetTickSize(u64),
  Ok => TickSizeTable,

  fn path(input: &Self::Input) -> Str {
    format!("/tick_sizes/{input}").into()
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use chrono::TimeZone as _;

  use serde_json::from_str as from_json;

  use test_log::test;

  use crate::test_util::mock_client;
  use crate::ApiInfo;


  /// Check that we can parse a tick size table and look up ticks.
  #[test]
  fn parse_tick_size_table() {
    let response = r#"{
  "tick_size_id": 11002,
  "ticks": [
    {"decimals": 3, "from_price": 0, "to_price": 0.4999, "tick": 0.001},
    {"decimals": 2, "from_price": 0.5, "to_price": 999999, "tick": 0.01}
  ]
}"#;
    let table = from_json::<TickSizeTable>(response).unwrap();
    assert_eq!(table.id, 11002);
    assert_eq!(table.tick_for(0.25), Some(0.001));
    assert_eq!(table.tick_for(100.0), Some(0.01));
    assert_eq!(table.tick_for(-1.0), None);
  }

  /// Check that we can retrieve the system status.
  #[test(tokio::test)]
  async fn get_status() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(
      200,
      r#"{"system_open": true, "timestamp": 1767225600000, "valid_version": true}"#,
    );

    let status = client.issue::<GetStatus>(&()).await.unwrap();
    assert!(status.system_open);
    assert_eq!(status.timestamp, Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(transport.last().uri, "https://public.nordnet.se/api/2/");
  }

  /// Check that unavailability is surfaced with its retry hint.
  #[test(tokio::test)]
  async fn status_unavailable() {
    let (client, transport) = mock_client(ApiInfo::default());
    let response = http::Response::builder()
      .status(503)
      .header("retry-after", " 120 ")
      .body(hyper::body::Bytes::from_static(b"maintenance"))
      .unwrap();
    let _ = transport.respond_with(response);

    let err = client.issue::<GetStatus>(&()).await.unwrap_err();
    assert_eq!(err.to_string(), "maintenance");
    assert_eq!(err.retry_after(), Some(std::time::Duration::from_secs(120)));
  }
}
