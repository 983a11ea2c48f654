// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use serde::Deserialize;
use serde::Serialize;

use crate::api::markets;
use crate::api::markets::MarketInfo;
use crate::api::trades::PublicTrade;
use crate::util::join_ids;
use crate::Str;


/// The identification of a tradable, i.e., an instrument as traded on
/// a specific market.
///
/// In paths, a tradable is rendered as `<market-id>:<identifier>`.
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct TradableId {
  /// The market specific identifier.
  #[serde(rename = "identifier")]
  pub identifier: String,
  /// The ID of the market the tradable is traded on.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
}

impl Display for TradableId {
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    write!(fmt, "{}:{}", self.market_id, self.identifier)
  }
}


/// Basic information about a tradable, as listed with an instrument.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Tradable {
  /// The market specific identifier.
  #[serde(rename = "identifier")]
  pub identifier: String,
  /// The ID of the market the tradable is traded on.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The ID of the tick size table applying.
  #[serde(rename = "tick_size_id")]
  pub tick_size_id: u64,
  /// The lot size.
  #[serde(rename = "lot_size")]
  pub lot_size: f64,
  /// The order in which the tradable should be displayed.
  #[serde(rename = "display_order")]
  pub display_order: i64,
}


/// A day in a trading calendar.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CalendarDay {
  /// The date.
  #[serde(rename = "date")]
  pub date: NaiveDate,
  /// Whether the market is open on that day.
  #[serde(rename = "open")]
  pub open: bool,
  /// A description of the day, e.g., the name of a holiday.
  #[serde(rename = "description", default)]
  pub description: Option<String>,
}


/// Price information of a tradable.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PriceInfo {
  /// The best ask price.
  #[serde(rename = "ask")]
  pub ask: f64,
  /// The volume at the best ask price.
  #[serde(rename = "ask_volume")]
  pub ask_volume: f64,
  /// The best bid price.
  #[serde(rename = "bid")]
  pub bid: f64,
  /// The volume at the best bid price.
  #[serde(rename = "bid_volume")]
  pub bid_volume: f64,
  /// The previous closing price.
  #[serde(rename = "close")]
  pub close: f64,
  /// The absolute change since the previous close.
  #[serde(rename = "diff")]
  pub diff: f64,
  /// The relative change since the previous close, in percent.
  #[serde(rename = "diff_pct")]
  pub diff_pct: f64,
  /// The highest price of the day.
  #[serde(rename = "high")]
  pub high: f64,
  /// The instrument the tradable belongs to.
  #[serde(rename = "instrument_id")]
  pub instrument_id: u64,
  /// The last traded price.
  #[serde(rename = "last")]
  pub last: f64,
  /// The time of the last update.
  #[serde(rename = "last_updated", with = "chrono::serde::ts_milliseconds")]
  pub last_updated: DateTime<Utc>,
  /// The lowest price of the day.
  #[serde(rename = "low")]
  pub low: f64,
  /// The opening price of the day.
  #[serde(rename = "open")]
  pub open: f64,
  /// The spread between bid and ask.
  #[serde(rename = "spread")]
  pub spread: f64,
  /// The time of the last tick.
  #[serde(rename = "tick_timestamp", with = "chrono::serde::ts_milliseconds")]
  pub tick_timestamp: DateTime<Utc>,
  /// The total value traded today.
  #[serde(rename = "total_value_traded")]
  pub total_value_traded: f64,
  /// The total volume traded today.
  #[serde(rename = "total_volume_traded")]
  pub total_volume_traded: f64,
  /// The turnover of the day.
  #[serde(rename = "turnover")]
  pub turnover: f64,
}


/// Information about the exchange a tradable is listed on.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ExchangeInfo {
  /// The country of the exchange.
  #[serde(rename = "country")]
  pub country: String,
  /// The exchange's code.
  #[serde(rename = "exchange_code")]
  pub exchange_code: String,
  /// The exchange's name.
  #[serde(rename = "name")]
  pub name: String,
}


/// Key ratios of a tradable.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct KeyRatiosInfo {
  /// The price to earnings ratio.
  #[serde(rename = "price_earnings_ratio")]
  pub price_earnings_ratio: f64,
  /// The price to book ratio.
  #[serde(rename = "price_book_ratio")]
  pub price_book_ratio: f64,
  /// The price to sales ratio.
  #[serde(rename = "price_sales_ratio")]
  pub price_sales_ratio: f64,
  /// The earnings per share.
  #[serde(rename = "earnings_per_share")]
  pub earnings_per_share: f64,
  /// The dividend per share.
  #[serde(rename = "dividend_per_share")]
  pub dividend_per_share: f64,
}


/// Historical returns of a tradable, in percent.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct HistoricalReturnsInfo {
  /// The return over the last day.
  #[serde(rename = "one_day")]
  pub one_day: f64,
  /// The return over the last week.
  #[serde(rename = "one_week")]
  pub one_week: f64,
  /// The return over the last month.
  #[serde(rename = "one_month")]
  pub one_month: f64,
  /// The return over the last three months.
  #[serde(rename = "three_months")]
  pub three_months: f64,
  /// The return since the start of the year.
  #[serde(rename = "this_year")]
  pub this_year: f64,
  /// The return over the last year.
  #[serde(rename = "one_year")]
  pub one_year: f64,
  /// The return over the last three years.
  #[serde(rename = "three_years")]
  pub three_years: f64,
  /// The return over the last five years.
  #[serde(rename = "five_years")]
  pub five_years: f64,
}


/// Detailed information about a tradable.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TradableInfo {
  /// The market specific identifier.
  #[serde(rename = "identifier")]
  pub identifier: String,
  /// The ID of the market the tradable is traded on.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The ID of the tick size table applying.
  #[serde(rename = "tick_size_id")]
  pub tick_size_id: u64,
  /// The lot size.
  #[serde(rename = "lot_size")]
  pub lot_size: f64,
  /// The order in which the tradable should be displayed.
  #[serde(rename = "display_order")]
  pub display_order: i64,
  /// The market the tradable is traded on.
  #[serde(rename = "market", default)]
  pub market: Option<MarketInfo>,
  /// Current price information.
  #[serde(rename = "price_info", default)]
  pub price_info: Option<PriceInfo>,
  /// Information about the exchange.
  #[serde(rename = "exchange_info", default)]
  pub exchange_info: Option<ExchangeInfo>,
  /// Key ratios.
  #[serde(rename = "key_ratios_info", default)]
  pub key_ratios_info: Option<KeyRatiosInfo>,
  /// Historical returns.
  #[serde(rename = "historical_returns_info", default)]
  pub historical_returns_info: Option<HistoricalReturnsInfo>,
  /// The trading calendar.
  #[serde(rename = "calendar", default)]
  pub calendar: Option<Vec<CalendarDay>>,
}


/// The public trades of a tradable.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TradablePublicTrades {
  /// The ID of the market the tradable is traded on.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The market specific identifier.
  #[serde(rename = "identifier")]
  pub identifier: String,
  /// The trades.
  #[serde(rename = "trades")]
  pub trades: Vec<PublicTrade>,
}


/// Whether the current user is eligible to trade a tradable.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Eligibility {
  /// The ID of the market the tradable is traded on.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The market specific identifier.
  #[serde(rename = "identifier")]
  pub identifier: String,
  /// Whether trading is permitted.
  #[serde(rename = "eligible")]
  pub eligible: bool,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /tradables/info/<tradables> endpoint.
  pub Info(Vec<TradableId>),
  Ok => Vec<TradableInfo>,

  fn path(input: &Self::Input) -> Str {
    format!("/tradables/info/{}", join_ids(input)).into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /tradables/trades/<tradables> endpoint.
  pub Trades(Vec<TradableId>),
  Ok => Vec<TradablePublicTrades>,

  fn path(input: &Self::Input) -> Str {
    format!("/tradables/trades/{}", join_ids(input)).into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /tradables/validation/suitability/<tradables> endpoint.
  pub Suitability(Vec<TradableId>),
  Ok => Vec<Eligibility>,

  fn path(input: &Self::Input) -> Str {
    format!("/tradables/validation/suitability/{}", join_ids(input)).into()
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


  fn tradables() -> Vec<TradableId> {
    vec![
      TradableId {
        identifier: "101".to_string(),
        market_id: markets::Id(11),
      },
      TradableId {
        identifier: "46".to_string(),
        market_id: markets::Id(30),
      },
    ]
  }

  /// Check that tradables are rendered as expected in paths.
  #[test]
  fn tradable_paths() {
    let tradables = tradables();
    assert_eq!(tradables[0].to_string(), "11:101");
    assert_eq!(Info::path(&tradables), "/tradables/info/11:101,30:46");
    assert_eq!(Trades::path(&tradables), "/tradables/trades/11:101,30:46");
    assert_eq!(
      Suitability::path(&tradables),
      "/tradables/validation/suitability/11:101,30:46"
    );
  }

  /// Check that we can parse detailed tradable information.
  #[test]
  fn parse_tradable_info() {
    let response = r#"{
  "market_id": 11,
  "identifier": "101",
  "tick_size_id": 11002,
  "lot_size": 1,
  "display_order": 0,
  "market": {"market_id": 11, "country": "SE", "name": "Nasdaq Stockholm"},
  "calendar": [{"date": "2026-12-24", "open": false, "description": "Christmas Eve"}]
}"#;
    let info = from_json::<TradableInfo>(response).unwrap();
    assert_eq!(info.market_id, markets::Id(11));
    assert_eq!(info.market.as_ref().unwrap().name, "Nasdaq Stockholm");
    assert_eq!(info.price_info, None);
    let calendar = info.calendar.unwrap();
    assert_eq!(calendar[0].date, NaiveDate::from_ymd_opt(2026, 12, 24).unwrap());
    assert!(!calendar[0].open);
  }

  /// Check that we can issue a suitability request.
  #[test(tokio::test)]
  async fn suitability() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(
      200,
      r#"[{"market_id": 11, "identifier": "101", "eligible": true}]"#,
    );

    let eligibility = client
      .issue::<Suitability>(&tradables()[..1].to_vec())
      .await
      .unwrap();
    assert_eq!(eligibility.len(), 1);
    assert!(eligibility[0].eligible);
    assert_eq!(
      transport.last().uri,
      "https://public.nordnet.se/api/2/tradables/validation/suitability/11:101"
    );
  }
}
