// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Error as JsonError;

use crate::api::instruments;
use crate::api::markets;
use crate::endpoint::to_params;
use crate::endpoint::Params;
use crate::Str;


/// The kinds of entities a search can be restricted to.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum EntityType {
  /// Stocks.
  #[serde(rename = "STOCK")]
  Stock,
  /// Funds.
  #[serde(rename = "FUND")]
  Fund,
  /// Bonds.
  #[serde(rename = "BOND")]
  Bond,
  /// Options.
  #[serde(rename = "OPTION")]
  Option,
  /// Futures and forwards.
  #[serde(rename = "FUTURE_FORWARD")]
  FutureForward,
  /// Certificates.
  #[serde(rename = "CERTIFICATE")]
  Certificate,
  /// Warrants.
  #[serde(rename = "WARRANT")]
  Warrant,
  /// Exchange traded funds.
  #[serde(rename = "ETF")]
  Etf,
  /// Indices.
  #[serde(rename = "INDEX")]
  Index,
  /// Premium bonds.
  #[serde(rename = "PREMIUM_BOND")]
  PremiumBond,
  /// Subscription options.
  #[serde(rename = "SUBSCRIPTION_OPTION")]
  SubscriptionOption,
}


/// A GET request to be made to the /main_search endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct SearchReq {
  /// The text to search for.
  #[serde(rename = "query")]
  pub query: String,
  /// The kind of entity to restrict the search to.
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub type_: Option<EntityType>,
  /// The maximum number of results.
  #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
}


/// A single search hit.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Row {
  /// The instrument.
  #[serde(rename = "instrument_id")]
  pub instrument_id: instruments::Id,
  /// The instrument's name.
  #[serde(rename = "name")]
  pub name: String,
  /// The instrument's symbol.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// The type of the instrument.
  #[serde(rename = "instrument_type")]
  pub instrument_type: String,
  /// The group type of the instrument.
  #[serde(rename = "instrument_group_type", default)]
  pub instrument_group_type: Option<String>,
  /// The asset class.
  #[serde(rename = "asset_class")]
  pub asset_class: String,
  /// The ISIN.
  #[serde(rename = "isin", default)]
  pub isin: Option<String>,
  /// The country the instrument is listed in.
  #[serde(rename = "country")]
  pub country: String,
  /// The currency the instrument is traded in.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The market of this hit.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The instrument's main market.
  #[serde(rename = "main_market_id")]
  pub main_market_id: markets::Id,
  /// The list the instrument is part of.
  #[serde(rename = "list", default)]
  pub list: Option<String>,
  /// The best ask price.
  #[serde(rename = "ask")]
  pub ask: f64,
  /// The best bid price.
  #[serde(rename = "bid")]
  pub bid: f64,
  /// The last traded price.
  #[serde(rename = "last")]
  pub last: f64,
  /// The highest price of the day.
  #[serde(rename = "high")]
  pub high: f64,
  /// The lowest price of the day.
  #[serde(rename = "low")]
  pub low: f64,
  /// The relative change of the day, in percent.
  #[serde(rename = "change")]
  pub change: f64,
  /// The turnover of the day.
  #[serde(rename = "turnover")]
  pub turnover: f64,
  /// The volume of the day.
  #[serde(rename = "volume")]
  pub volume: f64,
  /// The time of the last update.
  #[serde(rename = "last_updated", with = "chrono::serde::ts_milliseconds")]
  pub last_updated: DateTime<Utc>,
  /// The sector.
  #[serde(rename = "sector", default)]
  pub sector: Option<String>,
  /// The sector group.
  #[serde(rename = "sector_group", default)]
  pub sector_group: Option<String>,
  /// The issuer, for derivatives.
  #[serde(rename = "issuer", default)]
  pub issuer: Option<String>,
  /// The expiration date, for derivatives.
  #[serde(rename = "expiration_date", default)]
  pub expiration_date: Option<NaiveDate>,
  /// The strike price, for options.
  #[serde(rename = "strike_price", default)]
  pub strike_price: Option<f64>,
  /// The option type, for options.
  #[serde(rename = "option_type", default)]
  pub option_type: Option<String>,
  /// The multiplier.
  #[serde(rename = "multiplier", default)]
  pub multiplier: Option<f64>,
  /// The leverage, for leveraged products.
  #[serde(rename = "leverage", default)]
  pub leverage: Option<f64>,
  /// The knock-out level, for leveraged products.
  #[serde(rename = "ko_level", default)]
  pub ko_level: Option<f64>,
  /// The stop loss level, for leveraged products.
  #[serde(rename = "stop_loss", default)]
  pub stop_loss: Option<f64>,
  /// The underlying instrument.
  #[serde(rename = "underlying_instrument_id", default)]
  pub underlying_instrument_id: Option<instruments::Id>,
  /// The symbol of the underlying instrument.
  #[serde(rename = "underlying_symbol", default)]
  pub underlying_symbol: Option<String>,
  /// The ISIN of the underlying instrument.
  #[serde(rename = "underlying_isin", default)]
  pub underlying_isin: Option<String>,
  /// The currency of the underlying instrument.
  #[serde(rename = "underlying_currency", default)]
  pub underlying_currency: Option<String>,
}


/// The results of a search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Results {
  /// The hits.
  #[serde(rename = "results")]
  pub results: Vec<Row>,
  /// The total number of hits, which may exceed the ones returned.
  #[serde(rename = "total_hits")]
  pub total_hits: u64,
}


Endpoint! {
  /// The representation of a GET request to the /main_search
  /// endpoint.
  pub Search(SearchReq),
  Ok => Results,

  fn path(_input: &Self::Input) -> Str {
    "/main_search".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


#[cfg(test)]
mod tests {
  use super::*;

  use test_log::test;

  use crate::test_util::mock_client;
  use crate::ApiInfo;


  /// Check that we can search for instruments.
  #[test(tokio::test)]
  async fn search() {
    let (client, transport) = mock_client(ApiInfo::default());
    let _ = transport.respond(
      200,
      r#"{
  "results": [{
    "instrument_id": 16099874,
    "name": "Ericsson B",
    "symbol": "ERIC B",
    "instrument_type": "ESH",
    "asset_class": "EQY",
    "isin": "SE0000108656",
    "country": "SE",
    "currency": "SEK",
    "market_id": 11,
    "main_market_id": 11,
    "ask": 80.1,
    "bid": 80.0,
    "last": 80.05,
    "high": 81,
    "low": 79.5,
    "change": 0.5,
    "turnover": 1000000,
    "volume": 12500,
    "last_updated": 1767225600000
  }],
  "total_hits": 1
}"#,
    );

    let request = SearchReq {
      query: "ericsson b".to_string(),
      type_: Some(EntityType::Stock),
      limit: Some(1),
    };
    let results = client.issue::<Search>(&request).await.unwrap();
    assert_eq!(results.total_hits, 1);
    assert_eq!(results.results[0].symbol, "ERIC B");
    assert_eq!(results.results[0].expiration_date, None);

    assert_eq!(
      transport.last().uri,
      "https://public.nordnet.se/api/2/main_search?query=ericsson+b&type=STOCK&limit=1"
    );
  }
}
