// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::Utc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Error as JsonError;

use crate::api::accounts;
use crate::api::instruments;
use crate::api::markets;
use crate::api::orders::Side;
use crate::api::tradables::TradableId;
use crate::endpoint::to_params;
use crate::endpoint::Params;
use crate::util::join_ids;
use crate::Str;


/// A trade executed on behalf of one of the user's accounts.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Trade {
  /// The number of the account the trade belongs to.
  #[serde(rename = "accno")]
  pub account_number: String,
  /// The trade ID as assigned by the broker.
  #[serde(rename = "broker_trade_id")]
  pub broker_trade_id: String,
  /// The currency the trade was executed in.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The type of the instrument traded.
  #[serde(rename = "instrument_type")]
  pub instrument_type: String,
  /// The market the trade took place on.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The price per unit.
  #[serde(rename = "price")]
  pub price: f64,
  /// The side of the trade.
  #[serde(rename = "side")]
  pub side: Side,
  /// The trade ID.
  #[serde(rename = "trade_id")]
  pub trade_id: String,
  /// The time the trade was executed at.
  #[serde(rename = "trade_timestamp", with = "chrono::serde::ts_milliseconds")]
  pub trade_timestamp: DateTime<Utc>,
  /// The tradable traded.
  #[serde(rename = "tradable")]
  pub tradable: TradableId,
  /// The traded volume.
  #[serde(rename = "volume")]
  pub volume: f64,
}


/// A public trade, as visible to all market participants.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PublicTrade {
  /// The broker involved.
  #[serde(rename = "broker")]
  pub broker: String,
  /// The currency the trade was executed in.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The price per unit.
  #[serde(rename = "price")]
  pub price: f64,
  /// The time of the tick.
  #[serde(rename = "tick_timestamp", with = "chrono::serde::ts_milliseconds")]
  pub tick_timestamp: DateTime<Utc>,
  /// The trade ID.
  #[serde(rename = "trade_id")]
  pub trade_id: String,
  /// The time the trade was executed at.
  #[serde(rename = "trade_timestamp", with = "chrono::serde::ts_milliseconds")]
  pub trade_timestamp: DateTime<Utc>,
  /// The type of the trade.
  #[serde(rename = "trade_type")]
  pub trade_type: String,
  /// The traded volume.
  #[serde(rename = "volume")]
  pub volume: f64,
}


/// The public trades of an instrument.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InstrumentPublicTrades {
  /// The instrument.
  #[serde(rename = "instrument_id")]
  pub instrument_id: instruments::Id,
  /// The trades.
  #[serde(rename = "trades")]
  pub trades: Vec<PublicTrade>,
}


/// A GET request to be made to the /accounts/<accounts>/trades
/// endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ListReq {
  /// The accounts to list trades of.
  #[serde(skip)]
  pub accounts: Vec<accounts::Id>,
  /// The number of days to look back.
  #[serde(rename = "days", skip_serializing_if = "Option::is_none")]
  pub days: Option<u32>,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /accounts/<accounts>/trades endpoint.
  pub List(ListReq),
  Ok => Vec<Trade>,

  fn path(input: &Self::Input) -> Str {
    format!("/accounts/{}/trades", join_ids(&input.accounts)).into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}
