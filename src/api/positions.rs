// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::Deserialize;
use serde::Serialize;
use serde_json::Error as JsonError;

use crate::api::accounts;
use crate::api::markets;
use crate::api::tradables::TradableId;
use crate::endpoint::to_params;
use crate::endpoint::Params;
use crate::util::join_ids;
use crate::Str;


/// A price along with the number of decimals it should be displayed
/// with.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct PriceWithDecimals {
  /// The price.
  #[serde(rename = "price")]
  pub price: f64,
  /// The number of decimals.
  #[serde(rename = "decimals")]
  pub decimals: u32,
}


/// A position held in an account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Position {
  /// The ID of the account holding the position.
  #[serde(rename = "accid")]
  pub account_id: accounts::Id,
  /// The number of the account holding the position.
  #[serde(rename = "accno")]
  pub account_number: String,
  /// The average acquisition price, in the instrument's currency.
  #[serde(rename = "acq_price")]
  pub acquisition_price: PriceWithDecimals,
  /// The average acquisition price, in the account's currency.
  #[serde(rename = "acq_price_acc")]
  pub acquisition_price_acc: f64,
  /// The instrument held.
  #[serde(rename = "instrument")]
  pub instrument: TradableId,
  /// The intraday limit, if requested.
  #[serde(rename = "intraday_limit", default)]
  pub intraday_limit: Option<f64>,
  /// The main market of the instrument.
  #[serde(rename = "main_market_id")]
  pub main_market_id: markets::Id,
  /// The market value, in the instrument's currency.
  #[serde(rename = "market_value")]
  pub market_value: f64,
  /// The market value, in the account's currency.
  #[serde(rename = "market_value_acc")]
  pub market_value_acc: f64,
  /// The price as of this morning.
  #[serde(rename = "morning_price")]
  pub morning_price: f64,
  /// The pawn percentage.
  #[serde(rename = "pawn_percent")]
  pub pawn_percent: f64,
  /// The quantity held.
  #[serde(rename = "qty")]
  pub quantity: f64,
}


/// A GET request to be made to the /accounts/<accounts>/positions
/// endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ListReq {
  /// The accounts to list positions of.
  #[serde(skip)]
  pub accounts: Vec<accounts::Id>,
  /// Whether to include instrument loans.
  #[serde(rename = "include_instrument_loans", skip_serializing_if = "Option::is_none")]
  pub include_instrument_loans: Option<bool>,
  /// Whether to include the intraday limit.
  #[serde(rename = "include_intraday_limit", skip_serializing_if = "Option::is_none")]
  pub include_intraday_limit: Option<bool>,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /accounts/<accounts>/positions endpoint.
  pub List(ListReq),
  Ok => Vec<Position>,

  fn path(input: &Self::Input) -> Str {
    format!("/accounts/{}/positions", join_ids(&input.accounts)).into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}
