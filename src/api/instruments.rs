// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;

use chrono::NaiveDate;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::api::markets;
use crate::api::tradables::TradableInfo;
use crate::api::trades::InstrumentPublicTrades;
use crate::util::variant_name;
use crate::Str;


/// A type representing an instrument ID.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct Id(pub u64);

impl Deref for Id {
  type Target = u64;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Display for Id {
  fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
    Display::fmt(&self.0, fmt)
  }
}


/// The attribute to look up instruments by.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum LookupType {
  /// Look up by ISIN code.
  #[serde(rename = "isin")]
  Isin,
  /// Look up by ticker symbol.
  #[serde(rename = "symbol")]
  Symbol,
}


/// The kinds of derivatives underlyings can be listed for.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum DerivativeType {
  /// Bull and bear certificates.
  #[serde(rename = "bull_bear")]
  BullBear,
  /// Certificates.
  #[serde(rename = "certificate")]
  Certificate,
  /// Mini futures.
  #[serde(rename = "minifuture")]
  Minifuture,
  /// Options.
  #[serde(rename = "option")]
  Option,
  /// Warrants.
  #[serde(rename = "warrant")]
  Warrant,
  /// Turbo warrants.
  #[serde(rename = "turbo")]
  Turbo,
}


/// Information about the underlying of a derivative.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct UnderlyingInfo {
  /// The underlying instrument.
  #[serde(rename = "instrument_id")]
  pub instrument_id: Id,
  /// Its symbol.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// Its ISIN code.
  #[serde(rename = "isin_code")]
  pub isin_code: String,
  /// Its currency.
  #[serde(rename = "currency")]
  pub currency: String,
}


/// Derivative specific information about an instrument.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct DerivativeInfo {
  /// The expiration date.
  #[serde(rename = "expiration_date", default)]
  pub expiration_date: Option<NaiveDate>,
  /// The settlement price.
  #[serde(rename = "settlement_price", default)]
  pub settlement_price: Option<f64>,
  /// The leverage.
  #[serde(rename = "leverage", default)]
  pub leverage: Option<f64>,
  /// The ID of the issuer.
  #[serde(rename = "issuer_id", default)]
  pub issuer_id: Option<u64>,
  /// The name of the issuer.
  #[serde(rename = "issuer_name", default)]
  pub issuer_name: Option<String>,
  /// The underlying instrument.
  #[serde(rename = "underlying_instrument_id", default)]
  pub underlying_instrument_id: Option<Id>,
  /// The symbol of the underlying.
  #[serde(rename = "underlying_symbol", default)]
  pub underlying_symbol: Option<String>,
  /// The ISIN code of the underlying.
  #[serde(rename = "underlying_isin_code", default)]
  pub underlying_isin_code: Option<String>,
  /// The currency of the underlying.
  #[serde(rename = "underlying_currency", default)]
  pub underlying_currency: Option<String>,
}


/// Option specific information about an instrument.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct OptionInfo {
  /// Whether the option is American or European.
  #[serde(rename = "american_european", default)]
  pub american_european: Option<String>,
  /// The contract size.
  #[serde(rename = "contract_size", default)]
  pub contract_size: Option<f64>,
  /// The exercise type.
  #[serde(rename = "exercise_type", default)]
  pub exercise_type: Option<String>,
  /// Whether this is a call or a put.
  #[serde(rename = "option_type", default)]
  pub option_type: Option<String>,
  /// The strike price.
  #[serde(rename = "strike_price", default)]
  pub strike_price: Option<f64>,
}


/// Exchange traded product specific information.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
pub struct EtpInfo {
  /// Whether the product is leveraged.
  #[serde(rename = "leveraged", default)]
  pub leveraged: Option<bool>,
  /// Whether the product is short.
  #[serde(rename = "short", default)]
  pub short: Option<bool>,
  /// Whether the product is UCITS compliant.
  #[serde(rename = "ucits", default)]
  pub ucits: Option<bool>,
}


/// Certificate specific information.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CertificateInfo {
  /// The ID of the issuer.
  #[serde(rename = "issuer_id", default)]
  pub issuer_id: Option<u64>,
  /// The name of the issuer.
  #[serde(rename = "issuer_name", default)]
  pub issuer_name: Option<String>,
  /// The underlying instrument.
  #[serde(rename = "underlying_instrument_id", default)]
  pub underlying_instrument_id: Option<Id>,
}


/// Dates of relevance about the company behind an instrument.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct CompanyInfo {
  /// The date of the annual general meeting.
  #[serde(rename = "annual_meeting_date", default)]
  pub annual_meeting_date: Option<NaiveDate>,
  /// The ex-dividend date.
  #[serde(rename = "ex_dividend_date", default)]
  pub ex_dividend_date: Option<NaiveDate>,
  /// The interest payment date.
  #[serde(rename = "interest_payment_date", default)]
  pub interest_payment_date: Option<NaiveDate>,
  /// The date of the next report.
  #[serde(rename = "report_date", default)]
  pub report_date: Option<NaiveDate>,
}


/// Information about an instrument.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct InstrumentInfo {
  /// The instrument's ID.
  #[serde(rename = "instrument_id")]
  pub id: Id,
  /// The instrument's symbol.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// The ISIN code.
  #[serde(rename = "isin_code", default)]
  pub isin_code: Option<String>,
  /// The type of the instrument.
  #[serde(rename = "instrument_type")]
  pub instrument_type: String,
  /// The currency the instrument is traded in.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The multiplier.
  #[serde(rename = "multiplier")]
  pub multiplier: f64,
  /// The pawn percentage.
  #[serde(rename = "pawn_percent")]
  pub pawn_percent: f64,
  /// The sector.
  #[serde(rename = "sector", default)]
  pub sector: Option<String>,
  /// The sector group.
  #[serde(rename = "sector_group", default)]
  pub sector_group: Option<String>,
  /// The asset class.
  #[serde(rename = "asset_class")]
  pub asset_class: String,
  /// The instrument's name.
  #[serde(rename = "name", default)]
  pub name: Option<String>,
  /// The instrument's main market.
  #[serde(rename = "main_market_id", default)]
  pub main_market_id: Option<markets::Id>,
  /// The tradables of the instrument.
  #[serde(rename = "tradables", default)]
  pub tradables: Option<Vec<TradableInfo>>,
  /// The underlying, for derivatives.
  #[serde(rename = "underlying_info", default)]
  pub underlying_info: Option<UnderlyingInfo>,
  /// Derivative specific information.
  #[serde(rename = "derivative_info", default)]
  pub derivative_info: Option<DerivativeInfo>,
  /// Option specific information.
  #[serde(rename = "option_info", default)]
  pub option_info: Option<OptionInfo>,
  /// Exchange traded product specific information.
  #[serde(rename = "etp_info", default)]
  pub etp_info: Option<EtpInfo>,
  /// Certificate specific information.
  #[serde(rename = "certificate_info", default)]
  pub certificate_info: Option<CertificateInfo>,
  /// Company dates.
  #[serde(rename = "company_info", default)]
  pub company_info: Option<CompanyInfo>,
  /// Free form statistics about the instrument.
  #[serde(rename = "statistical_info", default)]
  pub statistical_info: Option<Map<String, Value>>,
}


/// A type of instrument.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct InstrumentType {
  /// The type's code.
  #[serde(rename = "instrument_type")]
  pub instrument_type: String,
  /// The type's human readable name.
  #[serde(rename = "name")]
  pub name: String,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instruments/<instrument-id> endpoint.
  pub Get(Id),
  Ok => InstrumentInfo,

  fn path(input: &Self::Input) -> Str {
    format!("/instruments/{input}").into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instruments/lookup/<lookup-type>/<lookup> endpoint.
  pub Lookup((LookupType, String)),
  Ok => Vec<InstrumentInfo>,

  fn path(input: &Self::Input) -> Str {
    let (type_, lookup) = input;
    format!("/instruments/lookup/{}/{lookup}", variant_name(type_)).into()
  }
}


Endpoint! {
  /// The representation of a GET request to the /instruments/types
  /// endpoint.
  pub ListTypes(()),
  Ok => Vec<InstrumentType>,

  fn path(_input: &Self::Input) -> Str {
    "/instruments/types".into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instruments/types/<instrument-type> endpoint.
  pub GetType(String),
  Ok => InstrumentType,

  fn path(input: &Self::Input) -> Str {
    format!("/instruments/types/{input}").into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instruments/<instrument-id>/trades endpoint.
  pub Trades(Id),
  Ok => InstrumentPublicTrades,

  fn path(input: &Self::Input) -> Str {
    format!("/instruments/{input}/trades").into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instruments/<instrument-id>/leverages endpoint.
  pub Leverages(Id),
  Ok => Value,

  fn path(input: &Self::Input) -> Str {
    format!("/instruments/{input}/leverages").into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instruments/<instrument-id>/leverages/filters endpoint.
  pub LeverageFilters(Id),
  Ok => Value,

  fn path(input: &Self::Input) -> Str {
    format!("/instruments/{input}/leverages/filters").into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instruments/underlyings/<derivative-type>/<currency> endpoint.
  pub Underlyings((DerivativeType, String)),
  Ok => Vec<InstrumentInfo>,

  fn path(input: &Self::Input) -> Str {
    let (type_, currency) = input;
    format!("/instruments/underlyings/{}/{currency}", variant_name(type_)).into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instruments/validation/suitability/<instrument-id> endpoint.
  pub Suitability(Id),
  Ok => Value,

  fn path(input: &Self::Input) -> Str {
    format!("/instruments/validation/suitability/{input}").into()
  }
}
