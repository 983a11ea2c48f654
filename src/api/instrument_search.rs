// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use serde::Deserialize;
use serde::Serialize;
use serde::Serializer;
use serde_json::to_string as to_json;
use serde_json::Error as JsonError;

use crate::api::instruments;
use crate::api::markets;
use crate::endpoint::to_params;
use crate::endpoint::Params;
use crate::Str;


/// The groups of attributes that search results can be filtered by.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum AttributeGroup {
  /// Asset classes.
  #[serde(rename = "ASSET_CLASS")]
  AssetClass,
  /// Countries.
  #[serde(rename = "COUNTRY")]
  Country,
  /// Currencies.
  #[serde(rename = "CURRENCY")]
  Currency,
  /// Exchanges.
  #[serde(rename = "EXCHANGE")]
  Exchange,
  /// Expiration dates.
  #[serde(rename = "EXPIRATION_DATE")]
  ExpirationDate,
  /// Indices.
  #[serde(rename = "INDEX")]
  Index,
  /// Instrument group types.
  #[serde(rename = "INSTRUMENT_GROUP_TYPE")]
  InstrumentGroupType,
  /// Instrument types.
  #[serde(rename = "INSTRUMENT_TYPE")]
  InstrumentType,
  /// Issuers.
  #[serde(rename = "ISSUER")]
  Issuer,
  /// Markets.
  #[serde(rename = "MARKET")]
  Market,
  /// Multipliers.
  #[serde(rename = "MULTIPLIER")]
  Multiplier,
  /// Option types.
  #[serde(rename = "OPTION_TYPE")]
  OptionType,
  /// Sectors.
  #[serde(rename = "SECTOR")]
  Sector,
  /// Sector groups.
  #[serde(rename = "SECTOR_GROUP")]
  SectorGroup,
  /// Strike prices.
  #[serde(rename = "STRIKE_PRICE")]
  StrikePrice,
  /// Currencies of underlyings.
  #[serde(rename = "UNDERLYING_CURRENCY")]
  UnderlyingCurrency,
  /// Underlying instruments.
  #[serde(rename = "UNDERLYING_INSTRUMENT")]
  UnderlyingInstrument,
  /// Any other group that we have not accounted for.
  #[serde(other)]
  Unknown,
}


/// The order to sort results in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum SortOrder {
  /// Ascending order.
  #[serde(rename = "asc")]
  Ascending,
  /// Descending order.
  #[serde(rename = "desc")]
  Descending,
}


/// A GET request to be made to the /instrument_search/attributes
/// endpoint.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AttributesReq {
  /// The group of attributes to list.
  #[serde(rename = "attribute_group")]
  pub attribute_group: AttributeGroup,
  /// Restrict attributes to these instrument types.
  #[serde(rename = "instrument_type", skip_serializing_if = "Vec::is_empty")]
  pub instrument_type: Vec<String>,
  /// Restrict attributes to these instrument group types.
  #[serde(rename = "instrument_group_type", skip_serializing_if = "Vec::is_empty")]
  pub instrument_group_type: Vec<String>,
}

impl From<AttributeGroup> for AttributesReq {
  fn from(attribute_group: AttributeGroup) -> Self {
    Self {
      attribute_group,
      instrument_type: Vec::new(),
      instrument_group_type: Vec::new(),
    }
  }
}


/// The values available for an attribute group.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AttributeResult {
  /// The group.
  #[serde(rename = "type")]
  pub type_: AttributeGroup,
  /// The values.
  #[serde(rename = "values")]
  pub values: Vec<String>,
}


/// A response from the /instrument_search/attributes endpoint.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Attributes {
  /// The attributes.
  #[serde(rename = "attributes")]
  pub attributes: Vec<AttributeResult>,
}


/// A GET request to be made to the /instrument_search/query/stocklist
/// endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct StockListReq {
  /// The number of results to skip.
  #[serde(rename = "offset", skip_serializing_if = "Option::is_none")]
  pub offset: Option<u32>,
  /// The maximum number of results.
  #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  /// Restrict results to these asset classes.
  #[serde(rename = "asset_class", skip_serializing_if = "Vec::is_empty")]
  pub asset_class: Vec<String>,
  /// Restrict results to these countries.
  #[serde(rename = "country", skip_serializing_if = "Vec::is_empty")]
  pub country: Vec<String>,
  /// Restrict results to these currencies.
  #[serde(rename = "currency", skip_serializing_if = "Vec::is_empty")]
  pub currency: Vec<String>,
  /// Restrict results to these exchanges.
  #[serde(rename = "exchange", skip_serializing_if = "Vec::is_empty")]
  pub exchange: Vec<String>,
  /// Restrict results to these instrument types.
  #[serde(rename = "instrument_type", skip_serializing_if = "Vec::is_empty")]
  pub instrument_type: Vec<String>,
  /// Restrict results to these markets.
  #[serde(rename = "market", skip_serializing_if = "Vec::is_empty")]
  pub market: Vec<String>,
  /// Restrict results to these sectors.
  #[serde(rename = "sector", skip_serializing_if = "Vec::is_empty")]
  pub sector: Vec<String>,
  /// Restrict results to these sector groups.
  #[serde(rename = "sector_group", skip_serializing_if = "Vec::is_empty")]
  pub sector_group: Vec<String>,
  /// The attribute to sort by.
  #[serde(rename = "sort", skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
  /// The order to sort in.
  #[serde(rename = "sort_order", skip_serializing_if = "Option::is_none")]
  pub sort_order: Option<SortOrder>,
}


/// A bound on the leverage of leveraged products.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct LeverageFilter {
  /// The minimum leverage.
  #[serde(rename = "min", skip_serializing_if = "Option::is_none")]
  pub min: Option<f64>,
  /// The maximum leverage.
  #[serde(rename = "max", skip_serializing_if = "Option::is_none")]
  pub max: Option<f64>,
}


/// Serialize a leverage filter as JSON text, which is how the filter
/// travels in a query.
fn serialize_leverage<S>(filter: &Option<LeverageFilter>, serializer: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  use serde::ser::Error as _;

  match filter {
    Some(filter) => {
      let json = to_json(filter).map_err(S::Error::custom)?;
      serializer.serialize_str(&json)
    },
    None => serializer.serialize_none(),
  }
}


/// A GET request to be made to one of the leveraged product list
/// endpoints below /instrument_search/query.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LeverageListReq {
  /// The number of results to skip.
  #[serde(rename = "offset", skip_serializing_if = "Option::is_none")]
  pub offset: Option<u32>,
  /// The maximum number of results.
  #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  /// Restrict results to these countries.
  #[serde(rename = "country", skip_serializing_if = "Vec::is_empty")]
  pub country: Vec<String>,
  /// Restrict results to these currencies.
  #[serde(rename = "currency", skip_serializing_if = "Vec::is_empty")]
  pub currency: Vec<String>,
  /// Restrict results to these expiration dates.
  #[serde(rename = "expiration_date", skip_serializing_if = "Vec::is_empty")]
  pub expiration_date: Vec<String>,
  /// Restrict results to these instrument group types.
  #[serde(rename = "instrument_group_type", skip_serializing_if = "Vec::is_empty")]
  pub instrument_group_type: Vec<String>,
  /// Restrict results to these instrument types.
  #[serde(rename = "instrument_type", skip_serializing_if = "Vec::is_empty")]
  pub instrument_type: Vec<String>,
  /// Restrict results to these issuers.
  #[serde(rename = "issuer", skip_serializing_if = "Vec::is_empty")]
  pub issuer: Vec<String>,
  /// Restrict results to a leverage range.
  #[serde(
    rename = "leverage",
    serialize_with = "serialize_leverage",
    skip_serializing_if = "Option::is_none"
  )]
  pub leverage: Option<LeverageFilter>,
  /// Restrict results to these markets.
  #[serde(rename = "market", skip_serializing_if = "Vec::is_empty")]
  pub market: Vec<String>,
  /// Restrict results to these currencies of the underlying.
  #[serde(rename = "underlying_currency", skip_serializing_if = "Vec::is_empty")]
  pub underlying_currency: Vec<String>,
  /// Restrict results to these underlying instruments.
  #[serde(rename = "underlying_instrument", skip_serializing_if = "Vec::is_empty")]
  pub underlying_instrument: Vec<String>,
  /// The attribute to sort by.
  #[serde(rename = "sort", skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
  /// The order to sort in.
  #[serde(rename = "sort_order", skip_serializing_if = "Option::is_none")]
  pub sort_order: Option<SortOrder>,
}


/// A GET request to be made to the
/// /instrument_search/query/optionlist/pairs endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct OptionPairsReq {
  /// The number of results to skip.
  #[serde(rename = "offset", skip_serializing_if = "Option::is_none")]
  pub offset: Option<u32>,
  /// The maximum number of results.
  #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
  /// Restrict results to these countries.
  #[serde(rename = "country", skip_serializing_if = "Vec::is_empty")]
  pub country: Vec<String>,
  /// Restrict results to these currencies.
  #[serde(rename = "currency", skip_serializing_if = "Vec::is_empty")]
  pub currency: Vec<String>,
  /// Restrict results to these expiration dates.
  #[serde(rename = "expiration_date", skip_serializing_if = "Vec::is_empty")]
  pub expiration_date: Vec<String>,
  /// Restrict results to these markets.
  #[serde(rename = "market", skip_serializing_if = "Vec::is_empty")]
  pub market: Vec<String>,
  /// Restrict results to these option types.
  #[serde(rename = "option_type", skip_serializing_if = "Vec::is_empty")]
  pub option_type: Vec<String>,
  /// Restrict results to these strike prices.
  #[serde(rename = "strike_price", skip_serializing_if = "Vec::is_empty")]
  pub strike_price: Vec<f64>,
  /// Restrict results to these underlying instruments.
  #[serde(rename = "underlying_instrument", skip_serializing_if = "Vec::is_empty")]
  pub underlying_instrument: Vec<String>,
  /// The attribute to sort by.
  #[serde(rename = "sort", skip_serializing_if = "Option::is_none")]
  pub sort: Option<String>,
  /// The order to sort in.
  #[serde(rename = "sort_order", skip_serializing_if = "Option::is_none")]
  pub sort_order: Option<SortOrder>,
}


/// A stock as listed by the stock list search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Stock {
  /// The instrument.
  #[serde(rename = "instrument_id")]
  pub instrument_id: instruments::Id,
  /// The instrument's name.
  #[serde(rename = "name")]
  pub name: String,
  /// The instrument's symbol.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// The ISIN code.
  #[serde(rename = "isin")]
  pub isin: String,
  /// The type of the instrument.
  #[serde(rename = "instrument_type")]
  pub instrument_type: String,
  /// The country.
  #[serde(rename = "country")]
  pub country: String,
  /// The currency.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The market.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
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
  /// The relative change of the day.
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
}


/// The results of a stock list search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StockList {
  /// The stocks.
  #[serde(rename = "results")]
  pub results: Vec<Stock>,
  /// The total number of hits.
  #[serde(rename = "total_hits")]
  pub total_hits: u64,
}


/// A leveraged product, as listed by the bull & bear, mini future,
/// and unlimited turbo searches.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LeverageEntity {
  /// The instrument.
  #[serde(rename = "instrument_id")]
  pub instrument_id: instruments::Id,
  /// The instrument's name.
  #[serde(rename = "name")]
  pub name: String,
  /// The instrument's symbol.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// The ISIN code.
  #[serde(rename = "isin")]
  pub isin: String,
  /// The type of the instrument.
  #[serde(rename = "instrument_type")]
  pub instrument_type: String,
  /// The issuer.
  #[serde(rename = "issuer")]
  pub issuer: String,
  /// The country.
  #[serde(rename = "country")]
  pub country: String,
  /// The currency.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The market.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The expiration date.
  #[serde(rename = "expiration_date")]
  pub expiration_date: NaiveDate,
  /// The best ask price.
  #[serde(rename = "ask")]
  pub ask: f64,
  /// The best bid price.
  #[serde(rename = "bid")]
  pub bid: f64,
  /// The last traded price.
  #[serde(rename = "last")]
  pub last: f64,
  /// The relative change of the day.
  #[serde(rename = "change")]
  pub change: f64,
  /// The leverage.
  #[serde(rename = "leverage")]
  pub leverage: f64,
  /// The knock-out level.
  #[serde(rename = "ko_level")]
  pub ko_level: f64,
  /// The stop loss level.
  #[serde(rename = "stop_loss")]
  pub stop_loss: f64,
  /// The strike.
  #[serde(rename = "strike")]
  pub strike: f64,
  /// The ISIN code of the underlying.
  #[serde(rename = "underlying_isin")]
  pub underlying_isin: String,
  /// The symbol of the underlying.
  #[serde(rename = "underlying_symbol")]
  pub underlying_symbol: String,
  /// The time of the last update.
  #[serde(rename = "last_updated", with = "chrono::serde::ts_milliseconds")]
  pub last_updated: DateTime<Utc>,
}


/// The results of a leveraged product search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LeverageList {
  /// The products.
  #[serde(rename = "results")]
  pub results: Vec<LeverageEntity>,
  /// The total number of hits.
  #[serde(rename = "total_hits")]
  pub total_hits: u64,
}


/// An option, as listed by the option pair search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OptionEntity {
  /// The instrument.
  #[serde(rename = "instrument_id")]
  pub instrument_id: instruments::Id,
  /// The instrument's name.
  #[serde(rename = "name")]
  pub name: String,
  /// The instrument's symbol.
  #[serde(rename = "symbol")]
  pub symbol: String,
  /// The ISIN code.
  #[serde(rename = "isin")]
  pub isin: String,
  /// The type of the instrument.
  #[serde(rename = "instrument_type")]
  pub instrument_type: String,
  /// Whether this is a call or a put.
  #[serde(rename = "option_type")]
  pub option_type: String,
  /// The country.
  #[serde(rename = "country")]
  pub country: String,
  /// The currency.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The market.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The expiration date.
  #[serde(rename = "expiration_date")]
  pub expiration_date: NaiveDate,
  /// The strike.
  #[serde(rename = "strike")]
  pub strike: f64,
  /// The best ask price.
  #[serde(rename = "ask")]
  pub ask: f64,
  /// The best bid price.
  #[serde(rename = "bid")]
  pub bid: f64,
  /// The last traded price.
  #[serde(rename = "last")]
  pub last: f64,
  /// The relative change of the day.
  #[serde(rename = "change")]
  pub change: f64,
  /// The volume of the day.
  #[serde(rename = "volume")]
  pub volume: f64,
  /// The ISIN code of the underlying.
  #[serde(rename = "underlying_isin")]
  pub underlying_isin: String,
  /// The symbol of the underlying.
  #[serde(rename = "underlying_symbol")]
  pub underlying_symbol: String,
  /// The time of the last update.
  #[serde(rename = "last_updated", with = "chrono::serde::ts_milliseconds")]
  pub last_updated: DateTime<Utc>,
}


/// A call and a put sharing strike and expiration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OptionPair {
  /// The call option.
  #[serde(rename = "call")]
  pub call: OptionEntity,
  /// The put option.
  #[serde(rename = "put")]
  pub put: OptionEntity,
}


/// The results of an option pair search.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct OptionPairs {
  /// The pairs.
  #[serde(rename = "pairs")]
  pub pairs: Vec<OptionPair>,
  /// The total number of hits.
  #[serde(rename = "total_hits")]
  pub total_hits: u64,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instrument_search/attributes endpoint.
  pub GetAttributes(AttributesReq),
  Ok => Attributes,

  fn path(_input: &Self::Input) -> Str {
    "/instrument_search/attributes".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instrument_search/query/stocklist endpoint.
  pub ListStocks(StockListReq),
  Ok => StockList,

  fn path(_input: &Self::Input) -> Str {
    "/instrument_search/query/stocklist".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instrument_search/query/bullbearlist endpoint.
  pub ListBullBears(LeverageListReq),
  Ok => LeverageList,

  fn path(_input: &Self::Input) -> Str {
    "/instrument_search/query/bullbearlist".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instrument_search/query/minifuturelist endpoint.
  pub ListMinifutures(LeverageListReq),
  Ok => LeverageList,

  fn path(_input: &Self::Input) -> Str {
    "/instrument_search/query/minifuturelist".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instrument_search/query/unlimitedturbolist endpoint.
  pub ListUnlimitedTurbos(LeverageListReq),
  Ok => LeverageList,

  fn path(_input: &Self::Input) -> Str {
    "/instrument_search/query/unlimitedturbolist".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /instrument_search/query/optionlist/pairs endpoint.
  pub ListOptionPairs(OptionPairsReq),
  Ok => OptionPairs,

  fn path(_input: &Self::Input) -> Str {
    "/instrument_search/query/optionlist/pairs".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}
