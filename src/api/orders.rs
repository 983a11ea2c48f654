// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use http::Method;

use serde::Deserialize;
use serde::Serialize;
use serde_json::to_value;
use serde_json::Error as JsonError;
use serde_json::Value;

use crate::api::accounts;
use crate::api::markets;
use crate::api::tradables::TradableId;
use crate::endpoint::to_params;
use crate::endpoint::Params;
use crate::util::join_ids;
use crate::Str;


/// A type representing an order ID.
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


/// The side of an order or trade.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Side {
  /// Buy an asset.
  #[serde(rename = "BUY")]
  Buy,
  /// Sell an asset.
  #[serde(rename = "SELL")]
  Sell,
}


/// The type of an order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Type {
  /// Fill and kill: execute what is possible immediately and cancel
  /// the remainder.
  #[serde(rename = "FAK")]
  FillAndKill,
  /// Fill or kill: execute the full volume immediately or cancel.
  #[serde(rename = "FOK")]
  FillOrKill,
  /// A normal order.
  #[serde(rename = "NORMAL")]
  Normal,
  /// A limit order.
  #[serde(rename = "LIMIT")]
  Limit,
  /// A stop limit order.
  #[serde(rename = "STOP_LIMIT")]
  StopLimit,
  /// A trailing stop order.
  #[serde(rename = "STOP_TRAILING")]
  StopTrailing,
  /// A one-cancels-the-other order.
  #[serde(rename = "OCO")]
  OneCancelsOther,
}


/// The state of the last action performed on an order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum ActionState {
  /// The order was activated.
  #[serde(rename = "ACTIVATED")]
  Activated,
  /// The order is waiting to be activated.
  #[serde(rename = "CAN_BE_ACTIVATED")]
  CanBeActivated,
  /// The order was deleted.
  #[serde(rename = "DELETED")]
  Deleted,
  /// The order was deleted because a change was denied.
  #[serde(rename = "DELETED_CHANGE_DENY")]
  DeletedChangeDeny,
  /// The order was deleted because of a missing confirmation.
  #[serde(rename = "DELETED_CONFIRM_MISSING")]
  DeletedConfirmMissing,
  /// The order was deleted because the market did not answer.
  #[serde(rename = "DELETED_NO_ANSWER")]
  DeletedNoAnswer,
  /// The order was deleted because it was not acknowledged.
  #[serde(rename = "DELETED_ORDER_NOT_ACKNOWLEDGED")]
  DeletedOrderNotAcknowledged,
  /// The order was deleted because of a routing error.
  #[serde(rename = "DELETED_ROUTING_ERROR")]
  DeletedRoutingError,
  /// The order was deleted, but too late for a cancellation.
  #[serde(rename = "DELETED_TOO_LATE_CANCEL")]
  DeletedTooLateCancel,
  /// The order was fully executed.
  #[serde(rename = "DONE")]
  Done,
  /// The order is held locally.
  #[serde(rename = "LOCAL")]
  Local,
  /// The order is on the market.
  #[serde(rename = "ON_MARKET")]
  OnMarket,
  /// The order was partially executed.
  #[serde(rename = "PART_DONE")]
  PartDone,
  /// The order was sent to the market.
  #[serde(rename = "SENT")]
  Sent,
  /// The order is waiting.
  #[serde(rename = "WAITING")]
  Waiting,
  /// Any other action state that we have not accounted for.
  #[serde(other)]
  Unknown,
}


/// The state an order is in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum State {
  /// The order was deleted.
  #[serde(rename = "DELETED")]
  Deleted,
  /// The order is held locally and not yet sent to the market.
  #[serde(rename = "LOCAL")]
  Local,
  /// The order is on the market.
  #[serde(rename = "ON_MARKET")]
  OnMarket,
  /// The order is locked.
  #[serde(rename = "LOCKED")]
  Locked,
  /// Any other state that we have not accounted for.
  #[serde(other)]
  Unknown,
}


/// The type of a condition activating an order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ActivationType {
  /// Activate once the price reaches a trigger value.
  #[serde(rename = "STOP_ACTPRICE")]
  StopPrice,
  /// Activate once the price moved by a percentage.
  #[serde(rename = "STOP_ACTPRICE_PERC")]
  StopPricePercent,
  /// Activate manually.
  #[serde(rename = "MANUAL")]
  Manual,
  /// Activate as the stop leg of a one-cancels-the-other order.
  #[serde(rename = "OCO_STOP_ACTPRICE")]
  OneCancelsOtherStopPrice,
}


/// A condition activating an order.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ActivationCondition {
  /// The type of the condition.
  #[serde(rename = "type")]
  pub type_: ActivationType,
  /// The trailing value.
  #[serde(rename = "trailing_value", default)]
  pub trailing_value: Option<f64>,
  /// The value triggering the activation.
  #[serde(rename = "trigger_value", default)]
  pub trigger_value: Option<f64>,
  /// The comparison to apply against the trigger value.
  #[serde(rename = "trigger_condition", default)]
  pub trigger_condition: Option<String>,
  /// The target value.
  #[serde(rename = "target_value", default)]
  pub target_value: Option<f64>,
}


/// The type of an order's validity.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum ValidityType {
  /// The order is valid for the day.
  #[serde(rename = "DAY")]
  Day,
  /// The order is valid until a given date.
  #[serde(rename = "UNTIL_DATE")]
  UntilDate,
  /// The order is valid including extended trading hours.
  #[serde(rename = "EXTENDED_HOURS")]
  ExtendedHours,
  /// The order has to be executed immediately.
  #[serde(rename = "IMMEDIATE")]
  Immediate,
  /// Any other validity that we have not accounted for.
  #[serde(other)]
  Unknown,
}


/// An order's validity.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Validity {
  /// The type of validity.
  #[serde(rename = "type")]
  pub type_: ValidityType,
  /// The date until which the order is valid.
  #[serde(rename = "valid_until", default)]
  pub valid_until: Option<NaiveDate>,
}


/// An order as returned by the API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Order {
  /// The number of the account the order belongs to.
  #[serde(rename = "accno")]
  pub account_number: String,
  /// The state of the last action performed on the order.
  #[serde(rename = "action_state")]
  pub action_state: ActionState,
  /// The condition activating the order, if any.
  #[serde(rename = "activation_condition", default)]
  pub activation_condition: Option<ActivationCondition>,
  /// The currency the order is placed in.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The time the order got deleted.
  #[serde(
    rename = "deleted_timestamp",
    default,
    with = "chrono::serde::ts_milliseconds_option"
  )]
  pub deleted_at: Option<DateTime<Utc>>,
  /// The type of the instrument.
  #[serde(rename = "instrument_type")]
  pub instrument_type: String,
  /// The market the order is placed on.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The order's ID.
  #[serde(rename = "order_id")]
  pub id: Id,
  /// The order's state.
  #[serde(rename = "order_state")]
  pub state: State,
  /// The order's type.
  #[serde(rename = "order_type")]
  pub type_: String,
  /// The limit price.
  #[serde(rename = "price")]
  pub price: f64,
  /// The side of the order.
  #[serde(rename = "side")]
  pub side: Side,
  /// The tradable the order is for.
  #[serde(rename = "tradable")]
  pub tradable: TradableId,
  /// The time of the last transaction on the order.
  #[serde(
    rename = "transaction_timestamp",
    default,
    with = "chrono::serde::ts_milliseconds_option"
  )]
  pub transaction_at: Option<DateTime<Utc>>,
  /// The order's validity.
  #[serde(rename = "validity")]
  pub validity: Validity,
  /// The order's volume.
  #[serde(rename = "volume")]
  pub volume: f64,
  /// A free form reference provided by the user.
  #[serde(rename = "reference", default)]
  pub reference: Option<String>,
  /// The volume visible to the market.
  #[serde(rename = "open_volume", default)]
  pub open_volume: Option<f64>,
  /// The volume traded so far.
  #[serde(rename = "traded_volume", default)]
  pub traded_volume: Option<f64>,
}


/// The reply to an order placement, change, or deletion.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Reply {
  /// The ID of the affected order.
  #[serde(rename = "order_id")]
  pub id: Id,
  /// The result code.
  #[serde(rename = "result_code")]
  pub result_code: String,
  /// The order's state after the operation.
  #[serde(rename = "order_state", default)]
  pub state: Option<State>,
  /// A message accompanying the result.
  #[serde(rename = "message", default)]
  pub message: Option<String>,
}


/// A POST request to be made to the /accounts/<account>/orders
/// endpoint.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderReq {
  /// The market to place the order on.
  #[serde(rename = "market_id")]
  pub market_id: markets::Id,
  /// The market specific identifier of the tradable.
  #[serde(rename = "identifier", skip_serializing_if = "Option::is_none")]
  pub identifier: Option<String>,
  /// The side of the order.
  #[serde(rename = "side")]
  pub side: Side,
  /// The volume to trade.
  #[serde(rename = "volume")]
  pub volume: f64,
  /// The limit price.
  #[serde(rename = "price", skip_serializing_if = "Option::is_none")]
  pub price: Option<f64>,
  /// The currency of the price.
  #[serde(rename = "currency", skip_serializing_if = "Option::is_none")]
  pub currency: Option<String>,
  /// The order type.
  #[serde(rename = "order_type", skip_serializing_if = "Option::is_none")]
  pub type_: Option<Type>,
  /// The date until which the order is valid.
  #[serde(rename = "valid_until", skip_serializing_if = "Option::is_none")]
  pub valid_until: Option<NaiveDate>,
  /// The volume visible to the market.
  #[serde(rename = "open_volume", skip_serializing_if = "Option::is_none")]
  pub open_volume: Option<f64>,
  /// The condition activating the order.
  #[serde(rename = "activation_condition", skip_serializing_if = "Option::is_none")]
  pub activation_condition: Option<ActivationType>,
  /// The value triggering the activation.
  #[serde(rename = "trigger_value", skip_serializing_if = "Option::is_none")]
  pub trigger_value: Option<f64>,
  /// The comparison to apply against the trigger value.
  #[serde(rename = "trigger_condition", skip_serializing_if = "Option::is_none")]
  pub trigger_condition: Option<String>,
  /// The target value.
  #[serde(rename = "target_value", skip_serializing_if = "Option::is_none")]
  pub target_value: Option<f64>,
  /// A free form reference.
  #[serde(rename = "reference", skip_serializing_if = "Option::is_none")]
  pub reference: Option<String>,
}

impl OrderReq {
  /// Create a request for an order with only the mandatory fields set.
  pub fn new(market_id: markets::Id, side: Side, volume: f64) -> Self {
    Self {
      market_id,
      identifier: None,
      side,
      volume,
      price: None,
      currency: None,
      type_: None,
      valid_until: None,
      open_volume: None,
      activation_condition: None,
      trigger_value: None,
      trigger_condition: None,
      target_value: None,
      reference: None,
    }
  }
}


/// A PUT request to be made to the /accounts/<account>/orders/<order>
/// endpoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ChangeReq {
  /// The new limit price.
  #[serde(rename = "price", skip_serializing_if = "Option::is_none")]
  pub price: Option<f64>,
  /// The new volume.
  #[serde(rename = "volume", skip_serializing_if = "Option::is_none")]
  pub volume: Option<f64>,
  /// The new volume visible to the market.
  #[serde(rename = "open_volume", skip_serializing_if = "Option::is_none")]
  pub open_volume: Option<f64>,
  /// The currency of the price.
  #[serde(rename = "currency", skip_serializing_if = "Option::is_none")]
  pub currency: Option<String>,
}


/// A GET request to be made to the /accounts/<accounts>/orders
/// endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ListReq {
  /// The accounts to list orders of.
  #[serde(skip)]
  pub accounts: Vec<accounts::Id>,
  /// Whether to include deleted orders.
  #[serde(rename = "deleted", skip_serializing_if = "Option::is_none")]
  pub deleted: Option<bool>,
}


Endpoint! {
  /// The representation of a GET request to the
  /// /accounts/<accounts>/orders endpoint.
  pub List(ListReq),
  Ok => Vec<Order>,

  fn path(input: &Self::Input) -> Str {
    format!("/accounts/{}/orders", join_ids(&input.accounts)).into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a POST request to the
  /// /accounts/<account>/orders endpoint.
  pub Create((accounts::Id, OrderReq)),
  Ok => Reply,

  fn method() -> Method {
    Method::POST
  }

  fn path(input: &Self::Input) -> Str {
    let (account, _) = input;
    format!("/accounts/{account}/orders").into()
  }

  fn body(input: &Self::Input) -> Result<Option<Value>, JsonError> {
    let (_, request) = input;
    to_value(request).map(Some)
  }
}


Endpoint! {
  /// The representation of a PUT request to the
  /// /accounts/<account>/orders/<order> endpoint.
  pub Change((accounts::Id, Id, ChangeReq)),
  Ok => Reply,

  fn method() -> Method {
    Method::PUT
  }

  fn path(input: &Self::Input) -> Str {
    let (account, order, _) = input;
    format!("/accounts/{account}/orders/{order}").into()
  }

  fn body(input: &Self::Input) -> Result<Option<Value>, JsonError> {
    let (_, _, request) = input;
    to_value(request).map(Some)
  }
}


Endpoint! {
  /// The representation of a DELETE request to the
  /// /accounts/<account>/orders/<order> endpoint.
  pub Delete((accounts::Id, Id)),
  Ok => Reply,

  fn method() -> Method {
    Method::DELETE
  }

  fn path(input: &Self::Input) -> Str {
    let (account, order) = input;
    format!("/accounts/{account}/orders/{order}").into()
  }
}


Endpoint! {
  /// The representation of a PUT request to the
  /// /accounts/<account>/orders/<orders>/activate endpoint.
  pub Activate((accounts::Id, Vec<Id>)),
  Ok => Vec<Reply>,

  fn method() -> Method {
    Method::PUT
  }

  fn path(input: &Self::Input) -> Str {
    let (account, orders) = input;
    format!("/accounts/{account}/orders/{}/activate", join_ids(orders)).into()
  }
}
