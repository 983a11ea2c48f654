// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Error as JsonError;

use crate::endpoint::to_params;
use crate::endpoint::Params;
use crate::util::join_ids;
use crate::Str;


/// A type representing an account ID.
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


/// An account of the user.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Account {
  /// The account ID, as used in requests.
  #[serde(rename = "accid")]
  pub id: Id,
  /// The account number, as shown to the user.
  #[serde(rename = "accno")]
  pub number: String,
  /// The account type.
  #[serde(rename = "type")]
  pub type_: String,
  /// Whether this is the user's default account.
  #[serde(rename = "is_default")]
  pub default: bool,
  /// Whether the account is blocked.
  #[serde(rename = "is_blocked")]
  pub blocked: bool,
  /// The alias the user assigned to the account.
  #[serde(rename = "alias", default)]
  pub alias: Option<String>,
}


/// Detailed information about an account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct AccountInfo {
  /// The account ID, as used in requests.
  #[serde(rename = "accid")]
  pub id: Id,
  /// The account number, as shown to the user.
  #[serde(rename = "accno")]
  pub number: String,
  /// The account capital.
  #[serde(rename = "account_capital")]
  pub capital: f64,
  /// The account capital at the start of the year.
  #[serde(rename = "account_capital_start_of_year")]
  pub capital_start_of_year: f64,
  /// The credit granted on the account.
  #[serde(rename = "account_credit")]
  pub credit: f64,
  /// The currency the account is held in.
  #[serde(rename = "account_currency")]
  pub currency: String,
  /// The sum of all ledgers, in the account currency.
  #[serde(rename = "account_sum")]
  pub sum: f64,
  /// The account type.
  #[serde(rename = "account_type")]
  pub type_: String,
  /// The buying power.
  #[serde(rename = "buying_power")]
  pub buying_power: f64,
  /// The collateral.
  #[serde(rename = "collateral")]
  pub collateral: f64,
  /// The collateral at the start of the year.
  #[serde(rename = "collateral_start_of_year")]
  pub collateral_start_of_year: f64,
  /// The credit balance.
  #[serde(rename = "credit_balance")]
  pub credit_balance: f64,
  /// The equity.
  #[serde(rename = "equity")]
  pub equity: f64,
  /// The equity at the start of the year.
  #[serde(rename = "equity_start_of_year")]
  pub equity_start_of_year: f64,
  /// The interest rate, if requested.
  #[serde(rename = "interest_rate", default)]
  pub interest_rate: Option<f64>,
  /// The number of days the interest rate refers to, if requested.
  #[serde(rename = "interest_rate_days", default)]
  pub interest_rate_days: Option<u32>,
  /// Whether the account is blocked.
  #[serde(rename = "is_blocked")]
  pub blocked: bool,
  /// Whether this is the user's default account.
  #[serde(rename = "is_default")]
  pub default: bool,
  /// The loan factor.
  #[serde(rename = "loan_factor")]
  pub loan_factor: f64,
  /// The own capital.
  #[serde(rename = "own_capital")]
  pub own_capital: f64,
  /// The own capital as of this morning.
  #[serde(rename = "own_capital_morning")]
  pub own_capital_morning: f64,
  /// The own capital at the start of the year.
  #[serde(rename = "own_capital_start_of_year")]
  pub own_capital_start_of_year: f64,
  /// The pawn value.
  #[serde(rename = "pawn_value")]
  pub pawn_value: f64,
  /// The margin required for short positions, if requested.
  #[serde(rename = "short_position_margin", default)]
  pub short_position_margin: Option<f64>,
  /// The trading power.
  #[serde(rename = "trading_power")]
  pub trading_power: f64,
  /// The alias the user assigned to the account.
  #[serde(rename = "alias", default)]
  pub alias: Option<String>,
}


/// A single ledger of an account, i.e., the holdings in one currency.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Ledger {
  /// The currency of the ledger.
  #[serde(rename = "currency")]
  pub currency: String,
  /// The sum, in the ledger's currency.
  #[serde(rename = "account_sum")]
  pub sum: f64,
  /// The sum, in the account's currency.
  #[serde(rename = "account_sum_acc")]
  pub sum_acc: f64,
  /// The collateral, in the ledger's currency.
  #[serde(rename = "collateral")]
  pub collateral: f64,
  /// The collateral, in the account's currency.
  #[serde(rename = "collateral_acc")]
  pub collateral_acc: f64,
  /// The credit balance.
  #[serde(rename = "credit_balance")]
  pub credit_balance: f64,
  /// The rate for exchanging the ledger's into the account's currency.
  #[serde(rename = "exchange_rate")]
  pub exchange_rate: f64,
}


/// The ledgers of an account.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Ledgers {
  /// The currency the account is held in.
  #[serde(rename = "account_currency")]
  pub currency: String,
  /// The sum of all ledgers, in the account's currency.
  #[serde(rename = "total_account_sum_acc")]
  pub total_sum_acc: f64,
  /// The collateral of all ledgers, in the account's currency.
  #[serde(rename = "total_collateral_acc")]
  pub total_collateral_acc: f64,
  /// The individual ledgers.
  #[serde(rename = "ledgers")]
  pub ledgers: Vec<Ledger>,
}


/// The number of transactions performed on an account today.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct TransactionsToday {
  /// The account ID.
  #[serde(rename = "accid")]
  pub id: Id,
  /// The number of transactions.
  #[serde(rename = "transactions")]
  pub transactions: u64,
}


/// A GET request to be made to the /accounts endpoint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ListReq {
  /// Whether to include credit accounts.
  #[serde(rename = "include_credit_accounts", skip_serializing_if = "Option::is_none")]
  pub include_credit_accounts: Option<bool>,
}


/// A GET request to be made to the /accounts/<accounts>/info
/// endpoint.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct InfoReq {
  /// The accounts to retrieve information about.
  #[serde(skip)]
  pub accounts: Vec<Id>,
  /// Whether to include the interest rate.
  #[serde(rename = "include_interest_rate", skip_serializing_if = "Option::is_none")]
  pub include_interest_rate: Option<bool>,
  /// Whether to include the margin required for short positions.
  #[serde(rename = "include_short_pos_margin", skip_serializing_if = "Option::is_none")]
  pub include_short_pos_margin: Option<bool>,
}


/// A GET request to be made to the
/// /accounts/<account>/returns/transactions/today endpoint.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct TransactionsTodayReq {
  /// The account to inquire.
  #[serde(skip)]
  pub account: Id,
  /// Whether to include the account's credit account.
  #[serde(rename = "include_credit_account", skip_serializing_if = "Option::is_none")]
  pub include_credit_account: Option<bool>,
}


Endpoint! {
  /// The representation of a GET request to the /accounts endpoint.
  pub List(ListReq),
  Ok => Vec<Account>,

  fn path(_input: &Self::Input) -> Str {
    "/accounts".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /accounts/<accounts>/info endpoint.
  pub Info(InfoReq),
  Ok => Vec<AccountInfo>,

  fn path(input: &Self::Input) -> Str {
    format!("/accounts/{}/info", join_ids(&input.accounts)).into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /accounts/<account>/ledgers endpoint.
  pub GetLedgers(Id),
  Ok => Ledgers,

  fn path(input: &Self::Input) -> Str {
    format!("/accounts/{input}/ledgers").into()
  }
}


Endpoint! {
  /// The representation of a GET request to the
  /// /accounts/<account>/returns/transactions/today endpoint.
  pub GetTransactionsToday(TransactionsTodayReq),
  Ok => Vec<TransactionsToday>,

  fn path(input: &Self::Input) -> Str {
    format!("/accounts/{}/returns/transactions/today", input.account).into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}
