// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(clippy::unreadable_literal)]
#![warn(
  bad_style,
  dead_code,
  future_incompatible,
  improper_ctypes,
  late_bound_lifetime_arguments,
  missing_debug_implementations,
  missing_docs,
  no_mangle_generic_items,
  non_shorthand_field_patterns,
  nonstandard_style,
  overflowing_literals,
  path_statements,
  patterns_in_fns_without_body,
  proc_macro_derive_resolution_fallback,
  renamed_and_removed_lints,
  rust_2018_compatibility,
  rust_2018_idioms,
  stable_features,
  trivial_bounds,
  trivial_numeric_casts,
  type_alias_bounds,
  tyvar_behind_raw_pointer,
  unconditional_recursion,
  unreachable_code,
  unreachable_patterns,
  unstable_features,
  unstable_name_collisions,
  unused,
  unused_comparisons,
  unused_import_braces,
  unused_lifetimes,
  unused_qualifications,
  unused_results,
  while_true,
  rustdoc::broken_intra_doc_links
)]

//! A crate for interacting with the Nordnet External API.
//!
//! All interaction happens through a [`Client`], which issues requests
//! to endpoints defined in the [`api`] module:
//! ```no_run
//! # async fn example() -> Result<(), nordnet::Error> {
//! use nordnet::api::accounts;
//! use nordnet::ApiInfo;
//! use nordnet::Client;
//!
//! let api_info = ApiInfo::from_env()?;
//! let client = Client::new(api_info)?;
//! let accounts = client.issue::<accounts::List>(&Default::default()).await?;
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod endpoint;

/// A module comprising the definitions of the endpoints the API
/// offers.
pub mod api;

/// A module providing the HTTP transport abstraction the [`Client`]
/// builds upon.
pub mod transport;

mod api_info;
mod client;
mod error;
mod session;
mod util;

#[cfg(test)]
mod test_util;

use std::borrow::Cow;

pub use crate::api_info::ApiInfo;
pub use crate::api_info::Language;
pub use crate::client::Client;
pub use crate::client::RequestOptions;
pub use crate::endpoint::Endpoint;
pub use crate::endpoint::Params;
pub use crate::error::Error;

type Str = Cow<'static, str>;
