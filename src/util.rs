// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;

use serde::Serialize;
use serde_json::Value;
use serde_variant::to_variant_name;

use crate::endpoint::Params;


/// Convert a single query parameter value into its textual form.
///
/// Strings are emitted verbatim (without quotes), numbers and booleans
/// in their literal form, and compound values as JSON text. `null` has
/// no textual form.
fn value_to_str(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(string) => Some(string.clone()),
    Value::Bool(_) | Value::Number(_) | Value::Array(_) | Value::Object(_) => {
      Some(value.to_string())
    },
  }
}


/// Flatten query parameters into key-value pairs, in order.
///
/// Array values are expanded into one pair per element, all sharing
/// the same key. Object values are emitted as a single pair carrying
/// JSON text. Absent (`null`) values are skipped.
pub(crate) fn query_pairs(params: &Params) -> Vec<(&str, String)> {
  let mut pairs = Vec::with_capacity(params.len());

  for (key, value) in params {
    match value {
      Value::Array(values) => pairs.extend(
        values
          .iter()
          .filter_map(value_to_str)
          .map(|value| (key.as_str(), value)),
      ),
      value => pairs.extend(value_to_str(value).map(|value| (key.as_str(), value))),
    }
  }
  pairs
}


/// Join a slice of identifiers into a comma separated string, as used
/// in paths referencing multiple entities.
pub(crate) fn join_ids<T>(ids: &[T]) -> String
where
  T: Display,
{
  ids
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(",")
}


/// Retrieve the serialized name of a unit enum variant, for use in
/// paths.
pub(crate) fn variant_name<T>(variant: &T) -> &'static str
where
  T: Serialize,
{
  // SANITY: We only ever pass in unit enum variants, for which the
  //         conversion cannot fail.
  to_variant_name(variant).expect("value is not a unit enum variant")
}
