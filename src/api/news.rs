// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Deref;

use chrono::DateTime;
use chrono::Utc;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Error as JsonError;

use crate::api::instruments;
use crate::endpoint::to_params;
use crate::endpoint::Params;
use crate::Str;


/// A type representing a news article ID.
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


/// The delivery level of a news source.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
pub enum SourceLevel {
  /// News are delivered delayed.
  #[serde(rename = "DELAYED")]
  Delayed,
  /// News are delivered in real time.
  #[serde(rename = "REALTIME")]
  Realtime,
  /// Flash news.
  #[serde(rename = "FLASH")]
  Flash,
  /// Any other level that we have not accounted for.
  #[serde(other)]
  Unknown,
}


/// A news article.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Article {
  /// The article's ID.
  #[serde(rename = "news_id")]
  pub id: Id,
  /// The headline.
  #[serde(rename = "headline")]
  pub headline: String,
  /// The name of the source.
  #[serde(rename = "news_source")]
  pub source: String,
  /// The time the article was published at.
  #[serde(rename = "published_time", with = "chrono::serde::ts_milliseconds")]
  pub published_at: DateTime<Utc>,
  /// The body, if included.
  #[serde(rename = "text", default)]
  pub text: Option<String>,
  /// The instruments the article is about.
  #[serde(rename = "instruments", default)]
  pub instruments: Option<Vec<instruments::Id>>,
  /// The language of the article.
  #[serde(rename = "lang", default)]
  pub language: Option<String>,
}


/// A source of news.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Source {
  /// The source's ID.
  #[serde(rename = "news_source_id")]
  pub id: u64,
  /// The source's name.
  #[serde(rename = "name")]
  pub name: String,
  /// The country the source covers.
  #[serde(rename = "country")]
  pub country: String,
  /// The delivery level.
  #[serde(rename = "level")]
  pub level: SourceLevel,
}


/// A GET request to be made to the /news endpoint.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ListReq {
  /// Only list news about the given instrument.
  #[serde(rename = "instrument_id", skip_serializing_if = "Option::is_none")]
  pub instrument_id: Option<instruments::Id>,
  /// The maximum number of articles to list.
  #[serde(rename = "limit", skip_serializing_if = "Option::is_none")]
  pub limit: Option<u32>,
}


Endpoint! {
  /// The representation of a GET request to the /news endpoint.
  pub List(ListReq),
  Ok => Vec<Article>,

  fn path(_input: &Self::Input) -> Str {
    "/news".into()
  }

  fn query(input: &Self::Input) -> Result<Option<Params>, JsonError> {
    to_params(input)
  }
}


Endpoint! {
  /// The representation of a GET request to the /news/<news-id>
  /// endpoint.
  pub Get(Id),
  Ok => Article,

  fn path(input: &Self::Input) -> Str {
    format!("/news/{input}").into()
  }
}


Endpoint! {
  /// The representation of a GET request to the /news_sources
  /// endpoint.
  pub ListSources(()),
  Ok => Vec<Source>,

  fn path(_input: &Self::Input) -> Str {
    "/news_sources".into()
  }
}
