// Copyright (C) 2026 The nordnet Developers
// SPDX-License-Identifier: GPL-3.0-or-later

/// Definitions pertaining the user's accounts.
pub mod accounts;
/// Definitions for searching instruments by attributes.
pub mod instrument_search;
/// Definitions surrounding instruments.
pub mod instruments;
/// Definitions for logging in and out of the API.
pub mod login;
/// Functionality for searching across all instrument types.
pub mod main_search;
/// Definitions surrounding markets and countries.
pub mod markets;
/// Definitions surrounding news articles.
pub mod news;
/// Definitions surrounding orders.
pub mod orders;
/// Definitions surrounding account positions.
pub mod positions;
/// Functionality for retrieving system status and tick size tables.
pub mod system;
/// Definitions surrounding tradables.
pub mod tradables;
/// Definitions surrounding trades, both private and public.
pub mod trades;

/// The API base URL of the public Nordnet External API.
pub(crate) const API_BASE_URL: &str = "https://public.nordnet.se/api/2";
/// The default request timeout, in milliseconds.
pub(crate) const DEFAULT_TIMEOUT_MS: i64 = 30000;
