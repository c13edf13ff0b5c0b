//! Upstream URL constants for the CoinGecko API.

/// Default (free tier) REST API base URL.
pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Pro tier REST API base URL, used when an API key is configured.
pub const PRO_API_URL: &str = "https://pro-api.coingecko.com/api/v3";
