//! High-level client — `GeckoClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, shared cache state, and accessor methods.

use crate::domain::coin::Coin;
use crate::error::TickerError;
use crate::http::retry::RetryPolicy;
use crate::http::GeckoHttp;
use crate::network;
use crate::shared::{CoinId, VsCurrency, Window};
use crate::ticker::poller::HistoryFetcher;

use async_lock::RwLock;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Re-export sub-client types for convenience.
pub use crate::domain::coin::client::Coins;
pub use crate::domain::history::client::History;

/// The primary entry point for the CoinGecko API.
///
/// Provides nested sub-client accessors per domain: `client.coins()`,
/// `client.history()`.
#[derive(Clone)]
pub struct GeckoClient {
    pub(crate) http: GeckoHttp,
    pub(crate) vs_currency: VsCurrency,
    pub(crate) window: Window,
    pub(crate) poll_interval: Duration,
    /// Coin catalogue cache: (coins, fetched_at)
    pub(crate) coin_cache: Arc<RwLock<Option<(Vec<Coin>, Instant)>>>,
    /// Cache TTL for the coin catalogue.
    pub(crate) coin_cache_ttl: Duration,
}

impl GeckoClient {
    pub fn builder() -> GeckoClientBuilder {
        GeckoClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn coins(&self) -> Coins<'_> {
        Coins { client: self }
    }

    pub fn history(&self) -> History<'_> {
        History { client: self }
    }

    // ── Configuration accessors ──────────────────────────────────────────

    pub fn vs_currency(&self) -> VsCurrency {
        self.vs_currency
    }

    pub fn window(&self) -> Window {
        self.window
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Adapter handing the poller a history fetch for an arbitrary coin.
    pub fn history_fetcher(&self) -> HistoryFetcher {
        let client = self.clone();
        Arc::new(move |coin: CoinId| {
            let client = client.clone();
            Box::pin(async move { client.history().market_chart(&coin).await })
        })
    }

    /// Drop all cached data.
    pub async fn clear_all_caches(&self) {
        *self.coin_cache.write().await = None;
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct GeckoClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    vs_currency: VsCurrency,
    window: Window,
    poll_interval: Duration,
    coin_cache_ttl: Duration,
    coin_list_retry: RetryPolicy,
}

impl Default for GeckoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key: None,
            vs_currency: VsCurrency::Usd,
            window: Window::Day1,
            poll_interval: Duration::from_secs(30),
            coin_cache_ttl: Duration::from_secs(3600),
            coin_list_retry: RetryPolicy::None,
        }
    }
}

impl GeckoClientBuilder {
    /// Override the API base URL. Defaults to the free-tier host, or the
    /// pro host when an API key is set.
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = Some(url.to_string());
        self
    }

    /// Use a pro-tier API key.
    pub fn api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    pub fn vs_currency(mut self, vs_currency: VsCurrency) -> Self {
        self.vs_currency = vs_currency;
        self
    }

    pub fn window(mut self, window: Window) -> Self {
        self.window = window;
        self
    }

    /// Cadence of the ticker's periodic refresh.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn coin_cache_ttl(mut self, ttl: Duration) -> Self {
        self.coin_cache_ttl = ttl;
        self
    }

    /// Retry policy for the coin-list request. History fetches are never
    /// retried inside a tick regardless of this setting.
    pub fn coin_list_retry(mut self, policy: RetryPolicy) -> Self {
        self.coin_list_retry = policy;
        self
    }

    pub fn build(self) -> Result<GeckoClient, TickerError> {
        let base_url = self.base_url.unwrap_or_else(|| {
            if self.api_key.is_some() {
                network::PRO_API_URL.to_string()
            } else {
                network::DEFAULT_API_URL.to_string()
            }
        });

        Ok(GeckoClient {
            http: GeckoHttp::new(&base_url, self.api_key, self.coin_list_retry),
            vs_currency: self.vs_currency,
            window: self.window,
            poll_interval: self.poll_interval,
            coin_cache: Arc::new(RwLock::new(None)),
            coin_cache_ttl: self.coin_cache_ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = GeckoClient::builder().build().unwrap();
        assert_eq!(client.vs_currency(), VsCurrency::Usd);
        assert_eq!(client.window(), Window::Day1);
        assert_eq!(client.poll_interval(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides() {
        let client = GeckoClient::builder()
            .vs_currency(VsCurrency::Eur)
            .window(Window::Day7)
            .poll_interval(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.vs_currency(), VsCurrency::Eur);
        assert_eq!(client.window(), Window::Day7);
        assert_eq!(client.poll_interval(), Duration::from_secs(5));
    }
}
