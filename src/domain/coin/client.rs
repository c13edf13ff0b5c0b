//! Coins sub-client — catalogue fetch with TTL cache.

use crate::client::GeckoClient;
use crate::domain::coin::Coin;
use crate::error::TickerError;
use std::time::Instant;

/// Sub-client for coin-catalogue operations.
pub struct Coins<'a> {
    pub(crate) client: &'a GeckoClient,
}

impl<'a> Coins<'a> {
    /// Fetch the coin catalogue. Uses the client's TTL cache; the list is
    /// loaded once at startup and changes rarely upstream.
    ///
    /// Entries with an empty id cannot form a request URL and are dropped.
    pub async fn list(&self) -> Result<Vec<Coin>, TickerError> {
        {
            let cache = self.client.coin_cache.read().await;
            if let Some((coins, fetched_at)) = cache.as_ref() {
                if fetched_at.elapsed() < self.client.coin_cache_ttl {
                    return Ok(coins.clone());
                }
            }
        }
        self.refresh().await
    }

    /// Fetch the coin catalogue, bypassing and repopulating the cache.
    pub async fn refresh(&self) -> Result<Vec<Coin>, TickerError> {
        let entries = self.client.http.get_coin_list().await?;
        let total = entries.len();

        let coins: Vec<Coin> = entries
            .into_iter()
            .filter_map(|entry| match Coin::try_from(entry) {
                Ok(coin) => Some(coin),
                Err(err) => {
                    tracing::debug!(%err, "dropping invalid coin-list entry");
                    None
                }
            })
            .collect();

        if coins.len() < total {
            tracing::warn!(
                dropped = total - coins.len(),
                kept = coins.len(),
                "coin list contained invalid entries"
            );
        }

        *self.client.coin_cache.write().await = Some((coins.clone(), Instant::now()));
        Ok(coins)
    }

    /// Drop the cached catalogue.
    pub async fn invalidate(&self) {
        *self.client.coin_cache.write().await = None;
    }
}
