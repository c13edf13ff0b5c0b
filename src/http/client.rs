//! Low-level HTTP client — `GeckoHttp`.
//!
//! One method per API endpoint. Returns wire types (conversion to domain
//! types happens at the sub-client boundary). Internal to the crate — the
//! high-level `GeckoClient` wraps this.

use crate::domain::coin::wire::CoinListEntry;
use crate::domain::history::wire::MarketChartResponse;
use crate::error::HttpError;
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::{CoinId, VsCurrency, Window};

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for the CoinGecko REST API.
#[derive(Clone)]
pub struct GeckoHttp {
    base_url: String,
    client: Client,
    /// Pro-tier key, appended as a query parameter when set.
    api_key: Option<String>,
    /// Policy applied to the coin-list request.
    coin_list_retry: RetryPolicy,
}

impl GeckoHttp {
    pub fn new(base_url: &str, api_key: Option<String>, coin_list_retry: RetryPolicy) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(15))
            .pool_max_idle_per_host(4);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            api_key,
            coin_list_retry,
        }
    }

    // ── Coins ────────────────────────────────────────────────────────────

    /// GET `/coins/list`
    pub async fn get_coin_list(&self) -> Result<Vec<CoinListEntry>, HttpError> {
        let url = self.with_key(format!("{}/coins/list", self.base_url));
        self.get(&url, self.coin_list_retry.clone()).await
    }

    // ── Market chart ─────────────────────────────────────────────────────

    /// GET `/coins/{id}/market_chart?vs_currency=..&days=..[&interval=..]`
    ///
    /// Never retried here: a failed tick is retried by the next scheduled
    /// tick, not inside this call.
    pub async fn get_market_chart(
        &self,
        coin: &CoinId,
        vs_currency: VsCurrency,
        window: Window,
    ) -> Result<MarketChartResponse, HttpError> {
        let mut url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(coin.as_str()),
            vs_currency.as_str(),
            window.days()
        );
        if let Some(interval) = window.interval() {
            url = format!("{}&interval={}", url, interval);
        }
        let url = self.with_key(url);
        self.get(&url, RetryPolicy::None).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    fn with_key(&self, url: String) -> String {
        match &self.api_key {
            Some(key) => {
                let sep = if url.contains('?') { '&' } else { '?' };
                format!("{}{}x_cg_pro_api_key={}", url, sep, key)
            }
            None => url,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match retry {
            RetryPolicy::None => {
                return self.do_request(url).await;
            }
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c,
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_request::<T>(url).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            config.retryable_statuses.contains(&429)
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        tracing::debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self.client.get(url).send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let status_code = status.as_u16();
        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(api_key: Option<&str>) -> GeckoHttp {
        GeckoHttp::new(
            "https://api.coingecko.com/api/v3/",
            api_key.map(|s| s.to_string()),
            RetryPolicy::None,
        )
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let h = http(None);
        assert_eq!(h.base_url, "https://api.coingecko.com/api/v3");
    }

    #[test]
    fn test_with_key_appends_query_parameter() {
        let h = http(Some("k-123"));
        assert_eq!(
            h.with_key("https://x/coins/list".to_string()),
            "https://x/coins/list?x_cg_pro_api_key=k-123"
        );
        assert_eq!(
            h.with_key("https://x/a?b=1".to_string()),
            "https://x/a?b=1&x_cg_pro_api_key=k-123"
        );
    }
}
