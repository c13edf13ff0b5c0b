//! Integration tests against the real CoinGecko API.
//!
//! All tests are `#[ignore]` because they require network access (and are
//! subject to the free tier's rate limits).
//!
//! Run with:
//! ```bash
//! cargo test --test live_api -- --ignored
//! ```

use coinwatch::prelude::*;
use coinwatch::shared::CoinId;

fn client() -> GeckoClient {
    GeckoClient::builder()
        .coin_list_retry(RetryPolicy::Idempotent)
        .build()
        .expect("client should build")
}

#[tokio::test]
#[ignore]
async fn coin_list_contains_bitcoin() {
    let coins = client().coins().list().await.expect("coin list");
    assert!(!coins.is_empty());
    assert!(coins.iter().any(|c| c.id.as_str() == "bitcoin"));
    assert!(coins.iter().all(|c| !c.id.is_empty()));
}

#[tokio::test]
#[ignore]
async fn market_chart_returns_an_aligned_series() {
    let series = client()
        .history()
        .market_chart(&CoinId::from("bitcoin"))
        .await
        .expect("market chart");

    assert!(!series.is_empty());
    assert_eq!(series.timestamps().len(), series.prices().len());
    assert_eq!(series.prices().len(), series.volumes().len());

    let display = series.display_price().expect("display price");
    assert!(display.parse::<f64>().is_ok());
}

#[tokio::test]
#[ignore]
async fn unknown_coin_is_a_not_found_error() {
    let err = client()
        .history()
        .market_chart(&CoinId::from("definitely-not-a-coin-id"))
        .await
        .expect_err("should fail");
    assert!(matches!(
        err,
        TickerError::Http(coinwatch::error::HttpError::NotFound(_))
    ));
}
