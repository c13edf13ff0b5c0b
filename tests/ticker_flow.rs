//! End-to-end ticker flow over the public API, with a stub fetcher and a
//! recording sink. Time is paused, so the 30-second cadence runs instantly.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use coinwatch::prelude::*;
use coinwatch::ticker::poller::HistoryFetcher;

#[derive(Debug, Default)]
struct RecordingSink {
    renders: usize,
    updates: usize,
    last_price: Option<String>,
}

impl ChartSink for RecordingSink {
    fn render(&mut self, _series: &HistorySeries, _layout: &ChartLayout) {
        self.renders += 1;
    }

    fn update(&mut self, _series: &HistorySeries) {
        self.updates += 1;
    }

    fn show_price(&mut self, display_price: &str) {
        self.last_price = Some(display_price.to_string());
    }
}

fn series(prices: &[f64]) -> HistorySeries {
    let timestamps = (0..prices.len())
        .map(|i| Utc.timestamp_millis_opt(1000 * (i as i64 + 1)).unwrap())
        .collect();
    HistorySeries::from_parts(timestamps, prices.to_vec(), vec![1.0; prices.len()]).unwrap()
}

fn fetcher(calls: Arc<AtomicUsize>) -> HistoryFetcher {
    Arc::new(move |_coin| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        Box::pin(async move { Ok(series(&[100.0, 100.0 + n as f64 / 10.0])) })
    })
}

fn catalogue() -> Vec<Coin> {
    vec![
        Coin {
            id: CoinId::from("bitcoin"),
            name: "Bitcoin".into(),
        },
        Coin {
            id: CoinId::from("ethereum"),
            name: "Ethereum".into(),
        },
    ]
}

async fn pump(ticker: &mut PriceTicker<RecordingSink>, events: usize) {
    for _ in 0..events {
        let event = ticker.recv_event().await.expect("ticker event");
        ticker.handle_event(event);
    }
}

#[tokio::test(start_paused = true)]
async fn selection_fetches_immediately_then_every_period() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut ticker = PriceTicker::with_fetcher(
        fetcher(calls.clone()),
        Duration::from_secs(30),
        RecordingSink::default(),
    );
    ticker.apply_coin_list(catalogue());
    assert_eq!(ticker.state().selected(), Some(&CoinId::from("bitcoin")));

    // Immediate fetch → initial render.
    pump(&mut ticker, 2).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(ticker.sink().renders, 1);
    assert_eq!(ticker.sink().last_price.as_deref(), Some("100.00"));

    // Three periods → three updates, no further render.
    for _ in 0..3 {
        tokio::time::advance(Duration::from_secs(30)).await;
        pump(&mut ticker, 2).await;
    }
    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(ticker.sink().renders, 1);
    assert_eq!(ticker.sink().updates, 3);
    assert_eq!(ticker.sink().last_price.as_deref(), Some("100.30"));
}

#[tokio::test(start_paused = true)]
async fn switching_coins_rerenders_and_silences_the_old_poller() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut ticker = PriceTicker::with_fetcher(
        fetcher(calls.clone()),
        Duration::from_secs(30),
        RecordingSink::default(),
    );
    ticker.apply_coin_list(catalogue());
    pump(&mut ticker, 2).await;

    ticker.select_coin(CoinId::from("ethereum"));
    assert_eq!(ticker.state().phase(), Phase::Idle);

    // The new selection gets its own immediate fetch and initial render.
    pump(&mut ticker, 2).await;
    assert_eq!(ticker.sink().renders, 2);

    // Every event from now on belongs to the new coin.
    tokio::time::advance(Duration::from_secs(90)).await;
    for _ in 0..6 {
        let event = ticker.recv_event().await.expect("ticker event");
        assert_eq!(event.coin(), &CoinId::from("ethereum"));
        ticker.handle_event(event);
    }
    assert_eq!(ticker.sink().renders, 2);
    assert_eq!(ticker.sink().updates, 3);
}

#[tokio::test(start_paused = true)]
async fn empty_snapshot_leaves_chart_and_price_untouched() {
    let empty_then_data: HistoryFetcher = {
        let calls = Arc::new(AtomicUsize::new(0));
        Arc::new(move |_coin| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                if n % 2 == 1 {
                    Ok(HistorySeries::empty())
                } else {
                    Ok(series(&[42.345]))
                }
            })
        })
    };
    let mut ticker = PriceTicker::with_fetcher(
        empty_then_data,
        Duration::from_secs(30),
        RecordingSink::default(),
    );
    ticker.apply_coin_list(catalogue());

    pump(&mut ticker, 2).await;
    assert_eq!(ticker.sink().renders, 1);
    assert_eq!(ticker.sink().last_price.as_deref(), Some("42.35"));

    // The empty refresh tick is a no-op.
    tokio::time::advance(Duration::from_secs(30)).await;
    pump(&mut ticker, 2).await;
    assert_eq!(ticker.sink().renders, 1);
    assert_eq!(ticker.sink().updates, 0);
    assert_eq!(ticker.sink().last_price.as_deref(), Some("42.35"));
    assert_eq!(ticker.state().phase(), Phase::Ready);
}
