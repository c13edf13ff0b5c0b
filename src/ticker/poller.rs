//! Polling subscription — one background task per selected coin.
//!
//! `start` spawns a tokio task that fetches once immediately and then once
//! per period tick, emitting [`TickerEvent`]s tagged with the coin they were
//! issued for. The returned [`PollHandle`] is the explicit subscription
//! object: cancelling (or dropping) it aborts the task, so no further fetch
//! for that coin is scheduled. The controller keeps at most one handle
//! alive at a time.

use crate::domain::history::HistorySeries;
use crate::error::TickerError;
use crate::shared::CoinId;
use crate::ticker::TickerEvent;

use futures_util::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Async history fetch for an arbitrary coin.
///
/// `GeckoClient::history_fetcher` produces the real one; tests substitute
/// their own.
pub type HistoryFetcher =
    Arc<dyn Fn(CoinId) -> BoxFuture<'static, Result<HistorySeries, TickerError>> + Send + Sync>;

/// Handle to an active polling subscription.
#[derive(Debug)]
pub struct PollHandle {
    coin: CoinId,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn coin(&self) -> &CoinId {
        &self.coin
    }

    /// Stop the subscription. No further events are produced once the task
    /// is aborted, though an already-queued event may still be delivered.
    pub fn cancel(self) {
        tracing::debug!(coin = %self.coin, "cancelling poll subscription");
        // Drop aborts.
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Start polling `coin`: one immediate fetch, then one per `period`.
pub fn start(
    coin: CoinId,
    period: Duration,
    fetcher: HistoryFetcher,
    events: mpsc::Sender<TickerEvent>,
) -> PollHandle {
    let task = tokio::spawn(run_poll(coin.clone(), period, fetcher, events));
    PollHandle { coin, task }
}

async fn run_poll(
    coin: CoinId,
    period: Duration,
    fetcher: HistoryFetcher,
    events: mpsc::Sender<TickerEvent>,
) {
    if fetch_once(&coin, &fetcher, &events).await.is_err() {
        return;
    }

    let mut ticks = tokio::time::interval(period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticks.reset(); // skip immediate first tick

    loop {
        ticks.tick().await;
        if fetch_once(&coin, &fetcher, &events).await.is_err() {
            return;
        }
    }
}

/// One tick: emit `FetchStarted`, fetch, emit the outcome.
///
/// Returns `Err` only when the event channel is closed (receiver gone), at
/// which point polling is pointless.
async fn fetch_once(
    coin: &CoinId,
    fetcher: &HistoryFetcher,
    events: &mpsc::Sender<TickerEvent>,
) -> Result<(), ()> {
    events
        .send(TickerEvent::FetchStarted { coin: coin.clone() })
        .await
        .map_err(drop)?;

    let event = match fetcher(coin.clone()).await {
        Ok(series) => TickerEvent::Snapshot {
            coin: coin.clone(),
            series,
        },
        Err(error) => {
            tracing::warn!(coin = %coin, %error, "history fetch failed; next tick will retry");
            TickerEvent::FetchFailed {
                coin: coin.clone(),
                error,
            }
        }
    };

    events.send(event).await.map_err(drop)
}
