//! Ticker controller — `PriceTicker`.
//!
//! Owns the application state, the chart sink, and the single event
//! channel. Exactly one polling subscription is active at a time, scoped to
//! the selected coin; selecting another coin cancels it before the new
//! cycle starts. Events tagged with a coin other than the current selection
//! are discarded, so a response that was in flight across a selection
//! change can never reach the chart.

use crate::domain::coin::Coin;
use crate::domain::history::HistorySeries;
use crate::error::TickerError;
use crate::shared::CoinId;
use crate::ticker::poller::{self, HistoryFetcher, PollHandle};
use crate::ticker::sink::{ChartLayout, ChartSink};
use crate::ticker::state::{Phase, TickerState};
use crate::ticker::TickerEvent;

use crate::client::GeckoClient;
use std::time::Duration;
use tokio::sync::mpsc;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// The ticker controller.
pub struct PriceTicker<S: ChartSink> {
    state: TickerState,
    sink: S,
    layout: ChartLayout,
    fetcher: HistoryFetcher,
    poll_interval: Duration,
    events_tx: mpsc::Sender<TickerEvent>,
    events_rx: mpsc::Receiver<TickerEvent>,
    active: Option<PollHandle>,
}

impl<S: ChartSink> PriceTicker<S> {
    /// Build a ticker over a client's history endpoint and poll cadence.
    pub fn new(client: &GeckoClient, sink: S) -> Self {
        Self::with_fetcher(client.history_fetcher(), client.poll_interval(), sink)
    }

    /// Build a ticker over an arbitrary fetcher (tests, alternative
    /// backends).
    pub fn with_fetcher(fetcher: HistoryFetcher, poll_interval: Duration, sink: S) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: TickerState::new(),
            sink,
            layout: ChartLayout::default(),
            fetcher,
            poll_interval,
            events_tx,
            events_rx,
            active: None,
        }
    }

    /// Load the coin catalogue and select the first entry.
    ///
    /// A coin-list failure is returned to the caller: there is no fallback,
    /// and the ticker stays in the no-selection state.
    pub async fn bootstrap(client: &GeckoClient, sink: S) -> Result<Self, TickerError> {
        let mut ticker = Self::new(client, sink);
        let coins = client.coins().list().await?;
        ticker.apply_coin_list(coins);
        Ok(ticker)
    }

    /// Install the catalogue and default-select its first entry.
    pub fn apply_coin_list(&mut self, coins: Vec<Coin>) {
        let first = coins.first().map(|c| c.id.clone());
        self.state.set_coins(coins);
        match first {
            Some(id) => self.select_coin(id),
            None => tracing::warn!("coin list is empty; nothing to select"),
        }
    }

    /// Switch the selection: cancel the old subscription, reset the cycle,
    /// and start polling the new coin. Re-selecting the current coin is a
    /// no-op.
    pub fn select_coin(&mut self, coin: CoinId) {
        if self.state.selected() == Some(&coin) {
            return;
        }
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
        tracing::info!(%coin, "selecting coin");
        self.state.begin_selection(coin.clone());
        self.active = Some(poller::start(
            coin,
            self.poll_interval,
            self.fetcher.clone(),
            self.events_tx.clone(),
        ));
    }

    /// Receive the next ticker event.
    pub async fn recv_event(&mut self) -> Option<TickerEvent> {
        self.events_rx.recv().await
    }

    /// Apply one event to the state and the sink.
    pub fn handle_event(&mut self, event: TickerEvent) {
        if self.state.selected() != Some(event.coin()) {
            tracing::debug!(coin = %event.coin(), "discarding event for stale coin");
            return;
        }
        match event {
            TickerEvent::FetchStarted { .. } => {
                self.state.set_phase(Phase::Loading);
            }
            TickerEvent::Snapshot { coin, series } => {
                self.apply_snapshot(coin, series);
            }
            TickerEvent::FetchFailed { coin, error } => {
                tracing::warn!(%coin, %error, "tick skipped");
                let phase = self.fallback_phase();
                self.state.set_phase(phase);
            }
        }
    }

    /// Consume events until the channel closes. The controller holds a
    /// sender itself, so this loops for the lifetime of the ticker.
    pub async fn run(&mut self) {
        while let Some(event) = self.events_rx.recv().await {
            self.handle_event(event);
        }
    }

    pub fn state(&self) -> &TickerState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: ChartLayout) {
        self.layout = layout;
    }

    // ── Internals ────────────────────────────────────────────────────────

    fn apply_snapshot(&mut self, coin: CoinId, series: HistorySeries) {
        if series.is_empty() {
            tracing::debug!(%coin, "empty history snapshot; keeping previous data");
            let phase = self.fallback_phase();
            self.state.set_phase(phase);
            return;
        }

        let first_render = self.state.rendered_for() != Some(&coin);
        self.state.history_mut().apply_snapshot(coin.clone(), series);
        if first_render {
            self.state.mark_rendered(coin);
        }

        let display = self.state.display_price();
        if let Some(series) = self.state.history().series() {
            if first_render {
                self.sink.render(series, &self.layout);
            } else {
                self.sink.update(series);
            }
        }
        if let Some(price) = display {
            self.sink.show_price(&price);
        }
        self.state.set_phase(Phase::Ready);
    }

    /// Phase to settle in when a tick produced nothing.
    fn fallback_phase(&self) -> Phase {
        if self.state.history().series().is_some() {
            Phase::Ready
        } else {
            Phase::Idle
        }
    }
}
