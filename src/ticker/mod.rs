//! Ticker — application state, polling subscription, and chart sink.
//!
//! The controller consumes [`TickerEvent`]s from a single channel; all
//! state mutation happens on that one event loop. Every event carries the
//! coin it was issued for, so a response that outlives a selection change
//! can be recognized and discarded.

#[cfg(feature = "http")]
pub mod controller;
#[cfg(feature = "http")]
pub mod poller;
pub mod sink;
pub mod state;

use crate::domain::history::HistorySeries;
use crate::error::TickerError;
use crate::shared::CoinId;

/// Events produced by the polling subscription for one coin.
#[derive(Debug)]
pub enum TickerEvent {
    /// A tick began; a fetch is in flight.
    FetchStarted { coin: CoinId },
    /// A fetch completed with a fresh snapshot.
    Snapshot {
        coin: CoinId,
        series: HistorySeries,
    },
    /// A fetch failed; the next tick will try again.
    FetchFailed { coin: CoinId, error: TickerError },
}

impl TickerEvent {
    /// The coin this event was issued for.
    pub fn coin(&self) -> &CoinId {
        match self {
            Self::FetchStarted { coin }
            | Self::Snapshot { coin, .. }
            | Self::FetchFailed { coin, .. } => coin,
        }
    }
}
