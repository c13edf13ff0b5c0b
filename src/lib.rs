//! # coinwatch
//!
//! A CoinGecko market-data client with a live price/volume ticker.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core** — Shared newtypes, domain models, conversions, state containers
//! 2. **HTTP API** — `GeckoHttp` with per-request retry policies
//! 3. **Client** — `GeckoClient` with nested sub-clients and caching
//! 4. **Ticker** — `PriceTicker` controller: polling subscription + chart sink
//! 5. **TUI** — ratatui chart backend for the `coinwatch` binary
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use coinwatch::prelude::*;
//!
//! let client = GeckoClient::builder().build()?;
//! let mut ticker = PriceTicker::bootstrap(&client, NullSink).await?;
//! ticker.run().await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and formatting helpers used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified crate error types.
pub mod error;

/// Upstream URL constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `GeckoClient` — the primary API entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Layer 4: Ticker ──────────────────────────────────────────────────────────

/// Ticker controller: application state, polling subscription, chart sink.
pub mod ticker;

// ── Layer 5: TUI ─────────────────────────────────────────────────────────────

/// Terminal chart backend.
#[cfg(feature = "tui")]
pub mod tui;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{CoinId, VsCurrency, Window};

    // Domain types — coins
    pub use crate::domain::coin::Coin;

    // Domain types — history
    pub use crate::domain::history::{HistorySeries, SeriesError};
    pub use crate::domain::history::state::HistoryState;

    // Errors
    pub use crate::error::TickerError;

    // Network
    pub use crate::network::{DEFAULT_API_URL, PRO_API_URL};

    // Ticker core
    pub use crate::ticker::sink::{ChartLayout, ChartSink, NullSink, TraceStyle};
    pub use crate::ticker::state::{Phase, TickerState};
    pub use crate::ticker::TickerEvent;

    // HTTP client + sub-clients
    #[cfg(feature = "http")]
    pub use crate::client::{Coins, GeckoClient, GeckoClientBuilder, History};
    #[cfg(feature = "http")]
    pub use crate::http::retry::{RetryConfig, RetryPolicy};
    #[cfg(feature = "http")]
    pub use crate::ticker::controller::PriceTicker;
    #[cfg(feature = "http")]
    pub use crate::ticker::poller::{HistoryFetcher, PollHandle};
}
