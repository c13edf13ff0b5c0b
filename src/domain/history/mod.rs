//! History domain — the aligned price/volume time series behind the chart.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod state;
pub mod wire;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// One coin's recent history: aligned timestamp/price/volume sequences.
///
/// Position `i` in each sequence refers to the same sample time. The type
/// can only be built through [`HistorySeries::from_parts`], which enforces
/// the alignment, so every instance holds equally long sequences. A series
/// is recreated wholesale on every fetch; nothing is appended in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistorySeries {
    timestamps: Vec<DateTime<Utc>>,
    prices: Vec<f64>,
    volumes: Vec<f64>,
}

impl HistorySeries {
    /// Build a series from pre-aligned sequences.
    pub fn from_parts(
        timestamps: Vec<DateTime<Utc>>,
        prices: Vec<f64>,
        volumes: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        if timestamps.len() != prices.len() || prices.len() != volumes.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: timestamps.len(),
                prices: prices.len(),
                volumes: volumes.len(),
            });
        }
        Ok(Self {
            timestamps,
            prices,
            volumes,
        })
    }

    /// An empty series — the defined result of an empty upstream response.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn volumes(&self) -> &[f64] {
        &self.volumes
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Most recent price sample, if any.
    pub fn last_price(&self) -> Option<f64> {
        self.prices.last().copied()
    }

    /// Most recent price, rounded half-up to two decimals for display.
    pub fn display_price(&self) -> Option<String> {
        self.last_price().map(crate::shared::fmt::display_price)
    }
}

/// Failures turning an upstream response into a [`HistorySeries`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error(
        "misaligned series: {timestamps} timestamps, {prices} prices, {volumes} volumes"
    )]
    LengthMismatch {
        timestamps: usize,
        prices: usize,
        volumes: usize,
    },

    #[error("timestamp {0}ms is out of range")]
    TimestampOutOfRange(i64),
}
