//! Conversion: MarketChartResponse → HistorySeries.
//!
//! The `prices` pair list is the time axis; `total_volumes` contributes
//! values only. The two lists must be equally long — anything else is
//! malformed upstream data and yields an error rather than a partial series.

use super::wire::MarketChartResponse;
use super::{HistorySeries, SeriesError};
use chrono::{DateTime, TimeZone, Utc};

impl TryFrom<MarketChartResponse> for HistorySeries {
    type Error = SeriesError;

    fn try_from(source: MarketChartResponse) -> Result<Self, Self::Error> {
        if source.prices.len() != source.total_volumes.len() {
            return Err(SeriesError::LengthMismatch {
                timestamps: source.prices.len(),
                prices: source.prices.len(),
                volumes: source.total_volumes.len(),
            });
        }

        let mut timestamps: Vec<DateTime<Utc>> = Vec::with_capacity(source.prices.len());
        let mut prices: Vec<f64> = Vec::with_capacity(source.prices.len());
        for point in &source.prices {
            let ts = Utc
                .timestamp_millis_opt(point.timestamp_ms())
                .single()
                .ok_or(SeriesError::TimestampOutOfRange(point.timestamp_ms()))?;
            timestamps.push(ts);
            prices.push(point.value());
        }

        let volumes: Vec<f64> = source.total_volumes.iter().map(|p| p.value()).collect();

        HistorySeries::from_parts(timestamps, prices, volumes)
    }
}
