//! Wire types for the market-chart endpoint (REST).

use serde::{Deserialize, Serialize};

/// A single `[timestampMillis, value]` pair as the upstream sends it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint(pub i64, pub f64);

impl SamplePoint {
    pub fn timestamp_ms(&self) -> i64 {
        self.0
    }

    pub fn value(&self) -> f64 {
        self.1
    }
}

/// Raw response from `/coins/{id}/market_chart`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketChartResponse {
    pub prices: Vec<SamplePoint>,
    /// Present upstream but not consumed by the ticker.
    #[serde(default)]
    pub market_caps: Vec<SamplePoint>,
    pub total_volumes: Vec<SamplePoint>,
}
