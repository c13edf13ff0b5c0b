//! History state container — app-owned, latest snapshot only.

use super::HistorySeries;
use crate::shared::CoinId;

/// The latest history snapshot for the coin it was fetched for.
///
/// Each refetch replaces the previous snapshot wholesale; no history is
/// retained across fetches.
#[derive(Debug, Clone, Default)]
pub struct HistoryState {
    coin: Option<CoinId>,
    series: Option<HistorySeries>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the snapshot with a fresh fetch result.
    pub fn apply_snapshot(&mut self, coin: CoinId, series: HistorySeries) {
        self.coin = Some(coin);
        self.series = Some(series);
    }

    /// Drop the snapshot (e.g. on coin change).
    pub fn clear(&mut self) {
        self.coin = None;
        self.series = None;
    }

    pub fn coin(&self) -> Option<&CoinId> {
        self.coin.as_ref()
    }

    pub fn series(&self) -> Option<&HistorySeries> {
        self.series.as_ref()
    }

    pub fn latest_price(&self) -> Option<f64> {
        self.series.as_ref().and_then(|s| s.last_price())
    }

    pub fn display_price(&self) -> Option<String> {
        self.series.as_ref().and_then(|s| s.display_price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn series(prices: &[f64]) -> HistorySeries {
        let timestamps = (0..prices.len())
            .map(|i| Utc.timestamp_millis_opt(i as i64 * 1000).unwrap())
            .collect();
        let volumes = vec![1.0; prices.len()];
        HistorySeries::from_parts(timestamps, prices.to_vec(), volumes).unwrap()
    }

    #[test]
    fn test_apply_snapshot_replaces_wholesale() {
        let mut state = HistoryState::new();
        state.apply_snapshot(CoinId::from("bitcoin"), series(&[1.0, 2.0, 3.0]));
        state.apply_snapshot(CoinId::from("bitcoin"), series(&[4.0]));
        assert_eq!(state.series().unwrap().len(), 1);
        assert_eq!(state.latest_price(), Some(4.0));
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut state = HistoryState::new();
        state.apply_snapshot(CoinId::from("bitcoin"), series(&[1.0]));
        state.clear();
        assert!(state.coin().is_none());
        assert!(state.series().is_none());
        assert_eq!(state.display_price(), None);
    }

    #[test]
    fn test_display_price_derives_from_last_sample() {
        let mut state = HistoryState::new();
        state.apply_snapshot(CoinId::from("ethereum"), series(&[99.9, 100.2]));
        assert_eq!(state.display_price().as_deref(), Some("100.20"));
    }
}
