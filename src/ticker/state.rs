//! Ticker state — one explicit struct owned by the controller.

use crate::domain::coin::Coin;
use crate::domain::history::state::HistoryState;
use crate::shared::CoinId;

/// Fetch lifecycle for the current selection.
///
/// `Idle → Loading → Ready` on the first fetch after a selection, then
/// `Ready → Loading → Ready` on every periodic refresh until the selection
/// changes or the ticker is torn down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// All mutable ticker state, in one place.
///
/// Derived values (display price, selected coin) are computed by pure
/// accessors rather than stored.
#[derive(Debug, Clone, Default)]
pub struct TickerState {
    coins: Vec<Coin>,
    selected: Option<CoinId>,
    phase: Phase,
    history: HistoryState,
    /// The coin the chart was last initially rendered for.
    rendered_for: Option<CoinId>,
}

impl TickerState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Coin catalogue ───────────────────────────────────────────────────

    pub fn set_coins(&mut self, coins: Vec<Coin>) {
        self.coins = coins;
    }

    pub fn coins(&self) -> &[Coin] {
        &self.coins
    }

    // ── Selection ────────────────────────────────────────────────────────

    /// Begin a new selection cycle: the previous series and render marker
    /// are invalidated and the phase returns to `Idle`.
    pub fn begin_selection(&mut self, coin: CoinId) {
        self.selected = Some(coin);
        self.phase = Phase::Idle;
        self.history.clear();
        self.rendered_for = None;
    }

    pub fn selected(&self) -> Option<&CoinId> {
        self.selected.as_ref()
    }

    /// Full descriptor of the selected coin, when it is in the catalogue.
    pub fn selected_coin(&self) -> Option<&Coin> {
        let id = self.selected.as_ref()?;
        self.coins.iter().find(|c| &c.id == id)
    }

    // ── Phase ────────────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    // ── History ──────────────────────────────────────────────────────────

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryState {
        &mut self.history
    }

    /// Last price of the current series, rounded for display.
    pub fn display_price(&self) -> Option<String> {
        self.history.display_price()
    }

    // ── Render tracking ──────────────────────────────────────────────────

    pub fn rendered_for(&self) -> Option<&CoinId> {
        self.rendered_for.as_ref()
    }

    pub fn mark_rendered(&mut self, coin: CoinId) {
        self.rendered_for = Some(coin);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::history::HistorySeries;
    use chrono::{TimeZone, Utc};

    fn coins() -> Vec<Coin> {
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

    fn series(prices: &[f64]) -> HistorySeries {
        let timestamps = (0..prices.len())
            .map(|i| Utc.timestamp_millis_opt(i as i64 * 1000).unwrap())
            .collect();
        HistorySeries::from_parts(timestamps, prices.to_vec(), vec![0.0; prices.len()]).unwrap()
    }

    #[test]
    fn test_begin_selection_resets_cycle() {
        let mut state = TickerState::new();
        state.set_coins(coins());
        state.begin_selection(CoinId::from("bitcoin"));
        state.set_phase(Phase::Ready);
        state
            .history_mut()
            .apply_snapshot(CoinId::from("bitcoin"), series(&[1.0]));
        state.mark_rendered(CoinId::from("bitcoin"));

        state.begin_selection(CoinId::from("ethereum"));
        assert_eq!(state.selected(), Some(&CoinId::from("ethereum")));
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.history().series().is_none());
        assert!(state.rendered_for().is_none());
    }

    #[test]
    fn test_selected_coin_looks_up_catalogue() {
        let mut state = TickerState::new();
        state.set_coins(coins());
        state.begin_selection(CoinId::from("ethereum"));
        assert_eq!(state.selected_coin().unwrap().name, "Ethereum");
    }

    #[test]
    fn test_display_price_derived_from_history() {
        let mut state = TickerState::new();
        assert_eq!(state.display_price(), None);
        state
            .history_mut()
            .apply_snapshot(CoinId::from("bitcoin"), series(&[100.1, 100.2]));
        assert_eq!(state.display_price().as_deref(), Some("100.20"));
    }
}
