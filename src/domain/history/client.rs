//! History sub-client — market-chart queries.

use crate::client::GeckoClient;
use crate::domain::history::HistorySeries;
use crate::error::TickerError;
use crate::shared::CoinId;

/// Sub-client for history operations.
pub struct History<'a> {
    pub(crate) client: &'a GeckoClient,
}

impl<'a> History<'a> {
    /// Fetch the market chart for `coin` using the client's configured
    /// currency and window, converted into an aligned series.
    pub async fn market_chart(&self, coin: &CoinId) -> Result<HistorySeries, TickerError> {
        let resp = self
            .client
            .http
            .get_market_chart(coin, self.client.vs_currency, self.client.window)
            .await?;
        Ok(HistorySeries::try_from(resp)?)
    }
}
