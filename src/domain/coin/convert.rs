//! Conversion: CoinListEntry → Coin.

use super::wire::CoinListEntry;
use super::{Coin, CoinValidationError};
use crate::shared::CoinId;

impl TryFrom<CoinListEntry> for Coin {
    type Error = CoinValidationError;

    fn try_from(source: CoinListEntry) -> Result<Self, Self::Error> {
        if source.id.is_empty() {
            return Err(CoinValidationError::EmptyId);
        }
        Ok(Coin {
            id: CoinId::from(source.id),
            name: source.name,
        })
    }
}
