//! Wire types for the coin-list endpoint (REST).

use serde::{Deserialize, Serialize};

/// Raw entry from `/coins/list`. Fields beyond these are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinListEntry {
    pub id: String,
    #[serde(default)]
    pub symbol: String,
    pub name: String,
}
