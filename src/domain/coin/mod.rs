//! Coin domain — the selectable asset catalogue.

#[cfg(feature = "http")]
pub mod client;
mod convert;
pub mod wire;

use crate::shared::CoinId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A selectable asset, sourced verbatim from the coin-list endpoint.
///
/// Only the id and display name are consumed; the catalogue is immutable
/// once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub name: String,
}

impl std::fmt::Display for Coin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// Validation failures for a coin-list entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoinValidationError {
    #[error("coin-list entry has an empty id")]
    EmptyId,
}
