//! Shared newtypes used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize
//! identically to the raw format the upstream API sends, so they can be used
//! directly in wire types without conversion overhead.

pub mod fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── CoinId ──────────────────────────────────────────────────────────────────

/// Newtype for CoinGecko coin identifiers (e.g. `"bitcoin"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CoinId(String);

impl CoinId {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for CoinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CoinId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for CoinId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for CoinId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(CoinId(s.to_string()))
    }
}

impl Serialize for CoinId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CoinId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(CoinId(s))
    }
}

// ─── VsCurrency ──────────────────────────────────────────────────────────────

/// Quote currency for price and volume values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VsCurrency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Jpy,
}

impl VsCurrency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "usd",
            Self::Eur => "eur",
            Self::Gbp => "gbp",
            Self::Jpy => "jpy",
        }
    }

    /// Currency sign for display readouts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Usd => "$",
            Self::Eur => "€",
            Self::Gbp => "£",
            Self::Jpy => "¥",
        }
    }
}

impl std::fmt::Display for VsCurrency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VsCurrency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usd" => Ok(Self::Usd),
            "eur" => Ok(Self::Eur),
            "gbp" => Ok(Self::Gbp),
            "jpy" => Ok(Self::Jpy),
            other => Err(format!("unsupported vs_currency: {other}")),
        }
    }
}

// ─── Window ──────────────────────────────────────────────────────────────────

/// History window requested from the market-chart endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Window {
    /// One day of minutely samples. The ticker's fixed window.
    #[default]
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "7d")]
    Day7,
    #[serde(rename = "30d")]
    Day30,
}

impl Window {
    /// Value for the `days` query parameter.
    pub fn days(&self) -> &'static str {
        match self {
            Self::Day1 => "1",
            Self::Day7 => "7",
            Self::Day30 => "30",
        }
    }

    /// Value for the `interval` query parameter, when one is pinned.
    pub fn interval(&self) -> Option<&'static str> {
        match self {
            Self::Day1 => Some("1m"),
            Self::Day7 => None,
            Self::Day30 => Some("daily"),
        }
    }
}

impl std::fmt::Display for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d", self.days())
    }
}

impl FromStr for Window {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches('d') {
            "1" => Ok(Self::Day1),
            "7" => Ok(Self::Day7),
            "30" => Ok(Self::Day30),
            other => Err(format!("unsupported window: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coin_id_serde() {
        let id = CoinId::from("bitcoin");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"bitcoin\"");
        let back: CoinId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_vs_currency_round_trip() {
        let usd: VsCurrency = serde_json::from_str("\"usd\"").unwrap();
        assert_eq!(usd, VsCurrency::Usd);
        assert_eq!(usd.symbol(), "$");
        assert_eq!("eur".parse::<VsCurrency>().unwrap(), VsCurrency::Eur);
        assert!("xau".parse::<VsCurrency>().is_err());
    }

    #[test]
    fn test_window_query_params() {
        assert_eq!(Window::Day1.days(), "1");
        assert_eq!(Window::Day1.interval(), Some("1m"));
        assert_eq!(Window::Day7.interval(), None);
        assert_eq!("30d".parse::<Window>().unwrap(), Window::Day30);
    }
}
