use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One OHLCV bar as served by Hyperliquid `candleSnapshot`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Candle {
    /// Candle open time (epoch ms), unique and ascending within a series
    #[serde(rename = "t")]
    #[schema(rename = "t")]
    pub open_time: u64,
    /// Candle close time (epoch ms)
    #[serde(rename = "T")]
    #[schema(rename = "T")]
    pub close_time: u64,
    #[serde(rename = "o", deserialize_with = "deserialize_price")]
    #[schema(rename = "o")]
    pub open: f64,
    #[serde(rename = "h", deserialize_with = "deserialize_price")]
    #[schema(rename = "h")]
    pub high: f64,
    #[serde(rename = "l", deserialize_with = "deserialize_price")]
    #[schema(rename = "l")]
    pub low: f64,
    #[serde(rename = "c", deserialize_with = "deserialize_price")]
    #[schema(rename = "c")]
    pub close: f64,
    #[serde(rename = "v", deserialize_with = "deserialize_price")]
    #[schema(rename = "v")]
    pub volume: f64,
    /// Number of trades
    #[serde(rename = "n", default)]
    #[schema(rename = "n")]
    pub num_trades: u64,
    /// Candle interval (optional if upstream omits it)
    #[serde(rename = "i", default)]
    #[schema(rename = "i")]
    pub interval: Option<String>,
    /// Candle symbol (optional if upstream omits it)
    #[serde(rename = "s", default)]
    #[schema(rename = "s")]
    pub symbol: Option<String>,
}

impl Candle {
    /// Closed strictly above the previous bar's close
    pub fn closed_above(&self, previous: &Candle) -> bool {
        self.close > previous.close
    }
}

/// Upstream sends decimal strings; numbers are accepted too
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Number(f64),
}

fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match RawPrice::deserialize(deserializer)? {
        RawPrice::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
        RawPrice::Number(n) => Ok(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_upstream_string_prices() {
        let json = r#"{"t":1700000000000,"T":1700000059999,"s":"BTC","i":"1m",
            "o":"37000.5","c":"37010.0","h":"37020.0","l":"36990.25","v":"12.5","n":42}"#;

        let candle: Candle = serde_json::from_str(json).unwrap();

        assert_eq!(candle.open_time, 1_700_000_000_000);
        assert_eq!(candle.high, 37020.0);
        assert_eq!(candle.low, 36990.25);
        assert_eq!(candle.num_trades, 42);
        assert_eq!(candle.symbol.as_deref(), Some("BTC"));
    }

    #[test]
    fn deserializes_numeric_prices_without_optional_fields() {
        let json = r#"{"t":0,"T":59999,"o":1.0,"c":2.0,"h":3.0,"l":0.5,"v":10}"#;

        let candle: Candle = serde_json::from_str(json).unwrap();

        assert_eq!(candle.close, 2.0);
        assert_eq!(candle.volume, 10.0);
        assert_eq!(candle.num_trades, 0);
        assert!(candle.interval.is_none());
    }

    #[test]
    fn rejects_unparseable_price() {
        let json = r#"{"t":0,"T":1,"o":"abc","c":"1","h":"1","l":"1","v":"1"}"#;
        assert!(serde_json::from_str::<Candle>(json).is_err());
    }
}
