use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationError;

use crate::models::candle::Candle;

pub const SUPPORTED_INTERVALS: [&str; 14] = [
    "1m", "3m", "5m", "15m", "30m", "1h", "2h", "4h", "8h", "12h", "1d", "3d", "1w", "1M",
];

/// Horizontal reference line for one level
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LevelLine {
    pub price: f64,
    #[schema(example = "dash")]
    pub dash: String,
    #[schema(example = 1)]
    pub width: u32,
}

impl LevelLine {
    pub fn dashed(price: f64) -> Self {
        Self {
            price,
            dash: "dash".to_string(),
            width: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum VolumeDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VolumeBar {
    /// Candle open time (epoch ms)
    pub time: u64,
    pub volume: f64,
    pub direction: VolumeDirection,
}

/// Everything a client needs to draw candles, volume and level lines
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChartResponse {
    #[schema(example = "BTC Chart")]
    pub title: String,
    pub coin: String,
    pub interval: String,
    pub as_of_ms: u64,
    pub candles: Vec<Candle>,
    pub levels: Vec<LevelLine>,
    pub volume: Vec<VolumeBar>,
}

/// Volume bars coloured by close-to-close direction; the first bar counts as down
pub fn volume_bars(candles: &[Candle]) -> Vec<VolumeBar> {
    candles
        .iter()
        .enumerate()
        .map(|(i, candle)| {
            let up = i > 0 && candle.closed_above(&candles[i - 1]);
            VolumeBar {
                time: candle.open_time,
                volume: candle.volume,
                direction: if up {
                    VolumeDirection::Up
                } else {
                    VolumeDirection::Down
                },
            }
        })
        .collect()
}

pub fn interval_ms(interval: &str) -> Option<u64> {
    match interval {
        "1m" => Some(60_000),
        "3m" => Some(180_000),
        "5m" => Some(300_000),
        "15m" => Some(900_000),
        "30m" => Some(1_800_000),
        "1h" => Some(3_600_000),
        "2h" => Some(7_200_000),
        "4h" => Some(14_400_000),
        "8h" => Some(28_800_000),
        "12h" => Some(43_200_000),
        "1d" => Some(86_400_000),
        "3d" => Some(259_200_000),
        "1w" => Some(604_800_000),
        "1M" => Some(2_592_000_000),
        _ => None,
    }
}

pub fn validate_interval(value: &str) -> Result<(), ValidationError> {
    if interval_ms(value).is_some() {
        return Ok(());
    }

    let mut error = ValidationError::new("unsupported_interval");
    error.message = Some(
        format!(
            "interval must be one of: {}",
            SUPPORTED_INTERVALS.join(", ")
        )
        .into(),
    );
    Err(error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candle(open_time: u64, close: f64, volume: f64) -> Candle {
        Candle {
            open_time,
            close_time: open_time + 59_999,
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            volume,
            num_trades: 1,
            interval: None,
            symbol: None,
        }
    }

    #[test]
    fn interval_ms_supports_all_intervals() {
        for interval in SUPPORTED_INTERVALS {
            assert!(
                interval_ms(interval).is_some(),
                "missing interval: {}",
                interval
            );
        }
    }

    #[test]
    fn validate_interval_rejects_unknown() {
        let error = validate_interval("10m").unwrap_err();
        assert_eq!(error.code, "unsupported_interval");
    }

    #[test]
    fn volume_bars_follow_close_direction() {
        let candles = vec![
            make_candle(0, 10.0, 5.0),
            make_candle(60_000, 11.0, 6.0),
            make_candle(120_000, 11.0, 7.0),
            make_candle(180_000, 9.0, 8.0),
        ];

        let directions: Vec<VolumeDirection> =
            volume_bars(&candles).iter().map(|bar| bar.direction).collect();

        assert_eq!(
            directions,
            vec![
                VolumeDirection::Down,
                VolumeDirection::Up,
                VolumeDirection::Down,
                VolumeDirection::Down,
            ]
        );
    }

    #[test]
    fn level_line_serializes_dashed() {
        let json = serde_json::to_value(LevelLine::dashed(42.5)).unwrap();
        assert_eq!(json["price"], 42.5);
        assert_eq!(json["dash"], "dash");
        assert_eq!(json["width"], 1);
    }

    #[test]
    fn volume_direction_is_lowercase() {
        let json = serde_json::to_string(&VolumeDirection::Up).unwrap();
        assert_eq!(json, "\"up\"");
    }
}
