use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::chart::validate_interval;

#[derive(Debug, Clone, Deserialize, Validate, ToSchema, IntoParams)]
pub struct LevelsQuery {
    #[validate(length(min = 1, max = 24))]
    #[param(example = "BTC")]
    pub coin: String,
    /// Candle interval. Supported: 1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 8h, 12h, 1d, 3d, 1w, 1M.
    #[validate(custom(function = "validate_interval"))]
    #[param(example = "1d")]
    pub interval: String,
    /// First day of the range (UTC)
    #[param(example = "2024-01-01")]
    pub start: NaiveDate,
    /// Last day of the range (UTC), at least one interval after `start`
    #[param(example = "2024-06-01")]
    pub end: NaiveDate,
    /// Rolling wave length in candles
    #[validate(range(min = 1, max = 1000))]
    #[param(example = 3)]
    pub window: Option<usize>,
    /// Number of clusters, i.e. the most levels returned
    #[validate(range(min = 1, max = 7))]
    #[param(example = 3)]
    pub clusters: Option<usize>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LevelsResponse {
    pub coin: String,
    pub interval: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub window: usize,
    pub clusters: usize,
    pub candle_count: usize,
    /// Wave points left after deduplication
    pub wave_count: usize,
    /// Support/resistance prices in cluster order
    pub levels: Vec<f64>,
    pub as_of_ms: u64,
}
