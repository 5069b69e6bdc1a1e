use crate::business_logic::clustering::ward_labels;
use crate::business_logic::waves::{dedup_waves, extract_waves, WaveSeries};
use crate::errors::LevelError;
use crate::models::candle::Candle;

/// Everything the pipeline derived on the way to the levels
#[derive(Debug, Clone)]
pub struct LevelReport {
    pub waves: WaveSeries,
    /// Cluster id per wave point, aligned with `waves`
    pub labels: Vec<usize>,
    pub levels: Vec<f64>,
}

/// Support/resistance levels: rolling extremes -> dedup -> ward clusters -> cluster maxima
pub fn compute_levels(
    candles: &[Candle],
    window: usize,
    num_clusters: usize,
) -> Result<Vec<f64>, LevelError> {
    analyze_levels(candles, window, num_clusters).map(|report| report.levels)
}

pub fn analyze_levels(
    candles: &[Candle],
    window: usize,
    num_clusters: usize,
) -> Result<LevelReport, LevelError> {
    if window == 0 {
        return Err(LevelError::InvalidParameter(
            "window length must be at least 1".to_string(),
        ));
    }
    if num_clusters == 0 {
        return Err(LevelError::InvalidParameter(
            "number of clusters must be at least 1".to_string(),
        ));
    }
    if candles.is_empty() {
        return Err(LevelError::EmptyDataset);
    }
    validate_candles(candles)?;
    if candles.len() < window {
        return Err(LevelError::InsufficientHistory {
            required: window,
            available: candles.len(),
        });
    }

    let waves = dedup_waves(&extract_waves(candles, window));
    let distinct = waves.distinct_values();
    tracing::debug!(
        "Extracted {} wave points ({} distinct) from {} candles, window {}",
        waves.len(),
        distinct,
        candles.len(),
        window
    );

    if distinct < num_clusters {
        return Err(LevelError::InsufficientHistory {
            required: num_clusters,
            available: distinct,
        });
    }

    let values = waves.values();
    let labels = ward_labels(&values, num_clusters)?;
    let levels = select_levels(&values, &labels, num_clusters);
    tracing::debug!("Selected {} levels from {} clusters", levels.len(), num_clusters);

    Ok(LevelReport {
        waves,
        labels,
        levels,
    })
}

/// Maximum value per cluster in cluster-id order, duplicates dropped.
/// Ties on the maximum keep the earliest wave point.
pub fn select_levels(values: &[f64], labels: &[usize], num_clusters: usize) -> Vec<f64> {
    let mut maxima: Vec<Option<f64>> = vec![None; num_clusters];
    for (&value, &label) in values.iter().zip(labels) {
        let Some(slot) = maxima.get_mut(label) else {
            continue;
        };
        if slot.map_or(true, |held| value > held) {
            *slot = Some(value);
        }
    }

    let mut levels: Vec<f64> = Vec::with_capacity(num_clusters);
    for value in maxima.into_iter().flatten() {
        if !levels.contains(&value) {
            levels.push(value);
        }
    }
    levels
}

fn validate_candles(candles: &[Candle]) -> Result<(), LevelError> {
    for (i, candle) in candles.iter().enumerate() {
        if !candle.high.is_finite() || !candle.low.is_finite() {
            return Err(LevelError::InvalidParameter(format!(
                "candle {} has a non-finite high/low",
                i
            )));
        }
    }

    if let Some(pos) = candles
        .windows(2)
        .position(|pair| pair[1].open_time <= pair[0].open_time)
    {
        return Err(LevelError::InvalidParameter(format!(
            "candles must be strictly ascending by open time (index {})",
            pos + 1
        )));
    }

    Ok(())
}
