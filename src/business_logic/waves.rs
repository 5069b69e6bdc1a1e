use crate::business_logic::indicators::{rolling_max, rolling_min};
use crate::models::candle::Candle;

/// Whether a wave point came from the rolling maximum or the rolling minimum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Peak,
    Trough,
}

/// Candidate extreme price
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavePoint {
    /// Index of the bar whose window produced the value
    pub index: usize,
    pub value: f64,
    pub polarity: Polarity,
}

/// Per-polarity wave candidates, each already free of plateaus
#[derive(Debug, Clone, Default)]
pub struct ExtractedWaves {
    pub peaks: Vec<WavePoint>,
    pub troughs: Vec<WavePoint>,
}

/// Deduplicated, time-ordered wave points
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WaveSeries {
    points: Vec<WavePoint>,
}

impl WaveSeries {
    pub fn points(&self) -> &[WavePoint] {
        &self.points
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn distinct_values(&self) -> usize {
        let mut values = self.values();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values.len()
    }
}

/// Rolling highs/lows tagged by polarity, with in-series plateaus collapsed
pub fn extract_waves(candles: &[Candle], window: usize) -> ExtractedWaves {
    let highs: Vec<f64> = candles.iter().map(|c| c.high).collect();
    let lows: Vec<f64> = candles.iter().map(|c| c.low).collect();

    ExtractedWaves {
        peaks: tag_series(&rolling_max(&highs, window), Polarity::Peak),
        troughs: tag_series(&rolling_min(&lows, window), Polarity::Trough),
    }
}

fn tag_series(series: &[Option<f64>], polarity: Polarity) -> Vec<WavePoint> {
    let mut points: Vec<WavePoint> = Vec::new();

    for (index, value) in series.iter().enumerate() {
        let Some(value) = *value else {
            continue;
        };
        if points.last().is_some_and(|last| last.value == value) {
            continue;
        }
        points.push(WavePoint {
            index,
            value,
            polarity,
        });
    }

    points
}

/// Merge both polarities by bar index and collapse repeated polarity or value
pub fn dedup_waves(waves: &ExtractedWaves) -> WaveSeries {
    let mut merged: Vec<WavePoint> = Vec::with_capacity(waves.peaks.len() + waves.troughs.len());
    merged.extend_from_slice(&waves.peaks);
    merged.extend_from_slice(&waves.troughs);
    // Stable: on the same bar the peak stays ahead of the trough
    merged.sort_by_key(|p| p.index);

    let mut points: Vec<WavePoint> = Vec::with_capacity(merged.len());
    for point in merged {
        let repeated = points
            .last()
            .is_some_and(|last| last.polarity == point.polarity || last.value == point.value);
        if !repeated {
            points.push(point);
        }
    }

    WaveSeries { points }
}
