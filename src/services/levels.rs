use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};

use crate::business_logic::config::LevelsConfig;
use crate::business_logic::levels::analyze_levels;
use crate::errors::{AppError, LevelError};
use crate::models::candle::Candle;
use crate::models::chart::{interval_ms, volume_bars, ChartResponse, LevelLine};
use crate::models::levels::{LevelsQuery, LevelsResponse};
use crate::services::hyperliquid::CandleSource;

/// Levels computed for one coin and range, with the candles they came from
#[derive(Debug, Clone)]
pub struct LevelAnalysis {
    pub as_of_ms: u64,
    pub coin: String,
    pub interval: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub window: usize,
    pub clusters: usize,
    pub candles: Vec<Candle>,
    pub wave_count: usize,
    pub levels: Vec<f64>,
}

impl LevelAnalysis {
    pub fn into_levels_response(self) -> LevelsResponse {
        LevelsResponse {
            coin: self.coin,
            interval: self.interval,
            start: self.start,
            end: self.end,
            window: self.window,
            clusters: self.clusters,
            candle_count: self.candles.len(),
            wave_count: self.wave_count,
            levels: self.levels,
            as_of_ms: self.as_of_ms,
        }
    }

    pub fn into_chart_response(self) -> ChartResponse {
        ChartResponse {
            title: format!("{} Chart", self.coin),
            volume: volume_bars(&self.candles),
            levels: self.levels.iter().copied().map(LevelLine::dashed).collect(),
            coin: self.coin,
            interval: self.interval,
            as_of_ms: self.as_of_ms,
            candles: self.candles,
        }
    }
}

pub struct LevelService<S> {
    source: Arc<S>,
    config: LevelsConfig,
}

impl<S: CandleSource> LevelService<S> {
    pub fn new(source: Arc<S>, config: LevelsConfig) -> Self {
        Self { source, config }
    }

    pub async fn analyze(&self, query: &LevelsQuery) -> Result<LevelAnalysis, AppError> {
        let step_ms = interval_ms(&query.interval)
            .ok_or_else(|| AppError::Validation(format!("unsupported interval: {}", query.interval)))?;
        let (start_time, end_time) = build_time_range(query.start, query.end, step_ms)?;
        let window = query.window.unwrap_or(self.config.default_window);
        let clusters = query.clusters.unwrap_or(self.config.default_clusters);

        let expected = (end_time - start_time) / step_ms;
        if expected > self.config.max_candles as u64 {
            tracing::warn!(
                "[{}] range spans {} {} candles, upstream returns at most {}",
                query.coin,
                expected,
                query.interval,
                self.config.max_candles
            );
        }

        let mut candles = self
            .source
            .fetch_range(&query.coin, &query.interval, start_time, end_time)
            .await
            .map_err(|error| {
                tracing::error!("[{}] candle fetch failed: {:#}", query.coin, error);
                AppError::Upstream(format!("{error:#}"))
            })?;

        if candles.is_empty() {
            return Err(LevelError::EmptyDataset.into());
        }
        normalize_candles(&mut candles, &query.coin, &query.interval);

        let recommended = self.config.recommended_max_window(candles.len());
        if window > recommended {
            tracing::warn!(
                "[{}] window {} exceeds recommended maximum {} for {} candles",
                query.coin,
                window,
                recommended,
                candles.len()
            );
        }

        // Ward clustering is quadratic in the wave count, keep it off the runtime workers
        let (candles, report) = tokio::task::spawn_blocking(move || {
            let report = analyze_levels(&candles, window, clusters);
            (candles, report)
        })
        .await
        .map_err(|error| AppError::Internal(format!("level computation failed: {error}")))?;
        let report = report?;
        let mut cluster_sizes = vec![0usize; clusters];
        for &label in &report.labels {
            cluster_sizes[label] += 1;
        }
        tracing::debug!("[{}] wave points per cluster: {:?}", query.coin, cluster_sizes);
        tracing::info!(
            "[{}] {} levels from {} candles ({} waves, window {}, clusters {})",
            query.coin,
            report.levels.len(),
            candles.len(),
            report.waves.len(),
            window,
            clusters
        );

        Ok(LevelAnalysis {
            as_of_ms: chrono::Utc::now().timestamp_millis() as u64,
            coin: query.coin.clone(),
            interval: query.interval.clone(),
            start: query.start,
            end: query.end,
            window,
            clusters,
            candles,
            wave_count: report.waves.len(),
            levels: report.levels,
        })
    }
}

/// Epoch-ms bounds for a date range; the end must clear the start by one interval
fn build_time_range(
    start: NaiveDate,
    end: NaiveDate,
    step_ms: u64,
) -> Result<(u64, u64), LevelError> {
    let start_ms = date_to_ms(start)?;
    let end_ms = date_to_ms(end)?;

    if end_ms < start_ms.saturating_add(step_ms) {
        return Err(LevelError::InvalidRange {
            start_ms,
            end_ms,
            step_ms,
        });
    }
    Ok((start_ms, end_ms))
}

fn date_to_ms(date: NaiveDate) -> Result<u64, LevelError> {
    let ms = date.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    u64::try_from(ms)
        .map_err(|_| LevelError::InvalidParameter(format!("date {date} is before 1970-01-01")))
}

/// Order by open time, drop repeated bars, fill missing interval/symbol
fn normalize_candles(candles: &mut Vec<Candle>, coin: &str, interval: &str) {
    candles.sort_by_key(|candle| candle.open_time);
    candles.dedup_by_key(|candle| candle.open_time);

    for candle in candles.iter_mut() {
        if candle.interval.is_none() {
            candle.interval = Some(interval.to_string());
        }
        if candle.symbol.is_none() {
            candle.symbol = Some(coin.to_string());
        }
    }
}
