use std::future::Future;

use anyhow::Context;
use serde::Serialize;

use crate::models::candle::Candle;

pub const HYPERLIQUID_API_URL: &str = "https://api.hyperliquid.xyz/info";

/// Anything that can serve a candle range for a coin
pub trait CandleSource: Send + Sync {
    fn fetch_range(
        &self,
        coin: &str,
        interval: &str,
        start_time: u64,
        end_time: u64,
    ) -> impl Future<Output = anyhow::Result<Vec<Candle>>> + Send;
}

#[derive(Debug, Serialize)]
struct CandleRequest {
    #[serde(rename = "type")]
    request_type: String,
    req: CandleRequestInner,
}

#[derive(Debug, Serialize)]
struct CandleRequestInner {
    coin: String,
    interval: String,
    #[serde(rename = "startTime")]
    start_time: u64,
    #[serde(rename = "endTime")]
    end_time: u64,
}

impl CandleRequest {
    fn snapshot(coin: &str, interval: &str, start_time: u64, end_time: u64) -> Self {
        Self {
            request_type: "candleSnapshot".to_string(),
            req: CandleRequestInner {
                coin: coin.to_string(),
                interval: interval.to_string(),
                start_time,
                end_time,
            },
        }
    }
}

#[derive(Clone)]
pub struct HyperliquidClient {
    client: reqwest::Client,
    api_url: String,
}

impl HyperliquidClient {
    pub fn new() -> Self {
        Self::with_url(HYPERLIQUID_API_URL)
    }

    pub fn with_url(api_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Fetch candles for a coin within a time range
    pub async fn fetch_candles(
        &self,
        coin: &str,
        interval: &str,
        start_time: u64,
        end_time: u64,
    ) -> Result<Vec<Candle>, reqwest::Error> {
        let request = CandleRequest::snapshot(coin, interval, start_time, end_time);

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Candle>>()
            .await?;

        Ok(response)
    }
}

impl Default for HyperliquidClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CandleSource for HyperliquidClient {
    async fn fetch_range(
        &self,
        coin: &str,
        interval: &str,
        start_time: u64,
        end_time: u64,
    ) -> anyhow::Result<Vec<Candle>> {
        self.fetch_candles(coin, interval, start_time, end_time)
            .await
            .with_context(|| format!("failed to fetch {interval} candles for {coin}"))
    }
}
