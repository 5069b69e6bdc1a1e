/// Defaults and limits for level detection requests
#[derive(Debug, Clone)]
pub struct LevelsConfig {
    /// Rolling wave length used when the request omits it
    pub default_window: usize,
    /// Number of clusters used when the request omits it
    pub default_clusters: usize,
    /// Most candles a single snapshot may return
    pub max_candles: usize,
    /// Window lengths above `candles / window_divisor` are logged as suspicious
    pub window_divisor: usize,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            default_window: 1,
            default_clusters: 3,
            max_candles: 5000,
            window_divisor: 5,
        }
    }
}

impl LevelsConfig {
    /// Largest window that still leaves a handful of waves per cluster
    pub fn recommended_max_window(&self, candle_count: usize) -> usize {
        (candle_count / self.window_divisor.max(1)).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommended_max_window_is_a_fifth_of_history() {
        let config = LevelsConfig::default();
        assert_eq!(config.recommended_max_window(100), 20);
        assert_eq!(config.recommended_max_window(3), 1);
    }
}
