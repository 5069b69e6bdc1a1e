pub mod candle;
pub mod chart;
pub mod health;
pub mod levels;
