pub mod hyperliquid;
pub mod levels;
