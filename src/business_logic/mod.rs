pub mod clustering;
pub mod config;
pub mod indicators;
pub mod levels;
pub mod waves;
