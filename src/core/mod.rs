pub mod add;
pub mod calculator;
pub mod config;
pub mod datum;
pub mod export;
pub mod list;
pub mod log;
pub mod week;
