pub mod add;
pub mod config;
pub mod datum;
pub mod db;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod week;
