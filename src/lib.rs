pub mod cli;
pub mod config;
pub mod error;
pub mod prune;
pub mod storage;
pub mod utils;
