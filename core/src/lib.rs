pub mod action;
pub mod config;
pub mod console;
pub mod report;
pub mod storage;
pub mod style;
pub mod testing;

pub use crate::config::Config;
