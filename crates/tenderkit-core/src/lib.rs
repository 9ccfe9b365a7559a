//! TenderKit Core — error taxonomy and data directory configuration.

pub mod config;
pub mod error;

pub use config::DataPaths;
pub use error::{Error, Result};
