#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod scanner;

mod async_scan;
mod decompression;

pub use config::{BodyMode, DEFAULT_MAX_BODY_SIZE, ScanConfig, SignaturePolicy};
pub use error::ScanError;
pub use scanner::{MovieHeader, ScannedSwf, Scanner, scan};
