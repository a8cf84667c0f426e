//! Input data sources that stand in for the scraper.

pub mod sample;

pub use sample::*;
