//! Input helpers.
//!
//! - scraped-record cleaning (`ingest`)
//! - IQR outlier trimming (`outliers`)
//! - listings JSON reading (`listings`)

pub mod ingest;
pub mod listings;
pub mod outliers;

pub use ingest::*;
pub use listings::*;
pub use outliers::*;
