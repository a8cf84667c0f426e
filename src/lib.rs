//! `car-curves` library crate.
//!
//! The binary (`carval`) is a thin wrapper around this library so that:
//!
//! - the clean -> fit -> evaluate/rank core is testable without spawning processes
//! - a scraper or interactive front end can call the same pipeline in-process
//! - no state outlives a session, so repeated queries are independent

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;

pub use app::pipeline::{SessionOutput, run_ranking, run_session};
pub use domain::{
    CleanListing, Dataset, EvalConfig, EvaluationResult, KnotPolicy, MonotoneGuard, OfferQuery, RankedOffer,
    RawField, RawListing, Verdict,
};
pub use error::{AppError, EvalError, EvalResult};
pub use fit::{FitOutput, fit};
pub use io::{clean, filter_outliers};
pub use models::TrainedModel;
pub use report::{evaluate, rank};
