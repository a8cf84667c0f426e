//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - untrusted scraper input (`RawListing`, `RawField`)
//! - validated observations (`CleanListing`, `Dataset`)
//! - evaluation outputs (`EvaluationResult`, `RankedOffer`, `Verdict`)
//! - session tunables (`EvalConfig`)

pub mod types;

pub use types::*;
