//! Fitted model representation.
//!
//! Kept separate from the fitting code so the evaluator and ranker depend
//! only on `TrainedModel::predict`.

pub mod model;

pub use model::*;
