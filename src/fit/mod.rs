//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - split listings into training and validation portions (seeded)
//! - choose a knot plan for the training data
//! - fit the spline by least squares, with a monotone shape guardrail
//! - estimate the held-out MAE

pub mod fitter;
pub mod knots;
pub mod selection;
pub mod split;

pub use fitter::*;
pub use knots::*;
pub use selection::*;
pub use split::*;
