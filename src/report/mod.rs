//! Evaluation, ranking, and formatted output.

pub mod evaluate;
pub mod format;
pub mod rank;

pub use evaluate::*;
pub use format::*;
pub use rank::*;
