//! Linear expression building.

mod builders;
mod constraint;
mod core;
mod error;

pub use builders::{linear_sum, weighted_sum};
pub use constraint::{ComparisonSense, ConstraintExpr};
pub use core::Expr;
pub use error::LinearExprError;
