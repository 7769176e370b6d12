//! Builder functions for constructing linear expressions.

use crate::expr::core::Expr;
use crate::expr::error::LinearExprError;
use crate::ids::VariableId;

/// Inner product of a coefficient vector with a variable vector.
///
/// This is the workhorse for objective and constraint rows: revenue is
/// `weighted_sum(price, planted)` and a resource row is
/// `weighted_sum(requirement_row, planted)`. Zero coefficients are dropped.
///
/// Returns an error if the two slices differ in length.
pub fn weighted_sum(
    coefficients: &[f64],
    variables: &[VariableId],
) -> Result<Expr, LinearExprError> {
    if coefficients.len() != variables.len() {
        return Err(LinearExprError::MismatchedLengths);
    }
    let terms: Vec<_> = variables
        .iter()
        .copied()
        .zip(coefficients.iter().copied())
        .filter(|(_, c)| *c != 0.0)
        .collect();
    Ok(Expr::from_terms(terms))
}

/// Combine multiple expressions by concatenating their linear terms.
///
/// Duplicate variable terms are NOT merged; use `normalized_terms()` on the
/// result if consolidation is needed. Constants are summed.
pub fn linear_sum(exprs: Vec<Expr>) -> Expr {
    let mut terms = Vec::new();
    let mut constant = 0.0;
    for expr in exprs {
        let (expr_terms, expr_constant) = expr.into_parts();
        terms.extend(expr_terms);
        constant += expr_constant;
    }
    Expr::new(terms, constant)
}
