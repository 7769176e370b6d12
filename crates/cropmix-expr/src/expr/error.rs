//! Expression construction errors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinearExprError {
    MismatchedLengths,
}

impl LinearExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            LinearExprError::MismatchedLengths => "EXPR_MISMATCHED_LENGTHS",
        }
    }

    fn detail(&self) -> &'static str {
        match self {
            LinearExprError::MismatchedLengths => {
                "coefficients and variables must have the same length"
            }
        }
    }
}

impl std::fmt::Display for LinearExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.detail())
    }
}

impl std::error::Error for LinearExprError {}
