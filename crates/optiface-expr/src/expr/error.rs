//! Expression construction errors.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// Parallel coefficient/variable slices differ in length.
    MismatchedLengths { variables: usize, coefficients: usize },
    /// A quadratic expression was used where an affine one is required.
    NotAffine,
}

impl ExprError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ExprError::MismatchedLengths { .. } => "EXPR_MISMATCHED_LENGTHS",
            ExprError::NotAffine => "EXPR_NOT_AFFINE",
        }
    }
}

impl std::fmt::Display for ExprError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExprError::MismatchedLengths {
                variables,
                coefficients,
            } => write!(
                f,
                "[{}] variables ({}) and coefficients ({}) must have the same length",
                self.code(),
                variables,
                coefficients
            ),
            ExprError::NotAffine => write!(
                f,
                "[{}] expression has quadratic terms and cannot be used as an affine function",
                self.code()
            ),
        }
    }
}

impl std::error::Error for ExprError {}

#[cfg(test)]
mod tests {
    use super::ExprError;

    #[test]
    fn error_code_is_stable() {
        assert_eq!(
            ExprError::MismatchedLengths {
                variables: 1,
                coefficients: 2
            }
            .code(),
            "EXPR_MISMATCHED_LENGTHS"
        );
        assert_eq!(ExprError::NotAffine.code(), "EXPR_NOT_AFFINE");
    }

    #[test]
    fn display_prefixes_error_code() {
        let rendered = ExprError::NotAffine.to_string();
        assert!(rendered.starts_with("[EXPR_NOT_AFFINE]"));
    }
}
