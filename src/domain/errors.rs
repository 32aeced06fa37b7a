#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    InvalidLeftMatrix,
    InvalidRightMatrix,
    InvalidLeftAndRightMatrix,
    InvalidDimensions,
    InvalidExpression {
        row: usize,
        col: usize,
        input: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidLeftMatrix => {
                write!(f, "Invalid Left Matrix")
            }
            DomainError::InvalidRightMatrix => {
                write!(f, "Invalid Right Matrix")
            }
            DomainError::InvalidLeftAndRightMatrix => {
                write!(f, "Invalid Left and Right Matrix")
            }
            DomainError::InvalidDimensions => {
                write!(f, "Invalid Matrix Dimensions!")
            }
            DomainError::InvalidExpression { row, col, input } => {
                write!(f, "Invalid Expression '{}' at ({},{})", input, row + 1, col + 1)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_strings() {
        assert_eq!(DomainError::InvalidLeftMatrix.to_string(), "Invalid Left Matrix");
        assert_eq!(DomainError::InvalidRightMatrix.to_string(), "Invalid Right Matrix");
        assert_eq!(
            DomainError::InvalidLeftAndRightMatrix.to_string(),
            "Invalid Left and Right Matrix"
        );
        assert_eq!(DomainError::InvalidDimensions.to_string(), "Invalid Matrix Dimensions!");
    }

    #[test]
    fn test_expression_error_is_one_indexed() {
        let err = DomainError::InvalidExpression {
            row: 0,
            col: 2,
            input: "2+".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid Expression '2+' at (1,3)");
    }
}
