// ⚠️ Error Taxonomy
// Fatal run errors vs. recoverable row errors

use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// FATAL ERRORS (halt the run)
// ============================================================================

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Input file '{}' not found", path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to read input file '{}': {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Failed to write output file '{}': {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Delimiter {0:?} is not a single ASCII character")]
    InvalidDelimiter(char),

    #[error("Product {id} reached the loader without a price range")]
    Untransformed { id: i32 },
}

impl EtlError {
    /// Actionable follow-up shown to the operator under the error message
    pub fn hint(&self) -> &'static str {
        match self {
            EtlError::InputNotFound { .. } => {
                "Please ensure the input file exists in the data/ directory."
            }
            EtlError::InputRead { .. } => "Check that the input file is readable and not locked.",
            EtlError::OutputWrite { .. } => {
                "Check permissions and free space for the output directory."
            }
            EtlError::InvalidDelimiter(_) => "Set \"delimiter\" to a single ASCII character.",
            EtlError::Untransformed { .. } => "This is a bug: every product must be transformed before loading.",
        }
    }

    /// True for errors raised while reading the input
    pub fn is_input_error(&self) -> bool {
        matches!(self, EtlError::InputNotFound { .. } | EtlError::InputRead { .. })
    }
}

// ============================================================================
// ROW ERRORS (row is skipped, run continues)
// ============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RowError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid product id {0:?}")]
    InvalidId(String),

    #[error("invalid price {0:?}")]
    InvalidPrice(String),

    #[error("empty {0} field")]
    EmptyField(&'static str),

    #[error("row is not valid UTF-8")]
    InvalidEncoding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_classified() {
        let missing = EtlError::InputNotFound {
            path: PathBuf::from("data/products.csv"),
        };
        assert!(missing.is_input_error());
        assert_eq!(
            missing.to_string(),
            "Input file 'data/products.csv' not found"
        );

        let output = EtlError::OutputWrite {
            path: PathBuf::from("out.csv"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!output.is_input_error());
        assert!(output.hint().contains("permissions"));
    }

    #[test]
    fn test_row_error_messages() {
        let err = RowError::FieldCount {
            expected: 4,
            found: 3,
        };
        assert_eq!(err.to_string(), "expected 4 fields, found 3");
        assert_eq!(
            RowError::InvalidId("abc".to_string()).to_string(),
            "invalid product id \"abc\""
        );
    }
}
