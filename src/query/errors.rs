//! # Query Errors
//!
//! Error types for query parsing.
//!
//! Parsing a JSON filter into the typed AST is the only fallible surface
//! of the engine. Evaluation itself is total: operand-type mismatches and
//! non-traversable paths resolve to "no match", never to an error.

use thiserror::Error;

/// Result type for query parsing
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors produced while parsing a JSON query into the typed AST
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// Operator key is not part of the supported operator set
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Operator argument has the wrong shape
    #[error("{operator} requires {expected}")]
    InvalidOperand {
        /// Operator name as written in the query
        operator: &'static str,
        /// Description of the expected argument shape
        expected: &'static str,
    },

    /// Filter is neither an object, an array of objects, nor null
    #[error("Filter must be an object or an array of objects")]
    InvalidFilter,

    /// Query envelope is not an object
    #[error("Query must be an object")]
    InvalidQuery,

    /// Sort direction is neither "asc" nor "desc"
    #[error("Invalid sort direction for {path}: {value}")]
    InvalidSortDirection {
        /// Sort key the direction was attached to
        path: String,
        /// Offending direction value
        value: String,
    },
}

impl QueryError {
    /// Create an invalid-operand error
    pub fn invalid_operand(operator: &'static str, expected: &'static str) -> Self {
        Self::InvalidOperand { operator, expected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::UnknownOperator("$fuzzy".into());
        assert_eq!(format!("{}", err), "Unknown operator: $fuzzy");

        let err = QueryError::invalid_operand("$in", "an array");
        assert_eq!(format!("{}", err), "$in requires an array");
    }
}
