//! Execution error types.

use thiserror::Error;

/// Result type for execution operations.
pub type ExecResult<T> = Result<T, ExecError>;

/// Errors that can occur while driving an operator pipeline.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Unbound variable: {var}")]
    UnboundVariable { var: String },

    #[error("Variable {var} is not bound to a node")]
    NotANode { var: String },

    #[error("Unknown column: {column}")]
    UnknownColumn { column: String },

    #[error("Unsupported expression: {detail}")]
    UnsupportedExpression { detail: String },
}

impl ExecError {
    pub fn unbound_variable(var: impl Into<String>) -> Self {
        Self::UnboundVariable { var: var.into() }
    }

    pub fn not_a_node(var: impl Into<String>) -> Self {
        Self::NotANode { var: var.into() }
    }

    pub fn unknown_column(column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            column: column.into(),
        }
    }

    pub fn unsupported_expression(detail: impl Into<String>) -> Self {
        Self::UnsupportedExpression {
            detail: detail.into(),
        }
    }
}
