use crate::common::config::Oid;
use thiserror::Error;

/// Failures surfaced while building and initializing executor trees.
/// Execution-time failures (conflicts, storage exhaustion) do not travel as
/// errors; they set the transaction result to Failure, and the orchestrator
/// turns that into commit vs abort.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutorError {
    #[error("executor initialization failed: {0}")]
    InitializationFailure(String),
    #[error("expression evaluation failed: {0}")]
    Expression(#[from] ExpressionError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpressionError {
    #[error("column index {index} out of bounds for tuple with {column_count} columns")]
    ColumnOutOfBounds { index: usize, column_count: usize },
    #[error("parameter index {index} out of bounds, {param_count} parameters bound")]
    ParameterOutOfBounds { index: usize, param_count: usize },
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("table {0} already exists")]
    TableAlreadyExists(String),
    #[error("table {0} not found")]
    TableNotFound(String),
    #[error("table oid {0} not found")]
    TableOidNotFound(Oid),
    #[error("index {0} already exists on table {1}")]
    IndexAlreadyExists(String, String),
}
