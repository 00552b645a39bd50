//! Trellis Exec
//!
//! Pull-based execution of physical plans.
//!
//! Responsibilities:
//! - Lower a physical plan to an operator tree
//! - Drive the pull protocol (open/next/close) row by row
//! - Evaluate plan expressions against rows
//! - Collect results under their output columns

mod cursor;
mod error;
mod eval;
mod executor;
mod operators;
mod result;
mod row;

pub use cursor::{InputStream, RowBuffer, SharedRowBuffer};
pub use error::{ExecError, ExecResult};
pub use eval::{compare_values, eval};
pub use executor::{build_operator, Executor};
pub use operators::{
    Aggregation, AllNodeScan, Apply, Argument, BoxedOperator, Expand, Limit, Operator,
    ProduceResults, Projection, Sort,
};
pub use result::QueryResults;
pub use row::Row;
