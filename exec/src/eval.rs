//! Row-level expression evaluation.

use crate::error::{ExecError, ExecResult};
use crate::row::Row;
use trellis_core::Value;
use trellis_graph::Graph;
use trellis_plan::Expression;

/// Evaluate a plan expression against a row.
///
/// Only the shapes operators actually need are supported: variable lookups
/// and property accesses on node bindings. Function invocations never reach
/// the row-level evaluator — aggregates are folded by their operator and the
/// general function library is an external collaborator.
pub fn eval(expr: &Expression, row: &Row, graph: &Graph) -> ExecResult<Value> {
    match expr {
        Expression::Variable(name) => row
            .get(name)
            .cloned()
            .ok_or_else(|| ExecError::unbound_variable(name)),

        Expression::Property { base, key } => {
            let bound = row
                .get(base)
                .ok_or_else(|| ExecError::unbound_variable(base))?;
            let node_id = bound
                .as_node_ref()
                .ok_or_else(|| ExecError::not_a_node(base))?;
            Ok(graph
                .get_node(node_id)
                .and_then(|node| node.get_property(key))
                .cloned()
                .unwrap_or(Value::Null))
        }

        Expression::Function { name, .. } => Err(ExecError::unsupported_expression(format!(
            "function {}()",
            name
        ))),
    }
}

/// Compare two optional values for sorting.
pub fn compare_values(a: &Option<Value>, b: &Option<Value>) -> std::cmp::Ordering {
    match (a, b) {
        (None, None) => std::cmp::Ordering::Equal,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        (Some(a), Some(b)) => a.cmp_sortable(b),
    }
}
