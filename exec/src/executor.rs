//! Plan lowering and execution.

use crate::error::ExecResult;
use crate::operators::{
    Aggregation, AllNodeScan, Apply, Argument, BoxedOperator, Expand, Limit, ProduceResults,
    Projection, Sort,
};
use crate::result::QueryResults;
use trellis_graph::Graph;
use trellis_plan::PhysicalPlan;

/// Lower a physical plan to its operator tree.
///
/// Exposed so tests (and embedders) can drive partial consumption and
/// re-opening directly instead of running a plan to completion.
pub fn build_operator(plan: &PhysicalPlan) -> BoxedOperator {
    match plan {
        PhysicalPlan::AllNodeScan { var } => Box::new(AllNodeScan::new(var.clone())),

        PhysicalPlan::Argument { variables } => Box::new(Argument::new(variables.clone())),

        PhysicalPlan::Expand {
            input,
            from,
            rel_type,
            to,
        } => Box::new(Expand::new(
            build_operator(input),
            from.clone(),
            rel_type.clone(),
            to.clone(),
        )),

        PhysicalPlan::Projection { input, projections } => {
            Box::new(Projection::new(build_operator(input), projections.clone()))
        }

        PhysicalPlan::Sort { input, items } => {
            Box::new(Sort::new(build_operator(input), items.clone()))
        }

        PhysicalPlan::Limit { input, count } => {
            Box::new(Limit::new(build_operator(input), *count))
        }

        PhysicalPlan::Apply { left, right } => {
            Box::new(Apply::new(build_operator(left), build_operator(right)))
        }

        PhysicalPlan::Aggregation {
            input,
            aggregations,
        } => Box::new(Aggregation::new(
            build_operator(input),
            aggregations.clone(),
        )),

        PhysicalPlan::ProduceResults { input, columns } => {
            Box::new(ProduceResults::new(build_operator(input), columns.clone()))
        }
    }
}

/// Query executor: runs physical plans against a graph.
pub struct Executor<'g> {
    graph: &'g Graph,
}

impl<'g> Executor<'g> {
    /// Create a new executor.
    pub fn new(graph: &'g Graph) -> Self {
        Self { graph }
    }

    /// Execute a plan to completion and collect its output rows.
    pub fn execute(&self, plan: &PhysicalPlan) -> ExecResult<QueryResults> {
        let mut root = build_operator(plan);
        root.open(None)?;

        let mut results = QueryResults::with_columns(declared_columns(plan));
        while let Some(row) = root.next(self.graph)? {
            results.push(row);
        }
        root.close();

        Ok(results)
    }
}

/// Output columns declared by the plan root, if any.
fn declared_columns(plan: &PhysicalPlan) -> Vec<String> {
    match plan {
        PhysicalPlan::ProduceResults { columns, .. } => columns.clone(),
        _ => Vec::new(),
    }
}
