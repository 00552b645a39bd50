//! Physical plan tree.
//!
//! Plans are built bottom-up: leaf constructors produce a plan, builder
//! methods consume it and wrap it in the next operator. The two-branch shape
//! of `Apply` is explicit — callers assemble the right branch (rooted in an
//! `Argument` leaf) separately and combine with [`PhysicalPlan::apply`].

use crate::expr::{Expression, Renamings};

/// A physical plan operator tree.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicalPlan {
    /// Scan every node in the graph, binding each to `var`.
    AllNodeScan { var: String },

    /// Leaf of a correlated right branch: yields the current outer row once.
    Argument { variables: Vec<String> },

    /// Follow outgoing edges from the node bound to `from`, binding each
    /// target to `to`.
    Expand {
        input: Box<PhysicalPlan>,
        from: String,
        rel_type: Option<String>,
        to: String,
    },

    /// Bind each named expression on every row.
    Projection {
        input: Box<PhysicalPlan>,
        projections: Vec<(String, Expression)>,
    },

    /// Order rows by the given sort items.
    Sort {
        input: Box<PhysicalPlan>,
        items: Vec<SortItem>,
    },

    /// Pass through at most `count` rows.
    Limit {
        input: Box<PhysicalPlan>,
        count: i64,
    },

    /// Correlated execution: re-run `right` once per row of `left`.
    Apply {
        left: Box<PhysicalPlan>,
        right: Box<PhysicalPlan>,
    },

    /// Fold the input down to a single row of aggregate values.
    Aggregation {
        input: Box<PhysicalPlan>,
        aggregations: Vec<AggregationSpec>,
    },

    /// Root operator: restrict rows to the named output columns.
    ProduceResults {
        input: Box<PhysicalPlan>,
        columns: Vec<String>,
    },
}

/// A single ORDER BY item.
#[derive(Debug, Clone, PartialEq)]
pub struct SortItem {
    pub expr: Expression,
    pub ascending: bool,
}

impl SortItem {
    /// Sort ascending by an expression.
    pub fn asc(expr: Expression) -> Self {
        Self {
            expr,
            ascending: true,
        }
    }

    /// Sort descending by an expression.
    pub fn desc(expr: Expression) -> Self {
        Self {
            expr,
            ascending: false,
        }
    }
}

/// Aggregate function kinds. Only the extrema are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationKind {
    Min,
    Max,
}

/// Specification for an aggregate computation.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationSpec {
    /// Output column name.
    pub name: String,
    /// Type of aggregate function.
    pub kind: AggregationKind,
    /// Expression to aggregate over.
    pub expr: Expression,
}

impl PhysicalPlan {
    /// Leaf: scan all nodes, binding each to `var`.
    pub fn all_node_scan(var: impl Into<String>) -> Self {
        PhysicalPlan::AllNodeScan { var: var.into() }
    }

    /// Leaf: argument row for the right branch of an Apply.
    pub fn argument(variables: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PhysicalPlan::Argument {
            variables: variables.into_iter().map(Into::into).collect(),
        }
    }

    /// Combine an outer (left) and a correlated inner (right) branch.
    pub fn apply(left: PhysicalPlan, right: PhysicalPlan) -> Self {
        PhysicalPlan::Apply {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Wrap in an expand step following outgoing edges.
    pub fn expand(
        self,
        from: impl Into<String>,
        rel_type: Option<&str>,
        to: impl Into<String>,
    ) -> Self {
        PhysicalPlan::Expand {
            input: Box::new(self),
            from: from.into(),
            rel_type: rel_type.map(str::to_string),
            to: to.into(),
        }
    }

    /// Wrap in a projection step.
    pub fn project(self, projections: Vec<(String, Expression)>) -> Self {
        PhysicalPlan::Projection {
            input: Box::new(self),
            projections,
        }
    }

    /// Wrap in a sort step.
    pub fn sort(self, items: Vec<SortItem>) -> Self {
        PhysicalPlan::Sort {
            input: Box::new(self),
            items,
        }
    }

    /// Wrap in a limit step.
    pub fn limit(self, count: i64) -> Self {
        PhysicalPlan::Limit {
            input: Box::new(self),
            count,
        }
    }

    /// Wrap in an aggregation step.
    pub fn aggregate(self, aggregations: Vec<AggregationSpec>) -> Self {
        PhysicalPlan::Aggregation {
            input: Box::new(self),
            aggregations,
        }
    }

    /// Wrap in the result-producing root.
    pub fn produce_results(self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        PhysicalPlan::ProduceResults {
            input: Box::new(self),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    /// Child plans of this operator.
    pub fn inputs(&self) -> Vec<&PhysicalPlan> {
        match self {
            PhysicalPlan::AllNodeScan { .. } | PhysicalPlan::Argument { .. } => Vec::new(),
            PhysicalPlan::Expand { input, .. }
            | PhysicalPlan::Projection { input, .. }
            | PhysicalPlan::Sort { input, .. }
            | PhysicalPlan::Limit { input, .. }
            | PhysicalPlan::Aggregation { input, .. }
            | PhysicalPlan::ProduceResults { input, .. } => vec![input],
            PhysicalPlan::Apply { left, right } => vec![left, right],
        }
    }
}

/// Collect the renamings contributed by projection stages in a plan subtree.
///
/// Inner (earlier) stages are recorded before outer ones, so the outermost
/// projection of a variable wins — matching what a downstream aggregation
/// actually observes.
pub fn renamings_below(plan: &PhysicalPlan) -> Renamings {
    let mut renamings = Renamings::new();
    collect_renamings(plan, &mut renamings);
    renamings
}

fn collect_renamings(plan: &PhysicalPlan, out: &mut Renamings) {
    for input in plan.inputs() {
        collect_renamings(input, out);
    }
    if let PhysicalPlan::Projection { projections, .. } = plan {
        for (name, expr) in projections {
            out.record(name.clone(), expr.clone());
        }
    }
}
