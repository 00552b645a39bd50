//! Physical operators (pull-based iterator model).
//!
//! Every operator implements the same protocol: `open` prepares the operator
//! (optionally seeding it with the current outer row), `next` produces at
//! most one row per call, `close` releases per-invocation state. Re-opening
//! is a full reset — Apply drives its right branch through repeated
//! `open`/`next`/`close` cycles, once per outer row.
//!
//! Operators never pull ahead of demand. In particular, an operator that can
//! answer `next` from its own state (a spent Limit, a buffered Sort) must
//! not touch its input.

use crate::error::{ExecError, ExecResult};
use crate::eval::{compare_values, eval};
use crate::row::Row;
use trellis_core::{EdgeId, NodeId, Value};
use trellis_graph::Graph;
use trellis_plan::{AggregationKind, AggregationSpec, Expression, SortItem};

/// The pull protocol all operators implement.
pub trait Operator {
    /// Prepare for iteration. `seed` carries the current outer row when the
    /// operator runs inside the right branch of an Apply. May be called
    /// again at any time; re-opening resets all iteration state.
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()>;

    /// Produce the next row, or `None` at end of data.
    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>>;

    /// Release per-invocation state. Idempotent.
    fn close(&mut self);
}

/// Type alias for boxed operators.
pub type BoxedOperator = Box<dyn Operator>;

// ==================== AllNodeScan ====================

/// Scan every node in the graph, binding each to `var`.
///
/// Node ids are captured lazily on the first `next` after open; rows are
/// built on demand, extending the seed row.
pub struct AllNodeScan {
    var: String,
    seed: Row,
    ids: Option<Vec<NodeId>>,
    pos: usize,
}

impl AllNodeScan {
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            seed: Row::new(),
            ids: None,
            pos: 0,
        }
    }
}

impl Operator for AllNodeScan {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.seed = seed.cloned().unwrap_or_default();
        self.ids = None;
        self.pos = 0;
        Ok(())
    }

    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>> {
        let ids = self
            .ids
            .get_or_insert_with(|| graph.all_nodes().collect());
        if self.pos >= ids.len() {
            return Ok(None);
        }
        let id = ids[self.pos];
        self.pos += 1;
        Ok(Some(self.seed.extend_with(&self.var, Value::NodeRef(id))))
    }

    fn close(&mut self) {
        self.ids = None;
        self.pos = 0;
    }
}

// ==================== Argument ====================

/// Yield the seed row exactly once per open.
///
/// This is the leaf of a correlated right branch: Apply opens it (through
/// the operators above it) with the current outer row, and the branch sees
/// that row as its sole input. With an explicit variable list, only those
/// bindings are exposed; an empty list exposes the whole outer row.
pub struct Argument {
    variables: Vec<String>,
    seed: Row,
    consumed: bool,
}

impl Argument {
    pub fn new(variables: Vec<String>) -> Self {
        Self {
            variables,
            seed: Row::new(),
            consumed: false,
        }
    }
}

impl Operator for Argument {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.seed = match seed {
            Some(row) if self.variables.is_empty() => row.clone(),
            Some(row) => self
                .variables
                .iter()
                .filter_map(|var| row.get(var).map(|v| (var.clone(), v.clone())))
                .collect(),
            None => Row::new(),
        };
        self.consumed = false;
        Ok(())
    }

    fn next(&mut self, _graph: &Graph) -> ExecResult<Option<Row>> {
        if self.consumed {
            return Ok(None);
        }
        self.consumed = true;
        Ok(Some(self.seed.clone()))
    }

    fn close(&mut self) {
        self.consumed = true;
    }
}

// ==================== Expand ====================

/// Follow outgoing edges from the node bound to `from`, binding each target
/// to `to`.
pub struct Expand {
    input: BoxedOperator,
    from: String,
    rel_type: Option<String>,
    to: String,
    current: Option<Row>,
    edges: Vec<EdgeId>,
    pos: usize,
}

impl Expand {
    pub fn new(
        input: BoxedOperator,
        from: impl Into<String>,
        rel_type: Option<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            input,
            from: from.into(),
            rel_type,
            to: to.into(),
            current: None,
            edges: Vec::new(),
            pos: 0,
        }
    }
}

impl Operator for Expand {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.current = None;
        self.edges.clear();
        self.pos = 0;
        self.input.open(seed)
    }

    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>> {
        loop {
            if let Some(row) = &self.current {
                while self.pos < self.edges.len() {
                    let edge_id = self.edges[self.pos];
                    self.pos += 1;
                    if let Some(edge) = graph.get_edge(edge_id) {
                        return Ok(Some(
                            row.extend_with(&self.to, Value::NodeRef(edge.target)),
                        ));
                    }
                }
                self.current = None;
            }

            match self.input.next(graph)? {
                Some(row) => {
                    let bound = row
                        .get(&self.from)
                        .ok_or_else(|| ExecError::unbound_variable(&self.from))?;
                    let node = bound
                        .as_node_ref()
                        .ok_or_else(|| ExecError::not_a_node(&self.from))?;
                    self.edges = graph.edges_from(node, self.rel_type.as_deref()).collect();
                    self.pos = 0;
                    self.current = Some(row);
                }
                None => return Ok(None),
            }
        }
    }

    fn close(&mut self) {
        self.current = None;
        self.edges.clear();
        self.pos = 0;
        self.input.close();
    }
}

// ==================== Limit ====================

/// Pass through at most `count` rows.
///
/// The bound is re-armed on every open, so a Limit inside the right branch
/// of an Apply is enforced per outer row, not globally. A spent Limit
/// answers end-of-data from its own state without pulling its input — rows
/// the consumer never asked for stay wherever they were.
pub struct Limit {
    input: BoxedOperator,
    count: i64,
    remaining: u64,
    exhausted: bool,
}

impl Limit {
    pub fn new(input: BoxedOperator, count: i64) -> Self {
        Self {
            input,
            // Negative bounds clamp to zero rows, not "no limit".
            remaining: count.max(0) as u64,
            exhausted: false,
            count,
        }
    }
}

impl Operator for Limit {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.remaining = self.count.max(0) as u64;
        self.exhausted = false;
        self.input.open(seed)
    }

    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>> {
        if self.exhausted || self.remaining == 0 {
            return Ok(None);
        }
        match self.input.next(graph)? {
            Some(row) => {
                self.remaining -= 1;
                Ok(Some(row))
            }
            None => {
                self.exhausted = true;
                Ok(None)
            }
        }
    }

    fn close(&mut self) {
        self.input.close();
    }
}

// ==================== Sort ====================

/// Order rows by the given sort items.
///
/// Materializes its input on the first `next` after open, then streams the
/// buffer. Under an Apply this scopes the ordering to one inner invocation:
/// each re-open starts an empty buffer.
pub struct Sort {
    input: BoxedOperator,
    items: Vec<SortItem>,
    buffer: Vec<Row>,
    pos: usize,
    loaded: bool,
}

impl Sort {
    pub fn new(input: BoxedOperator, items: Vec<SortItem>) -> Self {
        Self {
            input,
            items,
            buffer: Vec::new(),
            pos: 0,
            loaded: false,
        }
    }
}

impl Operator for Sort {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.buffer.clear();
        self.pos = 0;
        self.loaded = false;
        self.input.open(seed)
    }

    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>> {
        if !self.loaded {
            while let Some(row) = self.input.next(graph)? {
                self.buffer.push(row);
            }
            let items = &self.items;
            self.buffer.sort_by(|a, b| {
                for item in items {
                    let a_val = eval(&item.expr, a, graph).ok();
                    let b_val = eval(&item.expr, b, graph).ok();
                    let cmp = compare_values(&a_val, &b_val);
                    if cmp != std::cmp::Ordering::Equal {
                        return if item.ascending { cmp } else { cmp.reverse() };
                    }
                }
                std::cmp::Ordering::Equal
            });
            self.loaded = true;
        }

        if self.pos >= self.buffer.len() {
            return Ok(None);
        }
        let row = self.buffer[self.pos].clone();
        self.pos += 1;
        Ok(Some(row))
    }

    fn close(&mut self) {
        self.buffer.clear();
        self.pos = 0;
        self.loaded = false;
        self.input.close();
    }
}

// ==================== Apply ====================

/// Correlated nested execution.
///
/// For each row of the left branch the right branch is re-opened, seeded
/// with that row, and drained before the next left row is pulled. Rows are
/// emitted in outer-row order; ordering inside one inner invocation is
/// whatever the right branch produces for that row alone.
pub struct Apply {
    left: BoxedOperator,
    right: BoxedOperator,
    outer: Option<Row>,
}

impl Apply {
    pub fn new(left: BoxedOperator, right: BoxedOperator) -> Self {
        Self {
            left,
            right,
            outer: None,
        }
    }
}

impl Operator for Apply {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.outer = None;
        self.left.open(seed)
    }

    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>> {
        loop {
            if self.outer.is_some() {
                if let Some(row) = self.right.next(graph)? {
                    return Ok(Some(row));
                }
                self.right.close();
                self.outer = None;
            }

            match self.left.next(graph)? {
                Some(row) => {
                    self.right.open(Some(&row))?;
                    self.outer = Some(row);
                }
                None => return Ok(None),
            }
        }
    }

    fn close(&mut self) {
        self.outer = None;
        self.right.close();
        self.left.close();
    }
}

// ==================== Projection ====================

/// Bind each named expression on every row.
///
/// Existing bindings stay in place, so variables introduced here coexist
/// with the ones downstream operators still need.
pub struct Projection {
    input: BoxedOperator,
    projections: Vec<(String, Expression)>,
}

impl Projection {
    pub fn new(input: BoxedOperator, projections: Vec<(String, Expression)>) -> Self {
        Self { input, projections }
    }
}

impl Operator for Projection {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.input.open(seed)
    }

    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>> {
        match self.input.next(graph)? {
            Some(row) => {
                let mut out = row.clone();
                for (name, expr) in &self.projections {
                    out.set(name.clone(), eval(expr, &row, graph)?);
                }
                Ok(Some(out))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.input.close();
    }
}

// ==================== Aggregation ====================

/// Fold the input down to a single row of extremum values.
pub struct Aggregation {
    input: BoxedOperator,
    aggregations: Vec<AggregationSpec>,
    done: bool,
}

impl Aggregation {
    pub fn new(input: BoxedOperator, aggregations: Vec<AggregationSpec>) -> Self {
        Self {
            input,
            aggregations,
            done: false,
        }
    }
}

impl Operator for Aggregation {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.done = false;
        self.input.open(seed)
    }

    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>> {
        if self.done {
            return Ok(None);
        }

        let mut rows = Vec::new();
        while let Some(row) = self.input.next(graph)? {
            rows.push(row);
        }

        let mut out = Row::new();
        for spec in &self.aggregations {
            let target_order = match spec.kind {
                AggregationKind::Min => std::cmp::Ordering::Less,
                AggregationKind::Max => std::cmp::Ordering::Greater,
            };
            let mut best: Option<Value> = None;
            for row in &rows {
                if let Ok(val) = eval(&spec.expr, row, graph) {
                    if !val.is_null() {
                        best = Some(match best {
                            None => val,
                            Some(current) => {
                                if val.cmp_sortable(&current) == target_order {
                                    val
                                } else {
                                    current
                                }
                            }
                        });
                    }
                }
            }
            out.set(spec.name.clone(), best.unwrap_or(Value::Null));
        }

        self.done = true;
        Ok(Some(out))
    }

    fn close(&mut self) {
        self.done = false;
        self.input.close();
    }
}

// ==================== ProduceResults ====================

/// Pipeline root: restrict each row to the named output columns.
pub struct ProduceResults {
    input: BoxedOperator,
    columns: Vec<String>,
}

impl ProduceResults {
    pub fn new(input: BoxedOperator, columns: Vec<String>) -> Self {
        Self { input, columns }
    }
}

impl Operator for ProduceResults {
    fn open(&mut self, seed: Option<&Row>) -> ExecResult<()> {
        self.input.open(seed)
    }

    fn next(&mut self, graph: &Graph) -> ExecResult<Option<Row>> {
        match self.input.next(graph)? {
            Some(row) => {
                let mut out = Row::new();
                for column in &self.columns {
                    let value = row
                        .get(column)
                        .cloned()
                        .ok_or_else(|| ExecError::unknown_column(column))?;
                    out.set(column.clone(), value);
                }
                Ok(Some(out))
            }
            None => Ok(None),
        }
    }

    fn close(&mut self) {
        self.input.close();
    }
}
