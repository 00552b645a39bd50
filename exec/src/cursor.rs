//! The upstream row-producer boundary.
//!
//! External callers feed rows into a pipeline through a [`RowBuffer`]. The
//! buffer is shared: the pipeline pulls through an [`InputStream`] operator
//! while the caller keeps its own handle, so it can observe how much of the
//! input was actually consumed. Operators never pull ahead of demand —
//! whatever a bounded pipeline leaves behind stays in the buffer and
//! [`RowBuffer::has_more`] keeps reporting it.

use crate::error::ExecResult;
use crate::operators::Operator;
use crate::row::Row;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use trellis_graph::Graph;

/// A FIFO buffer of rows awaiting consumption.
#[derive(Debug, Default)]
pub struct RowBuffer {
    rows: VecDeque<Row>,
}

/// Shared handle to a [`RowBuffer`].
pub type SharedRowBuffer = Rc<RefCell<RowBuffer>>;

impl RowBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a shared buffer pre-filled with rows.
    pub fn shared(rows: impl IntoIterator<Item = Row>) -> SharedRowBuffer {
        Rc::new(RefCell::new(Self {
            rows: rows.into_iter().collect(),
        }))
    }

    /// Append a row.
    pub fn push(&mut self, row: Row) {
        self.rows.push_back(row);
    }

    /// True iff at least one more row is available without having been
    /// pulled.
    pub fn has_more(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Pull the next row, if any.
    pub fn pull(&mut self) -> Option<Row> {
        self.rows.pop_front()
    }

    /// Number of rows still buffered.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the buffer is drained.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Leaf operator adapting a shared [`RowBuffer`] into the pipeline.
///
/// Each `next` pulls exactly one row from the buffer. The seed row is
/// ignored — externally fed input is uncorrelated.
pub struct InputStream {
    source: SharedRowBuffer,
}

impl InputStream {
    /// Create an input stream over a shared buffer.
    pub fn new(source: SharedRowBuffer) -> Self {
        Self { source }
    }
}

impl Operator for InputStream {
    fn open(&mut self, _seed: Option<&Row>) -> ExecResult<()> {
        Ok(())
    }

    fn next(&mut self, _graph: &Graph) -> ExecResult<Option<Row>> {
        Ok(self.source.borrow_mut().pull())
    }

    fn close(&mut self) {}
}
