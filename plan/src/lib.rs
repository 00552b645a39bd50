//! Trellis Plan
//!
//! Planner-side representation of queries:
//! - Plan-level expression IR and variable renaming context
//! - Extremum (min/max) property pattern resolution and classification
//! - Physical plan tree with a bottom-up builder
//! - Rewrite of recognizable extremum aggregations into top-1 sort plans

mod expr;
mod plan;
mod resolve;
mod rewrite;

pub use expr::{Expression, Renamings};
pub use plan::{renamings_below, AggregationKind, AggregationSpec, PhysicalPlan, SortItem};
pub use resolve::{classify_extremum, resolve_property_anchor};
pub use rewrite::plan_extremum_aggregation;
