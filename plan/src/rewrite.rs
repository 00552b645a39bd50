//! Extremum aggregation planning.
//!
//! `min(..)` sorts ascending, `max(..)` descending; either way only the
//! first row matters. When the aggregation argument resolves to a property
//! pattern the whole aggregation collapses into Sort + Limit(1) + a
//! projection of the argument under the output name. Arguments the resolver
//! does not recognize fall back to a general aggregation node.

use crate::expr::Expression;
use crate::plan::{renamings_below, AggregationKind, AggregationSpec, PhysicalPlan, SortItem};
use crate::resolve::classify_extremum;

/// Plan a `min`/`max` aggregation call over `input`.
///
/// Returns the top-1 sort plan when the call's argument resolves to a
/// property pattern against the renamings already present below `input`,
/// a general [`PhysicalPlan::Aggregation`] node otherwise, and `None` when
/// the call is not a single-argument `min`/`max` at all (such calls belong
/// to the general aggregation machinery, which lives outside this crate).
pub fn plan_extremum_aggregation(
    input: PhysicalPlan,
    output_name: &str,
    call: &Expression,
) -> Option<PhysicalPlan> {
    let renamings = renamings_below(&input);
    classify_extremum(
        call,
        &renamings,
        |_anchor, arg| Some(top_one(input.clone(), output_name, arg, true)),
        |_anchor, arg| Some(top_one(input.clone(), output_name, arg, false)),
        || general_aggregation(input.clone(), output_name, call),
    )
}

/// Sort by the aggregation argument, keep one row, name the result.
fn top_one(
    input: PhysicalPlan,
    output_name: &str,
    arg: &Expression,
    ascending: bool,
) -> PhysicalPlan {
    let item = if ascending {
        SortItem::asc(arg.clone())
    } else {
        SortItem::desc(arg.clone())
    };
    input
        .sort(vec![item])
        .limit(1)
        .project(vec![(output_name.to_string(), arg.clone())])
}

/// Fall back to a runtime aggregation for extremum calls whose argument the
/// resolver did not recognize.
fn general_aggregation(
    input: PhysicalPlan,
    output_name: &str,
    call: &Expression,
) -> Option<PhysicalPlan> {
    let Expression::Function { name, args } = call else {
        return None;
    };
    let kind = match name.as_str() {
        "min" => AggregationKind::Min,
        "max" => AggregationKind::Max,
        _ => return None,
    };
    let expr = args.first()?.clone();
    Some(input.aggregate(vec![AggregationSpec {
        name: output_name.to_string(),
        kind,
        expr,
    }]))
}
