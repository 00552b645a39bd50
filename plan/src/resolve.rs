//! Extremum aggregation pattern resolution.
//!
//! `min(expr)` / `max(expr)` aggregations can be planned as a top-1 sort
//! when their argument boils down to a property access on some variable.
//! The argument rarely names the property directly: earlier projection
//! stages introduce aliases (`WITH n.age AS x ... RETURN min(x)`), so the
//! resolver traces the argument back through the recorded renamings until it
//! reaches the anchoring variable.
//!
//! Resolution never fails hard. Any shape it does not recognize resolves to
//! `None` and the caller falls back to general aggregation; an unrecognized
//! pattern only forfeits the rewrite, never correctness.

use crate::expr::{Expression, Renamings};

/// Resolve an aggregation argument to its anchor variable and property.
///
/// Walks alias chains iteratively, carrying the property key seen so far.
/// A function invocation in the chain resets the carried property: the
/// property access then belongs to the function's input, not to the
/// aggregated value. A variable mapped to itself stops the walk (renaming
/// maps are caller-controlled input and may contain self-mappings).
pub fn resolve_property_anchor<'a>(
    expr: &'a Expression,
    renamings: &'a Renamings,
) -> Option<(String, Option<String>)> {
    let mut current = expr;
    let mut property: Option<&str> = None;

    loop {
        match current {
            Expression::Function { args, .. } => {
                let inner = args.first()?;
                if matches!(inner, Expression::Function { .. }) {
                    // Aggregation over a nested function invocation is not
                    // a property pattern.
                    return None;
                }
                property = None;
                current = inner;
            }
            Expression::Property { base, key } => match renamings.lookup(base) {
                Some(renamed) => {
                    property = Some(key.as_str());
                    current = renamed;
                }
                None => return Some((base.clone(), Some(key.clone()))),
            },
            Expression::Variable(name) => {
                let renamed = renamings
                    .lookup(name)
                    .filter(|r| !matches!(r, Expression::Variable(n) if n == name));
                match renamed {
                    Some(renamed) => current = renamed,
                    None => {
                        return property.map(|key| (name.clone(), Some(key.to_string())));
                    }
                }
            }
        }
    }
}

/// Classify an aggregation call as `min`, `max`, or something else.
///
/// Dispatches to `on_min` / `on_max` with the anchor variable and the
/// original argument expression when the call is a single-argument `min` or
/// `max` (exact, case-sensitive name match) whose argument resolves via
/// [`resolve_property_anchor`]. Every other shape goes to `otherwise`.
pub fn classify_extremum<T>(
    expr: &Expression,
    renamings: &Renamings,
    on_min: impl FnOnce(&str, &Expression) -> T,
    on_max: impl FnOnce(&str, &Expression) -> T,
    otherwise: impl FnOnce() -> T,
) -> T {
    let Expression::Function { name, args } = expr else {
        return otherwise();
    };
    if name != "min" && name != "max" {
        return otherwise();
    }

    let resolved = args
        .first()
        .and_then(|arg| resolve_property_anchor(arg, renamings).map(|(anchor, _)| (arg, anchor)));

    match resolved {
        Some((arg, anchor)) if name == "min" => on_min(&anchor, arg),
        Some((arg, anchor)) => on_max(&anchor, arg),
        None => otherwise(),
    }
}
