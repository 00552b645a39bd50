//! Correlated execution: Apply/Argument driving a bounded inner branch.

use std::collections::HashMap;
use trellis_core::Value;
use trellis_exec::Executor;
use trellis_plan::{Expression, PhysicalPlan, SortItem};
use trellis_tests::assertion::{assert_rows_eq, column_values, row};
use trellis_tests::fixtures::{fanout_graph, social_graph};

#[test]
fn inner_limit_is_enforced_per_outer_row() {
    // GIVEN - 3 hubs with 5 neighbors each (plus the 15 leaf nodes, which
    // have no outgoing edges and contribute nothing)
    let (graph, hubs) = fanout_graph(3, 5);

    let plan = PhysicalPlan::apply(
        PhysicalPlan::all_node_scan("x"),
        PhysicalPlan::argument(["x"])
            .expand("x", Some("LINKS"), "y")
            .limit(2),
    )
    .produce_results(["x", "y"]);

    // WHEN
    let results = Executor::new(&graph).execute(&plan).unwrap();

    // THEN - 2 matches per hub, not 2 overall
    assert_eq!(results.len(), hubs.len() * 2);

    let mut per_outer: HashMap<String, usize> = HashMap::new();
    for row in &results {
        let key = format!("{:?}", row.get("x").unwrap());
        *per_outer.entry(key).or_default() += 1;
    }
    assert_eq!(per_outer.len(), hubs.len());
    assert!(per_outer.values().all(|count| *count == 2));
}

#[test]
fn inner_limit_larger_than_matches_yields_all_matches() {
    // GIVEN
    let (graph, hubs) = fanout_graph(2, 3);

    let plan = PhysicalPlan::apply(
        PhysicalPlan::all_node_scan("x"),
        PhysicalPlan::argument(["x"])
            .expand("x", Some("LINKS"), "y")
            .limit(10),
    )
    .produce_results(["x", "y"]);

    // WHEN
    let results = Executor::new(&graph).execute(&plan).unwrap();

    // THEN
    assert_eq!(results.len(), hubs.len() * 3);
}

#[test]
fn rows_are_emitted_in_outer_row_order() {
    // GIVEN
    let (graph, hubs) = fanout_graph(3, 2);

    let plan = PhysicalPlan::apply(
        PhysicalPlan::all_node_scan("x"),
        PhysicalPlan::argument(["x"]).expand("x", Some("LINKS"), "y"),
    )
    .produce_results(["x"]);

    // WHEN
    let results = Executor::new(&graph).execute(&plan).unwrap();

    // THEN - hub 0's matches before hub 1's before hub 2's
    let outer: Vec<_> = column_values(&results, "x");
    let expected: Vec<_> = hubs
        .iter()
        .flat_map(|hub| std::iter::repeat(Value::NodeRef(*hub)).take(2))
        .collect();
    assert_eq!(outer, expected);
}

#[test]
fn sort_then_limit_keeps_the_smallest_per_outer_row() {
    // GIVEN - ann's youngest friend is cal (10), ed's is gus (5)
    let (graph, ann, ed) = social_graph();

    let plan = PhysicalPlan::apply(
        PhysicalPlan::all_node_scan("x"),
        PhysicalPlan::argument(["x"])
            .expand("x", Some("KNOWS"), "y")
            .sort(vec![SortItem::asc(Expression::prop("y", "age"))])
            .limit(1),
    )
    .project(vec![("age".to_string(), Expression::prop("y", "age"))])
    .produce_results(["x", "age"]);

    // WHEN
    let results = Executor::new(&graph).execute(&plan).unwrap();

    // THEN - one row per person with friends, holding that person's
    // youngest friend (the sort never mixes rows across outer rows)
    assert_rows_eq(
        &results,
        &[
            row(&[("x", Value::NodeRef(ann)), ("age", Value::Int(10))]),
            row(&[("x", Value::NodeRef(ed)), ("age", Value::Int(5))]),
        ],
    );
}

#[test]
fn limit_then_sort_keeps_the_first_matches_instead() {
    // GIVEN - friendships were created pointing at bea (30) and fay (25)
    // first, so a limit placed before the sort picks those, not the
    // youngest
    let (graph, ann, ed) = social_graph();

    let plan = PhysicalPlan::apply(
        PhysicalPlan::all_node_scan("x"),
        PhysicalPlan::argument(["x"])
            .expand("x", Some("KNOWS"), "y")
            .limit(1)
            .sort(vec![SortItem::asc(Expression::prop("y", "age"))]),
    )
    .project(vec![("age".to_string(), Expression::prop("y", "age"))])
    .produce_results(["x", "age"]);

    // WHEN
    let results = Executor::new(&graph).execute(&plan).unwrap();

    // THEN
    assert_rows_eq(
        &results,
        &[
            row(&[("x", Value::NodeRef(ann)), ("age", Value::Int(30))]),
            row(&[("x", Value::NodeRef(ed)), ("age", Value::Int(25))]),
        ],
    );
}

#[test]
fn sort_scopes_to_one_inner_invocation() {
    // GIVEN - sorting all friends per person must interleave ages across
    // outer rows rather than sorting globally
    let (graph, _, _) = social_graph();

    let plan = PhysicalPlan::apply(
        PhysicalPlan::all_node_scan("x"),
        PhysicalPlan::argument(["x"])
            .expand("x", Some("KNOWS"), "y")
            .sort(vec![SortItem::asc(Expression::prop("y", "age"))]),
    )
    .project(vec![("age".to_string(), Expression::prop("y", "age"))])
    .produce_results(["age"]);

    // WHEN
    let results = Executor::new(&graph).execute(&plan).unwrap();

    // THEN - ann's friends sorted, then ed's friends sorted; a global sort
    // would have produced 5, 10, 15, 20, 25, 30
    let ages = column_values(&results, "age");
    assert_eq!(
        ages,
        vec![
            Value::Int(10),
            Value::Int(20),
            Value::Int(30),
            Value::Int(5),
            Value::Int(15),
            Value::Int(25),
        ]
    );
}
