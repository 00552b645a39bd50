//! Chained Limit stages separated by expand steps.

use trellis_exec::Executor;
use trellis_plan::PhysicalPlan;
use trellis_tests::fixtures::complete_graph;

#[test]
fn four_chained_limits_yield_exactly_the_common_bound() {
    // GIVEN - a complete graph over 5 nodes: every expand multiplies the
    // row count by 5, so each limit stage sees at least 10 incoming rows
    let graph = complete_graph(5);

    let plan = PhysicalPlan::all_node_scan("x0")
        .expand("x0", Some("NEXT"), "x1")
        .limit(10)
        .expand("x1", Some("NEXT"), "x2")
        .limit(10)
        .expand("x2", Some("NEXT"), "x3")
        .limit(10)
        .expand("x3", Some("NEXT"), "x4")
        .limit(10)
        .produce_results(["x4"]);

    // WHEN
    let results = Executor::new(&graph).execute(&plan).unwrap();

    // THEN
    assert_eq!(results.len(), 10);
}

#[test]
fn widening_bounds_downstream_cannot_add_rows() {
    // GIVEN - a tight limit early on; later stages allow more
    let graph = complete_graph(5);

    let plan = PhysicalPlan::all_node_scan("x0")
        .limit(2)
        .expand("x0", Some("NEXT"), "x1")
        .limit(100)
        .produce_results(["x1"]);

    // WHEN
    let results = Executor::new(&graph).execute(&plan).unwrap();

    // THEN - 2 outer nodes with 5 successors each
    assert_eq!(results.len(), 10);
}
