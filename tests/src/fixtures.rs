//! Seeded graphs for integration tests.

use trellis_core::{props, NodeId};
use trellis_graph::Graph;

/// A graph of `hubs` hub nodes, each linked to its own `fanout` neighbor
/// nodes via `LINKS` edges. Neighbors have no outgoing edges. Returns the
/// graph and the hub ids in creation order.
pub fn fanout_graph(hubs: usize, fanout: usize) -> (Graph, Vec<NodeId>) {
    let mut graph = Graph::new();
    let mut hub_ids = Vec::new();

    for h in 0..hubs {
        let hub = graph.create_node(props! { "hub" => h as i64 });
        hub_ids.push(hub);
    }
    for (h, hub) in hub_ids.iter().enumerate() {
        for f in 0..fanout {
            let neighbor = graph.create_node(props! { "leaf" => (h * fanout + f) as i64 });
            graph.create_edge("LINKS", *hub, neighbor, props!()).unwrap();
        }
    }

    (graph, hub_ids)
}

/// A complete directed graph over `n` nodes: every node has a `NEXT` edge to
/// every node (itself included), so every expand step multiplies the row
/// count by `n`.
pub fn complete_graph(n: usize) -> Graph {
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = (0..n)
        .map(|i| graph.create_node(props! { "idx" => i as i64 }))
        .collect();
    for source in &ids {
        for target in &ids {
            graph.create_edge("NEXT", *source, *target, props!()).unwrap();
        }
    }
    graph
}

/// Two people who each know three friends, with ages chosen so that the
/// first-created friendship never points at the youngest friend:
///
/// - ann (40) KNOWS bea (30), cal (10), dot (20)
/// - ed  (50) KNOWS fay (25), gus (5),  hal (15)
///
/// Returns the graph and the ids of ann and ed.
pub fn social_graph() -> (Graph, NodeId, NodeId) {
    let mut graph = Graph::new();

    let ann = graph.create_node(props! { "name" => "Ann", "age" => 40i64 });
    let bea = graph.create_node(props! { "name" => "Bea", "age" => 30i64 });
    let cal = graph.create_node(props! { "name" => "Cal", "age" => 10i64 });
    let dot = graph.create_node(props! { "name" => "Dot", "age" => 20i64 });
    let ed = graph.create_node(props! { "name" => "Ed", "age" => 50i64 });
    let fay = graph.create_node(props! { "name" => "Fay", "age" => 25i64 });
    let gus = graph.create_node(props! { "name" => "Gus", "age" => 5i64 });
    let hal = graph.create_node(props! { "name" => "Hal", "age" => 15i64 });

    for friend in [bea, cal, dot] {
        graph.create_edge("KNOWS", ann, friend, props!()).unwrap();
    }
    for friend in [fay, gus, hal] {
        graph.create_edge("KNOWS", ed, friend, props!()).unwrap();
    }

    (graph, ann, ed)
}
