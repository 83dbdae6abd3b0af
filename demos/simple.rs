use route_planning::{RouteGraph, RouteModel, RoutePlanner};

// In this example a route is planned on a small street network
//
// 3---4---5
// |       |
// 0---1   2
//
// Street 1-2 is missing, so the route from 0 to 2 goes around over 3, 4 and 5.
// One model unit corresponds to 800 metres.
fn main() {
    let mut graph = RouteGraph::with_metric_scale(800.0);
    let corners = [
        (0.0, 0.0),
        (0.5, 0.0),
        (1.0, 0.0),
        (0.0, 1.0),
        (0.5, 1.0),
        (1.0, 1.0),
    ];
    let nodes = corners
        .iter()
        .enumerate()
        .map(|(id, &(x, y))| graph.add_node(id as u64, x, y))
        .collect::<Vec<_>>();
    for (a, b) in [(0, 1), (0, 3), (3, 4), (4, 5), (5, 2)] {
        graph.add_edge(nodes[a], nodes[b]);
    }
    graph.generate_components();
    println!("{}", graph);

    let found = RoutePlanner::new(&mut graph, 0.0, 0.0, 100.0, 0.0)
        .and_then(|mut planner| {
            let found = planner.search_write_back()?;
            println!("Distance: {} m", planner.distance);
            Ok(found)
        });
    match found {
        Ok(true) => {
            println!("A route has been found:");
            for node in graph.path() {
                println!("{:?}", node);
            }
        }
        Ok(false) => println!("No route exists"),
        Err(e) => println!("Planning failed: {e}"),
    }
    println!("Nodes in model: {}", graph.node_count());
}
