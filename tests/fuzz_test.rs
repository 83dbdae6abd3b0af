/// Fuzzes the planner by checking for many random road networks that a route is found exactly
/// when the goal is part of the same connected component, that routes follow graph edges, and
/// that [Rediscovery::KeepBest] matches the shortest distance found by Dijkstra.
use petgraph::algo::dijkstra;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rand::prelude::*;
use route_planning::planner::path_length;
use route_planning::{Rediscovery, Route, RouteGraph, RoutePlanner};

fn random_graph(n: usize, radius: f32, rng: &mut StdRng) -> RouteGraph {
    let mut graph = RouteGraph::with_metric_scale(rng.gen_range(1.0..5000.0));
    for id in 0..n {
        graph.add_node(id as u64, rng.gen(), rng.gen());
    }
    for a in 0..n {
        for b in (a + 1)..n {
            let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
            if graph.graph[a].distance(&graph.graph[b]) < radius {
                graph.add_edge(a, b);
            }
        }
    }
    graph.generate_components();
    graph
}

fn random_query(rng: &mut StdRng) -> [f32; 4] {
    [
        rng.gen_range(0.0..=100.0),
        rng.gen_range(0.0..=100.0),
        rng.gen_range(0.0..=100.0),
        rng.gen_range(0.0..=100.0),
    ]
}

/// Runs both policies, forcing the planner to exhaust the frontier instead of relying on the
/// components if `exhaust` is set.
fn plan(
    graph: &mut RouteGraph,
    query: [f32; 4],
    exhaust: bool,
) -> (NodeIndex, NodeIndex, Vec<Option<Route>>) {
    graph.components_dirty = exhaust;
    let [sx, sy, ex, ey] = query;
    let mut planner = RoutePlanner::new(graph, sx, sy, ex, ey).unwrap();
    let mut routes = Vec::new();
    for rediscovery in [Rediscovery::FirstDiscovery, Rediscovery::KeepBest] {
        planner.rediscovery = rediscovery;
        routes.push(planner.search().unwrap());
    }
    let (start, end) = (planner.start, planner.end);
    graph.components_dirty = false;
    (start, end, routes)
}

fn shortest_distance(graph: &RouteGraph, start: NodeIndex, end: NodeIndex) -> Option<f32> {
    let costs = dijkstra(&graph.graph, start, Some(end), |e| {
        graph.graph[e.source()].distance(&graph.graph[e.target()])
    });
    costs.get(&end).map(|c| c * graph.metric_scale)
}

fn assert_valid(graph: &RouteGraph, route: &Route, start: NodeIndex, end: NodeIndex) {
    assert_eq!(route.indices.first(), Some(&start));
    assert_eq!(route.indices.last(), Some(&end));
    for pair in route.indices.windows(2) {
        assert!(graph.graph.find_edge(pair[0], pair[1]).is_some());
    }
    let length = path_length(graph, &route.indices);
    assert!((length - route.distance).abs() <= 1e-4 * length.max(1.0));
}

#[test]
fn fuzz() {
    const N: usize = 30;
    const N_GRAPHS: usize = 500;
    let mut rng = StdRng::seed_from_u64(0);
    for i in 0..N_GRAPHS {
        let mut graph = random_graph(N, 0.25, &mut rng);
        let query = random_query(&mut rng);
        let exhaust = i % 2 == 0;
        let (start, end, routes) = plan(&mut graph, query, exhaust);
        let reachable = graph.reachable(start, end);
        for route in routes {
            assert_eq!(route.is_some(), reachable);
            if let Some(route) = route {
                assert_valid(&graph, &route, start, end);
                if start == end {
                    assert_eq!(route.len(), 1);
                    assert_eq!(route.distance, 0.0);
                }
            }
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 40;
    const N_GRAPHS: usize = 300;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRAPHS {
        let mut graph = random_graph(N, 0.35, &mut rng);
        let query = random_query(&mut rng);
        let (start, end, routes) = plan(&mut graph, query, false);
        let Some(optimal) = shortest_distance(&graph, start, end) else {
            assert!(routes.iter().all(Option::is_none));
            continue;
        };
        let tolerance = 1e-4 * optimal.max(1.0);
        let first_discovery = routes[0].as_ref().unwrap();
        let keep_best = routes[1].as_ref().unwrap();
        assert!(first_discovery.distance >= optimal - tolerance);
        assert!((keep_best.distance - optimal).abs() <= tolerance);
    }
}

#[test]
fn deterministic() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut graph = random_graph(60, 0.2, &mut rng);
    for _ in 0..50 {
        let query = random_query(&mut rng);
        let (_, _, first) = plan(&mut graph, query, true);
        let (_, _, second) = plan(&mut graph, query, true);
        assert_eq!(first, second);
    }
}
