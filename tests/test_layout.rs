use discograph::dataset::{Dataset, Row};
use discograph::graph::{Graph, NodeIdentity};
use discograph::layout::{spring_layout, LayoutParams};
use discograph::network::{build_network, network_graph, NetworkOptions};
use discograph::selection::Selection;

fn star(artists: usize) -> Graph {
    let rows: Vec<Row> = (0..artists)
        .map(|i| Row::new("LP: Last Date", format!("Artist {}", i)))
        .collect();
    Graph::from_rows(&rows, NodeIdentity::Merged)
}

fn max_abs(layout: &discograph::layout::Layout) -> f64 {
    layout
        .positions()
        .iter()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max)
}

#[test]
fn test_boundary_spacing_gives_finite_positions() {
    let graph = star(5);
    for k in [0.0, 1.0] {
        let layout = spring_layout(&graph, &LayoutParams::new(k).with_seed(Some(7)));
        assert_eq!(layout.len(), 6);
        assert!(layout.is_finite(), "non-finite coordinate at K = {}", k);
        // scaled to the unit box, so not everything sits on one point
        assert!((max_abs(&layout) - 1.0).abs() < 1e-9, "collapsed layout at K = {}", k);
    }
}

#[test]
fn test_seeded_layout_is_reproducible() {
    let graph = star(4);
    let params = LayoutParams::new(0.09).with_seed(Some(42));
    let a = spring_layout(&graph, &params);
    let b = spring_layout(&graph, &params);
    assert_eq!(a, b);
}

#[test]
fn test_different_seeds_differ() {
    let graph = star(4);
    let a = spring_layout(&graph, &LayoutParams::new(0.3).with_seed(Some(1)));
    let b = spring_layout(&graph, &LayoutParams::new(0.3).with_seed(Some(2)));
    assert_ne!(a, b);
}

#[test]
fn test_unseeded_layout_is_valid() {
    let graph = star(3);
    let layout = spring_layout(&graph, &LayoutParams::new(0.09));
    assert_eq!(layout.len(), graph.node_count());
    assert!(layout.is_finite());
}

#[test]
fn test_trivial_graphs() {
    let empty = Graph::new(NodeIdentity::Merged);
    assert!(spring_layout(&empty, &LayoutParams::new(0.5)).is_empty());

    let mut single = Graph::new(NodeIdentity::Merged);
    single.add_node("LP: Naima", discograph::graph::NodeKind::Album);
    let layout = spring_layout(&single, &LayoutParams::new(0.5));
    assert_eq!(layout.len(), 1);
    assert_eq!(layout.position(0).x, 0.0);
    assert_eq!(layout.position(0).y, 0.0);
}

#[test]
fn test_layout_is_centred() {
    let graph = star(6);
    let layout = spring_layout(&graph, &LayoutParams::new(0.2).with_seed(Some(3)));
    let n = layout.len() as f64;
    let (sx, sy) = layout
        .positions()
        .iter()
        .fold((0.0_f64, 0.0_f64), |(x, y), p| (x + p.x, y + p.y));
    approx::assert_abs_diff_eq!(sx / n, 0.0, epsilon = 1e-9);
    approx::assert_abs_diff_eq!(sy / n, 0.0, epsilon = 1e-9);
}

#[test]
fn test_zero_iterations_keeps_random_start() {
    let graph = star(2);
    let layout = spring_layout(
        &graph,
        &LayoutParams::new(0.5).with_seed(Some(9)).with_iterations(0),
    );
    assert!(layout.is_finite());
    assert_eq!(layout.len(), 3);
}

#[test]
fn test_network_graph_empty_rows() {
    let network = network_graph(&[], 0.09, &NetworkOptions::default());
    assert!(network.graph.is_empty());
    assert!(network.layout.is_empty());
}

#[test]
fn test_build_network_from_dataset() {
    let dataset = Dataset::load("tests/data/discography.csv").unwrap();
    let options = NetworkOptions {
        seed: Some(11),
        ..NetworkOptions::default()
    };
    let network = build_network(&dataset, &Selection::default(), &options);
    assert_eq!(network.graph.node_count(), 11);
    assert_eq!(network.layout.len(), 11);
    assert!(network.layout.is_finite());

    let again = build_network(&dataset, &Selection::default(), &options);
    assert_eq!(network.layout, again.layout);
}
