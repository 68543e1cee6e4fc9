use discograph::dataset::{Dataset, Row};
use discograph::graph::{Graph, NodeIdentity, NodeKind};
use discograph::selection::Selection;
use std::collections::BTreeSet;

fn iron_man_rows() -> Vec<Row> {
    vec![
        Row::new("Iron Man", "Eric Dolphy"),
        Row::new("Iron Man", "Ron Carter"),
    ]
}

#[test]
fn test_iron_man_example() {
    let graph = Graph::from_rows(&iron_man_rows(), NodeIdentity::Merged);

    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);

    let album = graph.find("Iron Man", NodeKind::Album).unwrap();
    let dolphy = graph.find("Eric Dolphy", NodeKind::Artist).unwrap();
    let carter = graph.find("Ron Carter", NodeKind::Artist).unwrap();
    assert_eq!(graph.degree(album), 2);
    assert_eq!(graph.degree(dolphy), 1);
    assert_eq!(graph.degree(carter), 1);
}

#[test]
fn test_nodes_are_albums_then_artists() {
    let rows = vec![
        Row::new("LP: Naima", "Eric Dolphy"),
        Row::new("LP: Caribe", "The Latin Jazz Quintet"),
        Row::new("LP: Naima", "Huck Hancock"),
    ];
    let graph = Graph::from_rows(&rows, NodeIdentity::Merged);
    let names: Vec<&str> = graph.nodes().iter().map(|n| n.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "LP: Naima",
            "LP: Caribe",
            "Eric Dolphy",
            "The Latin Jazz Quintet",
            "Huck Hancock"
        ]
    );
    assert_eq!(graph.count_kind(NodeKind::Album), 2);
    assert_eq!(graph.count_kind(NodeKind::Artist), 3);
}

#[test]
fn test_single_album_is_a_star() {
    let artists = ["Eric Dolphy", "Freddie Hubbard", "Bobby Hutcherson", "Richard Davis", "Tony Williams"];
    let rows: Vec<Row> = artists
        .iter()
        .map(|a| Row::new("LP: Out to Lunch", *a))
        .collect();
    let graph = Graph::from_rows(&rows, NodeIdentity::Merged);

    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 5);
    let center = graph.find("LP: Out to Lunch", NodeKind::Album).unwrap();
    assert_eq!(graph.degree(center), 5);
    for artist in artists {
        let idx = graph.find(artist, NodeKind::Artist).unwrap();
        assert_eq!(graph.degree(idx), 1);
        assert!(graph.are_adjacent(center, idx));
    }
}

#[test]
fn test_empty_rows_give_empty_graph() {
    let graph = Graph::from_rows(&[], NodeIdentity::Merged);
    assert!(graph.is_empty());
    assert_eq!(graph.edge_count(), 0);
    assert!(graph.degrees().is_empty());
}

#[test]
fn test_node_counts_match_distinct_columns() {
    let dataset = Dataset::load("tests/data/discography.csv").unwrap();
    let selection = Selection::all(&dataset, 0.5).unwrap();
    let rows = dataset.filter(&selection);
    let graph = Graph::from_rows(&rows, NodeIdentity::Merged);

    let albums: BTreeSet<&str> = rows.iter().map(|r| r.album.as_str()).collect();
    let artists: BTreeSet<&str> = rows.iter().map(|r| r.artist.as_str()).collect();
    assert_eq!(graph.count_kind(NodeKind::Album), albums.len());
    assert_eq!(graph.count_kind(NodeKind::Artist), artists.len());

    for &(a, b) in graph.edges() {
        assert!(albums.contains(graph.node(a).name.as_str()));
        assert!(artists.contains(graph.node(b).name.as_str()));
    }
    // Out to Lunch lists Tony Williams twice
    assert_eq!(graph.edge_count(), rows.len() - 1);
}

#[test]
fn test_rebuild_yields_same_sets() {
    let dataset = Dataset::load("tests/data/discography.csv").unwrap();
    let rows = dataset.filter(&Selection::default());
    let first = Graph::from_rows(&rows, NodeIdentity::Merged);
    let second = Graph::from_rows(&rows, NodeIdentity::Merged);
    assert_eq!(first.node_names(), second.node_names());
    assert_eq!(first.edge_names(), second.edge_names());
    assert_eq!(first.node_count(), 11);
    assert_eq!(first.edge_count(), 11);
}

#[test]
fn test_name_collision_merged_vs_typed() {
    let rows = vec![
        Row::new("Status", "Eric Dolphy"),
        Row::new("Out There", "Status"),
    ];

    let merged = Graph::from_rows(&rows, NodeIdentity::Merged);
    assert_eq!(merged.node_count(), 3);
    let status = merged.find("Status", NodeKind::Artist).unwrap();
    assert_eq!(merged.node(status).kind, NodeKind::Album);
    assert_eq!(merged.degree(status), 2);

    let typed = Graph::from_rows(&rows, NodeIdentity::Typed);
    assert_eq!(typed.node_count(), 4);
    let album = typed.find("Status", NodeKind::Album).unwrap();
    let artist = typed.find("Status", NodeKind::Artist).unwrap();
    assert_ne!(album, artist);
    assert_eq!(typed.degree(album), 1);
    assert_eq!(typed.degree(artist), 1);
}
