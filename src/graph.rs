// src/graph.rs

//! The album/artist network.
//!
//! Nodes are the distinct album titles followed by the distinct artist names,
//! each in first-appearance order. Every row contributes one undirected edge
//! between its album and its artist; repeated rows collapse into one edge.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::dataset::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Album,
    Artist,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Album => write!(f, "album"),
            NodeKind::Artist => write!(f, "artist"),
        }
    }
}

/// How node names map to node identities.
///
/// `Merged` keys nodes by name alone, so an artist who shares a name with an
/// album becomes the same node. `Typed` keys by (kind, name) and keeps them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeIdentity {
    #[default]
    Merged,
    Typed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    /// Column that introduced the node. Under `Merged` identity a colliding
    /// name keeps the kind it was first seen with, which is always `Album`.
    pub kind: NodeKind,
}

type NodeKey = (Option<NodeKind>, String);

#[derive(Debug, Clone, Default)]
pub struct Graph {
    identity: NodeIdentity,
    nodes: Vec<Node>,
    index: HashMap<NodeKey, usize>,
    neighbors: Vec<BTreeSet<usize>>,
    // (album node, artist node) in first-appearance order
    edges: Vec<(usize, usize)>,
}

impl Graph {
    pub fn new(identity: NodeIdentity) -> Self {
        Graph {
            identity,
            ..Default::default()
        }
    }

    pub fn from_rows(rows: &[Row], identity: NodeIdentity) -> Self {
        let mut graph = Graph::new(identity);
        for row in rows {
            graph.add_node(&row.album, NodeKind::Album);
        }
        for row in rows {
            graph.add_node(&row.artist, NodeKind::Artist);
        }
        for row in rows {
            graph.add_row(row);
        }
        debug!(
            "Built graph with {} nodes and {} edges from {} rows",
            graph.node_count(),
            graph.edge_count(),
            rows.len()
        );
        graph
    }

    fn key(&self, name: &str, kind: NodeKind) -> NodeKey {
        match self.identity {
            NodeIdentity::Merged => (None, name.to_string()),
            NodeIdentity::Typed => (Some(kind), name.to_string()),
        }
    }

    /// Returns the index of the node, inserting it if it is new.
    pub fn add_node(&mut self, name: &str, kind: NodeKind) -> usize {
        let key = self.key(name, kind);
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(Node {
            name: name.to_string(),
            kind,
        });
        self.neighbors.push(BTreeSet::new());
        self.index.insert(key, idx);
        idx
    }

    /// Adds the album and artist of `row` if needed and connects them.
    /// Returns `false` when the edge already existed.
    pub fn add_row(&mut self, row: &Row) -> bool {
        let album = self.add_node(&row.album, NodeKind::Album);
        let artist = self.add_node(&row.artist, NodeKind::Artist);
        if !self.neighbors[album].insert(artist) {
            return false;
        }
        self.neighbors[artist].insert(album);
        self.edges.push((album, artist));
        true
    }

    pub fn identity(&self) -> NodeIdentity {
        self.identity
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, idx: usize) -> &Node {
        &self.nodes[idx]
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn find(&self, name: &str, kind: NodeKind) -> Option<usize> {
        self.index.get(&self.key(name, kind)).copied()
    }

    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors[idx].iter().copied()
    }

    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        self.neighbors[a].contains(&b)
    }

    /// Number of distinct neighbours. A self-loop (album and artist with the
    /// same name under `Merged` identity) counts once.
    pub fn degree(&self, idx: usize) -> usize {
        self.neighbors[idx].len()
    }

    pub fn degrees(&self) -> Vec<usize> {
        self.neighbors.iter().map(BTreeSet::len).collect()
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.nodes.iter().filter(|n| n.kind == kind).count()
    }

    /// Edges as name pairs, for comparing graphs independently of node order.
    pub fn edge_names(&self) -> BTreeSet<(String, String)> {
        self.edges
            .iter()
            .map(|&(a, b)| (self.nodes[a].name.clone(), self.nodes[b].name.clone()))
            .collect()
    }

    pub fn node_names(&self) -> BTreeSet<String> {
        self.nodes.iter().map(|n| n.name.clone()).collect()
    }
}
