// src/export.rs

//! CSV dumps of a laid-out network, one file for nodes and one for edges.

use std::path::Path;

use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::graph::{Graph, NodeKind};
use crate::layout::Layout;

#[derive(Debug, Serialize)]
struct NodeRecord<'a> {
    name: &'a str,
    kind: NodeKind,
    degree: usize,
    x: f64,
    y: f64,
}

#[derive(Debug, Serialize)]
struct EdgeRecord<'a> {
    album: &'a str,
    artist: &'a str,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

/// Writes `name,kind,degree,x,y`, one line per node.
pub fn write_nodes_csv<P: AsRef<Path>>(graph: &Graph, layout: &Layout, csv_path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_path(&csv_path)?;
    for (idx, node) in graph.nodes().iter().enumerate() {
        let p = layout.position(idx);
        wtr.serialize(NodeRecord {
            name: &node.name,
            kind: node.kind,
            degree: graph.degree(idx),
            x: p.x,
            y: p.y,
        })?;
    }
    wtr.flush()?;
    info!(
        "Wrote {} nodes to {}",
        graph.node_count(),
        csv_path.as_ref().display()
    );
    Ok(())
}

/// Writes `album,artist,x0,y0,x1,y1`, one line per edge.
pub fn write_edges_csv<P: AsRef<Path>>(graph: &Graph, layout: &Layout, csv_path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_path(&csv_path)?;
    for &(a, b) in graph.edges() {
        let (p0, p1) = (layout.position(a), layout.position(b));
        wtr.serialize(EdgeRecord {
            album: &graph.node(a).name,
            artist: &graph.node(b).name,
            x0: p0.x,
            y0: p0.y,
            x1: p1.x,
            y1: p1.y,
        })?;
    }
    wtr.flush()?;
    info!(
        "Wrote {} edges to {}",
        graph.edge_count(),
        csv_path.as_ref().display()
    );
    Ok(())
}

/// Writes `nodes.csv` and `edges.csv` into `dir`, creating it if needed.
pub fn write_network_csv<P: AsRef<Path>>(graph: &Graph, layout: &Layout, dir: P) -> Result<()> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;
    write_nodes_csv(graph, layout, dir.join("nodes.csv"))?;
    write_edges_csv(graph, layout, dir.join("edges.csv"))
}
