// src/network.rs

//! Graph builder: filtered rows plus a spacing constant in, positioned
//! network out. Everything is recomputed from scratch on each call.

use tracing::info;

use crate::dataset::{Dataset, Row};
use crate::figure::{network_figure, Figure, FigureOptions};
use crate::graph::{Graph, NodeIdentity};
use crate::layout::{spring_layout, Layout, LayoutParams, DEFAULT_ITERATIONS};
use crate::selection::Selection;

#[derive(Debug, Clone, PartialEq)]
pub struct NetworkOptions {
    pub identity: NodeIdentity,
    pub iterations: usize,
    pub seed: Option<u64>,
}

impl Default for NetworkOptions {
    fn default() -> Self {
        NetworkOptions {
            identity: NodeIdentity::Merged,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

/// A graph together with one layout of it.
#[derive(Debug, Clone)]
pub struct Network {
    pub graph: Graph,
    pub layout: Layout,
}

impl Network {
    pub fn figure(&self, options: &FigureOptions) -> Figure {
        network_figure(&self.graph, &self.layout, options)
    }
}

/// Builds and lays out the network for rows that are already filtered.
pub fn network_graph(rows: &[Row], spacing: f64, options: &NetworkOptions) -> Network {
    let graph = Graph::from_rows(rows, options.identity);
    let params = LayoutParams::new(spacing)
        .with_iterations(options.iterations)
        .with_seed(options.seed);
    let layout = spring_layout(&graph, &params);
    Network { graph, layout }
}

/// Filters `dataset` by `selection` and builds the network for what remains.
pub fn build_network(dataset: &Dataset, selection: &Selection, options: &NetworkOptions) -> Network {
    let rows = dataset.filter(selection);
    let network = network_graph(&rows, selection.spacing(), options);
    info!(
        "Network for {} albums: {} nodes, {} edges",
        selection.albums().len(),
        network.graph.node_count(),
        network.graph.edge_count()
    );
    network
}
