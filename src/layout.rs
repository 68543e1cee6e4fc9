// src/layout.rs

//! Force-directed placement of the album/artist graph.
//!
//! This is the Fruchterman-Reingold spring model: every pair of nodes repels
//! with strength `k^2 / d`, every edge attracts with `d^2 / k`, and a linearly
//! cooling temperature caps how far a node may move per iteration. The result
//! is centred on the origin and scaled to fit inside `[-1, 1]`.

use nalgebra::{Point2, Vector2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::graph::Graph;

pub const DEFAULT_ITERATIONS: usize = 50;

/// Lower bound applied to K. Attraction divides by k, so K = 0 is lifted to this.
pub const MIN_SPACING: f64 = 0.01;

const MIN_DISTANCE: f64 = 0.01;
const CONVERGENCE_THRESHOLD: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutParams {
    /// Optimal distance between connected nodes (K).
    pub spacing: f64,
    pub iterations: usize,
    /// Fixes the random initial placement. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl LayoutParams {
    pub fn new(spacing: f64) -> Self {
        LayoutParams {
            spacing,
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    fn effective_spacing(&self) -> f64 {
        if self.spacing.is_finite() {
            self.spacing.max(MIN_SPACING)
        } else {
            MIN_SPACING
        }
    }
}

/// Node positions, indexed like [`Graph::nodes`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    positions: Vec<Point2<f64>>,
}

impl Layout {
    pub fn from_positions(positions: Vec<Point2<f64>>) -> Self {
        Layout { positions }
    }

    pub fn position(&self, idx: usize) -> Point2<f64> {
        self.positions[idx]
    }

    pub fn positions(&self) -> &[Point2<f64>] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn is_finite(&self) -> bool {
        self.positions
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite())
    }
}

/// Lays out `graph` from a fresh random start.
pub fn spring_layout(graph: &Graph, params: &LayoutParams) -> Layout {
    let n = graph.node_count();
    match n {
        0 => return Layout::default(),
        1 => return Layout::from_positions(vec![Point2::origin()]),
        _ => {}
    }

    let initial = match params.seed {
        Some(seed) => random_positions(&mut ChaCha8Rng::seed_from_u64(seed), n),
        None => random_positions(&mut rand::thread_rng(), n),
    };

    let k = params.effective_spacing();
    let mut positions = fruchterman_reingold(graph, initial, k, params.iterations);
    rescale(&mut positions);

    debug!(
        "Spring layout for {} nodes, {} edges (k = {}, {} iterations)",
        n,
        graph.edge_count(),
        k,
        params.iterations
    );
    Layout::from_positions(positions)
}

/// Uniform positions in the unit square.
pub fn random_positions<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Point2<f64>> {
    (0..n)
        .map(|_| Point2::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect()
}

fn fruchterman_reingold(
    graph: &Graph,
    mut positions: Vec<Point2<f64>>,
    k: f64,
    iterations: usize,
) -> Vec<Point2<f64>> {
    let n = positions.len();

    // Start at a tenth of the initial extent and cool to zero.
    let (min, max) = bounds(&positions);
    let mut temperature = (max.x - min.x).max(max.y - min.y) * 0.1;
    let cooling = temperature / (iterations as f64 + 1.0);

    for iteration in 0..iterations {
        let mut displacement = vec![Vector2::<f64>::zeros(); n];

        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let delta = positions[i] - positions[j];
                let distance = delta.norm().max(MIN_DISTANCE);
                let attraction = if graph.are_adjacent(i, j) {
                    distance / k
                } else {
                    0.0
                };
                let repulsion = k * k / (distance * distance);
                displacement[i] += delta * (repulsion - attraction);
            }
        }

        let mut moved: f64 = 0.0;
        for (pos, disp) in positions.iter_mut().zip(&displacement) {
            let mut length = disp.norm();
            if length < MIN_DISTANCE {
                length = 0.1;
            }
            let step = *disp * (temperature / length);
            *pos += step;
            moved += step.norm_squared();
        }

        temperature -= cooling;
        if moved.sqrt() / (n as f64) < CONVERGENCE_THRESHOLD {
            debug!("Spring layout converged after {} iterations", iteration + 1);
            break;
        }
    }

    positions
}

fn bounds(positions: &[Point2<f64>]) -> (Point2<f64>, Point2<f64>) {
    let mut min = Point2::new(f64::MAX, f64::MAX);
    let mut max = Point2::new(f64::MIN, f64::MIN);
    for p in positions {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }
    (min, max)
}

/// Centres positions on the origin and scales the largest coordinate to 1.
fn rescale(positions: &mut [Point2<f64>]) {
    if positions.is_empty() {
        return;
    }
    let mean = positions
        .iter()
        .fold(Vector2::zeros(), |acc, p| acc + p.coords)
        / positions.len() as f64;

    let mut limit: f64 = 0.0;
    for p in positions.iter_mut() {
        *p -= mean;
        limit = limit.max(p.x.abs()).max(p.y.abs());
    }
    if limit > 0.0 {
        for p in positions.iter_mut() {
            *p = Point2::from(p.coords / limit);
        }
    }
}
