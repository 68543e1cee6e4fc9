// src/figure.rs

//! Plotly-compatible figure description of a laid-out network.
//!
//! The figure has two scatter traces: a line trace holding every edge as
//! `[x0, x1, null]` triples, and a marker trace with one point per node
//! carrying its name as hover text and its degree as colour.

use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::graph::Graph;
use crate::layout::Layout;

pub const DEFAULT_TITLE: &str = "Network graph examining the musicians that Eric Dolphy played with \
during his short and prolific career.<br>Hover at the top right for more controls. \
Click and drag on the graph to zoom in. Double click to go back.<br><br>";

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 850;
pub const BACKGROUND: &str = "rgba(247, 247, 247, 1)";
pub const EDGE_COLOR: &str = "#888";
pub const COLORSCALE: &str = "RdBu";

#[derive(Debug, Clone, PartialEq)]
pub struct FigureOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for FigureOptions {
    fn default() -> Self {
        FigureOptions {
            title: DEFAULT_TITLE.to_string(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: FigureLayout,
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub mode: &'static str,
    pub hoverinfo: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<Line>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Line {
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub showscale: bool,
    pub colorscale: &'static str,
    pub reversescale: bool,
    pub color: Vec<usize>,
    pub size: u32,
    pub colorbar: ColorBar,
    pub line: Line,
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorBar {
    pub thickness: u32,
    pub title: String,
    pub xanchor: &'static str,
    pub titleside: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureLayout {
    pub title: Title,
    pub showlegend: bool,
    pub hovermode: &'static str,
    pub clickmode: &'static str,
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    pub annotations: Vec<Annotation>,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub plot_bgcolor: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Title {
    pub text: String,
    pub font: Font,
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub b: u32,
    pub l: u32,
    pub r: u32,
    pub t: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Annotation {
    pub text: String,
    pub showarrow: bool,
    pub xref: &'static str,
    pub yref: &'static str,
}

/// Axis with grid, zero line and tick labels hidden.
#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub showgrid: bool,
    pub zeroline: bool,
    pub showticklabels: bool,
}

impl Axis {
    fn hidden() -> Self {
        Axis {
            showgrid: false,
            zeroline: false,
            showticklabels: false,
        }
    }
}

impl Figure {
    pub fn edge_trace(&self) -> &Trace {
        &self.data[0]
    }

    pub fn node_trace(&self) -> &Trace {
        &self.data[1]
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

/// Builds the figure for `graph` placed by `layout`.
pub fn network_figure(graph: &Graph, layout: &Layout, options: &FigureOptions) -> Figure {
    Figure {
        data: vec![edge_trace(graph, layout), node_trace(graph, layout)],
        layout: figure_layout(options),
    }
}

fn edge_trace(graph: &Graph, layout: &Layout) -> Trace {
    let mut x = Vec::with_capacity(graph.edge_count() * 3);
    let mut y = Vec::with_capacity(graph.edge_count() * 3);
    for &(a, b) in graph.edges() {
        let (p0, p1) = (layout.position(a), layout.position(b));
        // null breaks the polyline between segments
        x.extend([Some(p0.x), Some(p1.x), None]);
        y.extend([Some(p0.y), Some(p1.y), None]);
    }

    Trace {
        kind: "scatter",
        x,
        y,
        mode: "lines",
        hoverinfo: "none",
        text: None,
        line: Some(Line {
            width: 0.5,
            color: Some(EDGE_COLOR.to_string()),
        }),
        marker: None,
    }
}

fn node_trace(graph: &Graph, layout: &Layout) -> Trace {
    let (x, y): (Vec<_>, Vec<_>) = layout
        .positions()
        .iter()
        .map(|p| (Some(p.x), Some(p.y)))
        .unzip();
    let text: Vec<String> = graph.nodes().iter().map(|n| n.name.clone()).collect();

    Trace {
        kind: "scatter",
        x,
        y,
        mode: "markers",
        hoverinfo: "text",
        text: Some(text),
        line: None,
        marker: Some(Marker {
            showscale: false,
            colorscale: COLORSCALE,
            reversescale: true,
            color: graph.degrees(),
            size: 15,
            colorbar: ColorBar {
                thickness: 10,
                title: "Node Connections".to_string(),
                xanchor: "left",
                titleside: "right",
            },
            line: Line {
                width: 0.0,
                color: None,
            },
        }),
    }
}

fn figure_layout(options: &FigureOptions) -> FigureLayout {
    FigureLayout {
        title: Title {
            text: options.title.clone(),
            font: Font { size: 16 },
        },
        showlegend: false,
        hovermode: "closest",
        clickmode: "event+select",
        width: options.width,
        height: options.height,
        margin: Margin {
            b: 20,
            l: 5,
            r: 5,
            t: 100,
        },
        annotations: vec![Annotation {
            text: String::new(),
            showarrow: false,
            xref: "paper",
            yref: "paper",
        }],
        xaxis: Axis::hidden(),
        yaxis: Axis::hidden(),
        plot_bgcolor: BACKGROUND,
    }
}
