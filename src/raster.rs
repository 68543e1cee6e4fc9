// src/raster.rs

//! Rasterised preview of a laid-out network.
//!
//! Edges are drawn as one-pixel Bresenham lines, nodes as filled circles
//! coloured by degree on a reversed RdBu scale (low degree red, high degree
//! blue). The canvas is written as an uncompressed 24-bit TGA, which
//! `termimage` can then print straight to the terminal.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use palette::{LinSrgb, Mix, Srgb};
use termimage::ops;
use tracing::info;

use crate::error::{DiscographError, Result};
use crate::graph::Graph;
use crate::layout::Layout;

pub type Rgb = (u8, u8, u8);

pub const BACKGROUND: Rgb = (247, 247, 247);
pub const EDGE_COLOR: Rgb = (136, 136, 136);

/// Plotly's RdBu stops.
const RDBU: &[(f32, Rgb)] = &[
    (0.0, (5, 10, 172)),
    (0.35, (106, 137, 247)),
    (0.5, (190, 190, 190)),
    (0.6, (220, 170, 132)),
    (0.7, (230, 145, 90)),
    (1.0, (178, 10, 28)),
];

#[derive(Debug, Clone, PartialEq)]
pub struct RasterOptions {
    pub width: u16,
    pub height: u16,
    pub node_radius: i32,
    /// Fraction of the canvas left empty on each side.
    pub margin: f64,
}

impl Default for RasterOptions {
    fn default() -> Self {
        RasterOptions {
            width: 1000,
            height: 850,
            node_radius: 7,
            margin: 0.05,
        }
    }
}

/// A BGR pixel buffer, bottom row first as TGA stores it.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(width: u16, height: u16, background: Rgb) -> Self {
        let (r, g, b) = background;
        let pixels = [b, g, r].repeat(width as usize * height as usize);
        Canvas {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        let idx = self.offset(x, y)?;
        Some((self.pixels[idx + 2], self.pixels[idx + 1], self.pixels[idx]))
    }

    fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let (w, h) = (self.width as i32, self.height as i32);
        if x < 0 || x >= w || y < 0 || y >= h {
            return None;
        }
        Some((y as usize * w as usize + x as usize) * 3)
    }

    fn put(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(idx) = self.offset(x, y) {
            let (r, g, b) = color;
            self.pixels[idx] = b;
            self.pixels[idx + 1] = g;
            self.pixels[idx + 2] = r;
        }
    }

    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.put(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb) {
        let rr = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= rr {
                    self.put(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Writes the canvas as an uncompressed 24-bit TGA.
    pub fn write_tga<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut header = [0u8; 18];
        header[2] = 2; // uncompressed truecolor
        header[12..14].copy_from_slice(&self.width.to_le_bytes());
        header[14..16].copy_from_slice(&self.height.to_le_bytes());
        header[16] = 24;

        let mut w = BufWriter::new(File::create(path)?);
        w.write_all(&header)?;
        w.write_all(&self.pixels)?;
        w.flush()?;
        Ok(())
    }
}

/// Samples the RdBu scale at `t` in `[0, 1]`.
pub fn rdbu(t: f32) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let upper = RDBU
        .iter()
        .position(|&(stop, _)| stop >= t)
        .unwrap_or(RDBU.len() - 1)
        .max(1);
    let (t0, c0) = RDBU[upper - 1];
    let (t1, c1) = RDBU[upper];
    let local = (t - t0) / (t1 - t0);

    let mixed = linear(c0).mix(&linear(c1), local);
    let out: Srgb<u8> = Srgb::<f32>::from_linear(mixed).into_format();
    (out.red, out.green, out.blue)
}

fn linear((r, g, b): Rgb) -> LinSrgb {
    Srgb::new(r, g, b).into_format::<f32>().into_linear()
}

/// Colour for a node of `degree` given the degree range of the graph.
pub fn degree_color(degree: usize, min: usize, max: usize) -> Rgb {
    let t = if max > min {
        (degree.saturating_sub(min)) as f32 / (max - min) as f32
    } else {
        0.0
    };
    // reversed scale
    rdbu(1.0 - t)
}

/// Draws `graph` at `layout` onto a fresh canvas.
pub fn rasterize(graph: &Graph, layout: &Layout, options: &RasterOptions) -> Canvas {
    let mut canvas = Canvas::new(options.width, options.height, BACKGROUND);
    let span = 1.0 - 2.0 * options.margin;
    let to_pixel = |v: f64, size: u16| -> i32 {
        let unit = (v + 1.0) / 2.0;
        ((options.margin + unit * span) * (size as f64 - 1.0)).round() as i32
    };
    let project = |idx: usize| {
        let p = layout.position(idx);
        (to_pixel(p.x, options.width), to_pixel(p.y, options.height))
    };

    for &(a, b) in graph.edges() {
        let ((x0, y0), (x1, y1)) = (project(a), project(b));
        canvas.draw_line(x0, y0, x1, y1, EDGE_COLOR);
    }

    let degrees = graph.degrees();
    let min = degrees.iter().copied().min().unwrap_or(0);
    let max = degrees.iter().copied().max().unwrap_or(0);
    for (idx, &degree) in degrees.iter().enumerate() {
        let (cx, cy) = project(idx);
        canvas.fill_circle(cx, cy, options.node_radius, degree_color(degree, min, max));
    }

    canvas
}

/// Rasterises the network and writes it to `path` as TGA.
pub fn render_tga<P: AsRef<Path>>(
    graph: &Graph,
    layout: &Layout,
    options: &RasterOptions,
    path: P,
) -> Result<()> {
    let canvas = rasterize(graph, layout, options);
    canvas.write_tga(&path)?;
    info!(
        "Wrote {}x{} preview with {} nodes to {}",
        canvas.width(),
        canvas.height(),
        graph.node_count(),
        path.as_ref().display()
    );
    Ok(())
}

/// Prints a TGA written by [`render_tga`] to stdout in ANSI truecolor.
pub fn display_in_terminal(path: &Path, image_size: (u32, u32), term_size: (u32, u32)) -> Result<()> {
    // termimage guesses the format from the extension
    let path_info = (String::new(), path.to_path_buf());
    let format = ops::guess_format(&path_info)
        .map_err(|e| DiscographError::Render(format!("termimage guess_format error: {:?}", e)))?;
    let img = ops::load_image(&path_info, format)
        .map_err(|e| DiscographError::Render(format!("termimage load_image error: {:?}", e)))?;

    let resized_size = ops::image_resized_size(image_size, term_size, true);
    let resized = ops::resize_image(&img, resized_size);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    ops::write_ansi_truecolor(&mut out, &resized);
    out.flush()?;
    Ok(())
}
