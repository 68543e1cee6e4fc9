use discograph::dataset::Row;
use discograph::graph::{Graph, NodeIdentity};
use discograph::layout::Layout;
use discograph::raster::{
    degree_color, rasterize, rdbu, render_tga, Canvas, RasterOptions, BACKGROUND, EDGE_COLOR,
};
use nalgebra::Point2;
use std::fs;
use tempfile::tempdir;

fn close(a: (u8, u8, u8), b: (u8, u8, u8)) -> bool {
    let d = |x: u8, y: u8| (x as i16 - y as i16).abs();
    d(a.0, b.0) <= 1 && d(a.1, b.1) <= 1 && d(a.2, b.2) <= 1
}

fn two_node_network() -> (Graph, Layout) {
    let graph = Graph::from_rows(&[Row::new("LP: Conversations", "Eric Dolphy")], NodeIdentity::Merged);
    let layout = Layout::from_positions(vec![Point2::new(-1.0, 0.0), Point2::new(1.0, 0.0)]);
    (graph, layout)
}

#[test]
fn test_rdbu_endpoints() {
    assert!(close(rdbu(0.0), (5, 10, 172)));
    assert!(close(rdbu(1.0), (178, 10, 28)));
    assert!(close(rdbu(0.5), (190, 190, 190)));
    // out of range is clamped
    assert!(close(rdbu(-3.0), rdbu(0.0)));
    assert!(close(rdbu(f32::NAN), rdbu(0.0)));
}

#[test]
fn test_degree_color_is_reversed_scale() {
    // highest degree lands on the blue end, lowest on the red end
    assert!(close(degree_color(5, 1, 5), (5, 10, 172)));
    assert!(close(degree_color(1, 1, 5), (178, 10, 28)));
    // flat degree range doesn't divide by zero
    assert!(close(degree_color(3, 3, 3), (178, 10, 28)));
}

#[test]
fn test_line_and_circle_drawing() {
    let mut canvas = Canvas::new(20, 10, BACKGROUND);
    canvas.draw_line(0, 0, 19, 9, EDGE_COLOR);
    assert_eq!(canvas.pixel(0, 0), Some(EDGE_COLOR));
    assert_eq!(canvas.pixel(19, 9), Some(EDGE_COLOR));
    assert_eq!(canvas.pixel(19, 0), Some(BACKGROUND));

    canvas.fill_circle(10, 5, 2, (255, 0, 0));
    assert_eq!(canvas.pixel(10, 5), Some((255, 0, 0)));
    assert_eq!(canvas.pixel(12, 5), Some((255, 0, 0)));
    assert_eq!(canvas.pixel(12, 7), Some(BACKGROUND));

    // clipped at the border
    canvas.fill_circle(0, 0, 3, (0, 255, 0));
    assert_eq!(canvas.pixel(-1, 0), None);
}

#[test]
fn test_rasterize_places_nodes_inside_margin() {
    let (graph, layout) = two_node_network();
    let options = RasterOptions {
        width: 101,
        height: 51,
        node_radius: 2,
        margin: 0.1,
    };
    let canvas = rasterize(&graph, &layout, &options);

    // x = -1 -> 0.1 * 100 = 10, x = 1 -> 0.9 * 100 = 90, y = 0 -> 0.5 * 50 = 25
    let left = canvas.pixel(10, 25).unwrap();
    let right = canvas.pixel(90, 25).unwrap();
    assert_ne!(left, BACKGROUND);
    assert_ne!(right, BACKGROUND);
    assert_eq!(canvas.pixel(50, 25), Some(EDGE_COLOR));
    assert_eq!(canvas.pixel(2, 2), Some(BACKGROUND));
}

#[test]
fn test_render_tga_writes_header_and_pixels() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("network.tga");
    let (graph, layout) = two_node_network();
    let options = RasterOptions {
        width: 64,
        height: 32,
        ..RasterOptions::default()
    };
    render_tga(&graph, &layout, &options, &path)?;

    let bytes = fs::read(&path)?;
    assert_eq!(bytes.len(), 18 + 64 * 32 * 3);
    assert_eq!(bytes[2], 2);
    assert_eq!(u16::from_le_bytes([bytes[12], bytes[13]]), 64);
    assert_eq!(u16::from_le_bytes([bytes[14], bytes[15]]), 32);
    assert_eq!(bytes[16], 24);
    Ok(())
}

#[test]
fn test_empty_graph_rasterizes_to_background() {
    let graph = Graph::new(NodeIdentity::Merged);
    let canvas = rasterize(&graph, &Layout::default(), &RasterOptions::default());
    let (r, g, b) = BACKGROUND;
    assert!(canvas.pixels().chunks(3).all(|px| px == [b, g, r]));
}
