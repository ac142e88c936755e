use super::*;

use crate::foundation::core::GridSize;

fn bounds() -> GeoBounds {
    GeoBounds::new(85.31, 19.65, 85.35, 19.69).unwrap()
}

fn spec(rows: u32, cols: u32, margin: f64) -> GridSpec {
    GridSpec {
        size: GridSize { rows, cols },
        margin,
    }
}

#[test]
fn same_inputs_yield_same_grid() {
    let a = RasterGrid::from_bounds(bounds(), &spec(5, 7, 0.02)).unwrap();
    let b = RasterGrid::from_bounds(bounds(), &spec(5, 7, 0.02)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn corners_span_the_extent_with_zero_margin() {
    let g = RasterGrid::from_bounds(bounds(), &spec(3, 3, 0.0)).unwrap();
    let nw = g.cell_center(0, 0);
    let se = g.cell_center(2, 2);
    assert!((nw.x - 85.31).abs() < 1e-12);
    assert!((nw.y - 19.69).abs() < 1e-12);
    assert!((se.x - 85.35).abs() < 1e-12);
    assert!((se.y - 19.65).abs() < 1e-12);
}

#[test]
fn margin_inflates_extent() {
    let g = RasterGrid::from_bounds(bounds(), &spec(3, 3, 0.5)).unwrap();
    let b = g.bounds();
    assert!(b.min_lon < 85.31);
    assert!(b.max_lat > 19.69);
}

#[test]
fn cell_spacing_is_even() {
    let g = RasterGrid::from_bounds(bounds(), &spec(5, 5, 0.0)).unwrap();
    let step_01 = g.cell_center(0, 1).x - g.cell_center(0, 0).x;
    let step_34 = g.cell_center(0, 4).x - g.cell_center(0, 3).x;
    assert!((step_01 - step_34).abs() < 1e-12);
}

#[test]
fn centers_iterate_row_major() {
    let g = RasterGrid::from_bounds(bounds(), &spec(2, 3, 0.0)).unwrap();
    let centers: Vec<_> = g.centers().collect();
    assert_eq!(centers.len(), 6);
    assert_eq!(centers[0], g.cell_center(0, 0));
    assert_eq!(centers[5], g.cell_center(1, 2));
}

#[test]
fn negative_margin_is_rejected() {
    assert!(RasterGrid::from_bounds(bounds(), &spec(3, 3, -0.1)).is_err());
}

#[test]
fn from_region_uses_region_bounds() {
    let rect = crate::geometry::boundary::RectExtent::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
    ])
    .unwrap();
    let g = RasterGrid::from_region(&rect, &spec(3, 3, 0.0)).unwrap();
    assert_eq!(g.bounds().min_lon, 0.0);
    assert_eq!(g.bounds().max_lon, 1.0);
}
