use super::*;

#[test]
fn grid_size_rejects_degenerate_axes() {
    assert!(GridSize::new(1, 10).is_err());
    assert!(GridSize::new(10, 0).is_err());
    let ok = GridSize::new(3, 4).unwrap();
    assert_eq!(ok.len(), 12);
}

#[test]
fn geo_bounds_rejects_point_and_line() {
    assert!(GeoBounds::new(1.0, 1.0, 1.0, 1.0).is_err());
    assert!(GeoBounds::new(0.0, 1.0, 2.0, 1.0).is_err());
    assert!(GeoBounds::new(0.0, 0.0, f64::NAN, 1.0).is_err());
}

#[test]
fn geo_bounds_from_points_encloses_all() {
    let b = GeoBounds::from_points(vec![
        Point::new(85.31, 19.65),
        Point::new(85.35, 19.69),
        Point::new(85.33, 19.67),
    ])
    .unwrap();
    assert_eq!(b.min_lon, 85.31);
    assert_eq!(b.max_lat, 19.69);
}

#[test]
fn geo_bounds_inflate_grows_every_side() {
    let b = GeoBounds::new(0.0, 0.0, 10.0, 20.0).unwrap();
    let inflated = b.inflate(0.1);
    assert!((inflated.min_lon - -1.0).abs() < 1e-12);
    assert!((inflated.max_lon - 11.0).abs() < 1e-12);
    assert!((inflated.min_lat - -2.0).abs() < 1e-12);
    assert!((inflated.max_lat - 22.0).abs() < 1e-12);
}

#[test]
fn geo_bounds_contains_edges() {
    let b = GeoBounds::new(0.0, 0.0, 1.0, 1.0).unwrap();
    assert!(b.contains(Point::new(0.0, 0.0)));
    assert!(b.contains(Point::new(1.0, 1.0)));
    assert!(!b.contains(Point::new(1.0001, 0.5)));
}

#[test]
fn rgba8_from_rgb_keeps_channels() {
    let px = Rgba8::from_rgb([10, 20, 30], 128);
    assert_eq!(px, Rgba8 { r: 10, g: 20, b: 30, a: 128 });
    assert_eq!(Rgba8::transparent().a, 0);
}
