use super::*;

use crate::field::ScalarField;
use crate::field::normalize::GlobalRange;
use crate::foundation::core::GridSize;

#[test]
fn lut_index_is_monotonic_and_clamped() {
    assert_eq!(lut_index(-1.0), 0);
    assert_eq!(lut_index(0.0), 0);
    assert_eq!(lut_index(0.5), 128);
    assert_eq!(lut_index(1.0), 255);
    assert_eq!(lut_index(2.0), 255);
    let mut last = 0;
    for i in 0..=100 {
        let idx = lut_index(f64::from(i) / 100.0);
        assert!(idx >= last);
        last = idx;
    }
}

#[test]
fn equal_values_map_to_identical_colors() {
    for kind in [ColormapKind::Turbo, ColormapKind::Viridis] {
        let cmap = kind.colormap();
        assert_eq!(cmap.sample(0.37), cmap.sample(0.37));
    }
}

#[test]
fn turbo_runs_blue_to_red() {
    let t = Turbo.table();
    let low = t[lut_index(0.1)];
    let high = t[lut_index(0.9)];
    assert!(low[2] > low[0], "low end should be blue-dominant: {low:?}");
    assert!(high[0] > high[2], "high end should be red-dominant: {high:?}");
}

#[test]
fn viridis_anchors_at_endpoints() {
    let t = Viridis.table();
    assert_eq!(t[0], [68, 1, 84]);
    assert_eq!(t[255], [253, 231, 37]);
}

#[test]
fn by_name_resolves_known_maps() {
    assert_eq!(by_name("turbo").unwrap(), ColormapKind::Turbo);
    assert_eq!(by_name("VIRIDIS").unwrap(), ColormapKind::Viridis);
    assert!(by_name("jet").is_err());
}

#[test]
fn opacity_touches_only_the_alpha_channel() {
    let field = ScalarField::new(
        GridSize { rows: 2, cols: 2 },
        vec![0.0, 1.0, 2.0, 3.0],
    )
    .unwrap();
    let range = GlobalRange::new(0.0, 3.0).unwrap();
    let cmap = ColormapKind::Turbo.colormap();

    let opaque = colorize(&field, &range, cmap, 1.0).unwrap();
    let faded = colorize(&field, &range, cmap, 0.5).unwrap();

    for (a, b) in opaque.data.chunks_exact(4).zip(faded.data.chunks_exact(4)) {
        assert_eq!(a[..3], b[..3]);
        assert_eq!(a[3], 255);
        assert_eq!(b[3], 128);
    }
}

#[test]
fn out_of_range_opacity_is_rejected() {
    let field = ScalarField::constant(GridSize { rows: 2, cols: 2 }, 1.0);
    let range = GlobalRange::new(0.0, 2.0).unwrap();
    let cmap = ColormapKind::Turbo.colormap();
    assert!(colorize(&field, &range, cmap, 1.5).is_err());
    assert!(colorize(&field, &range, cmap, -0.1).is_err());
    assert!(colorize(&field, &range, cmap, f64::NAN).is_err());
}

#[test]
fn colorize_is_deterministic() {
    let field = ScalarField::new(
        GridSize { rows: 2, cols: 3 },
        vec![0.1, 0.9, 0.4, 0.4, 0.2, 0.7],
    )
    .unwrap();
    let range = GlobalRange::new(0.0, 1.0).unwrap();
    let cmap = ColormapKind::Viridis.colormap();
    let a = colorize(&field, &range, cmap, 0.8).unwrap();
    let b = colorize(&field, &range, cmap, 0.8).unwrap();
    assert_eq!(a.data, b.data);
}
