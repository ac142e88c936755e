use super::*;

use crate::foundation::core::GridSize;

fn field_of(values: Vec<f64>, cols: u32) -> ScalarField {
    let rows = (values.len() as u32) / cols;
    ScalarField::new(GridSize { rows, cols }, values).unwrap()
}

#[test]
fn bounds_map_to_zero_and_one() {
    let f = field_of(vec![2.0, 5.0, 8.0, 3.0], 2);
    let range = GlobalRange::from_fields([&f]).unwrap();
    assert_eq!(range.min, 2.0);
    assert_eq!(range.max, 8.0);
    assert!((range.normalize(2.0) - 0.0).abs() < 1e-12);
    assert!((range.normalize(8.0) - 1.0).abs() < 1e-12);
    let mid = range.normalize(5.0);
    assert!(mid > 0.0 && mid < 1.0);
    assert!((mid - 0.5).abs() < 1e-12);
}

#[test]
fn values_outside_range_clamp() {
    let range = GlobalRange::new(0.0, 10.0).unwrap();
    assert_eq!(range.normalize(-5.0), 0.0);
    assert_eq!(range.normalize(15.0), 1.0);
}

#[test]
fn range_spans_multiple_fields() {
    let a = field_of(vec![3.0, 4.0, 5.0, 6.0], 2);
    let b = field_of(vec![1.0, 9.0, 2.0, 2.0], 2);
    let range = GlobalRange::from_fields([&a, &b]).unwrap();
    assert_eq!(range.min, 1.0);
    assert_eq!(range.max, 9.0);
}

#[test]
fn degenerate_range_maps_to_mid_scale() {
    let f = field_of(vec![4.2; 4], 2);
    let range = GlobalRange::from_fields([&f]).unwrap();
    assert!(range.is_degenerate());
    assert_eq!(range.normalize(4.2), 0.5);
    assert_eq!(range.normalize(123.0), 0.5);
    assert!(matches!(
        range.degenerate_error(),
        crate::HydroError::DegenerateRange { .. }
    ));
}

#[test]
fn inverted_or_non_finite_bounds_are_rejected() {
    assert!(GlobalRange::new(5.0, 2.0).is_err());
    assert!(GlobalRange::new(f64::NAN, 2.0).is_err());
    assert!(GlobalRange::from_fields(std::iter::empty::<&ScalarField>()).is_err());
}
