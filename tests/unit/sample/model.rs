use super::*;

#[test]
fn valid_sample_passes() {
    let s = StationSample::new(19.65, 85.31, "pH", "Jan-24", 7.2).unwrap();
    assert_eq!(s.position(), Point::new(85.31, 19.65));
}

#[test]
fn out_of_range_coordinates_are_malformed() {
    assert!(StationSample::new(91.0, 0.0, "pH", "t", 1.0).is_err());
    assert!(StationSample::new(0.0, -181.0, "pH", "t", 1.0).is_err());
    assert!(StationSample::new(f64::NAN, 0.0, "pH", "t", 1.0).is_err());
}

#[test]
fn non_finite_value_is_malformed() {
    let err = StationSample::new(0.0, 0.0, "pH", "t", f64::INFINITY).unwrap_err();
    assert!(matches!(err, HydroError::MalformedSample(_)));
}

#[test]
fn empty_labels_are_malformed() {
    assert!(StationSample::new(0.0, 0.0, "", "t", 1.0).is_err());
    assert!(StationSample::new(0.0, 0.0, "pH", "  ", 1.0).is_err());
}

#[test]
fn key_identity_is_bit_exact() {
    let a = SampleKey::new(19.65, 85.31, "pH", "Jan-24");
    let b = SampleKey::new(19.65, 85.31, "pH", "Jan-24");
    assert_eq!(a, b);

    let nudged = f64::from_bits(19.65_f64.to_bits() + 1);
    let c = SampleKey::new(nudged, 85.31, "pH", "Jan-24");
    assert_ne!(a, c);
    assert!((c.latitude() - 19.65).abs() < 1e-12);
}

#[test]
fn key_orders_by_parameter_then_timestamp() {
    let a = SampleKey::new(0.0, 0.0, "a", "z");
    let b = SampleKey::new(0.0, 0.0, "b", "a");
    assert!(a < b);
    let c = SampleKey::new(0.0, 0.0, "a", "a");
    assert!(c < a);
}

#[test]
fn sample_round_trips_through_json() {
    let s = StationSample::new(19.65, 85.31, "pH", "Jan-24", 7.2).unwrap();
    let json = serde_json::to_string(&s).unwrap();
    let back: StationSample = serde_json::from_str(&json).unwrap();
    assert_eq!(s, back);
}
