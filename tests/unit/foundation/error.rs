use super::*;

#[test]
fn display_messages_are_stable() {
    assert!(
        HydroError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        HydroError::malformed_sample("x")
            .to_string()
            .contains("malformed sample:")
    );
    assert!(
        HydroError::invalid_boundary("x")
            .to_string()
            .contains("invalid boundary:")
    );
    assert!(
        HydroError::InsufficientStations
            .to_string()
            .contains("no usable station samples")
    );
    assert!(
        (HydroError::MissingStations { step: 3 })
            .to_string()
            .contains("step 3")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = HydroError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
