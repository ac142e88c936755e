use super::*;

use crate::foundation::core::{GridSize, Point};
use crate::geometry::grid::GridSpec;

fn sample(lat: f64, lon: f64, ts: &str, value: f64) -> StationSample {
    StationSample {
        latitude: lat,
        longitude: lon,
        parameter: "pH".to_string(),
        timestamp: ts.to_string(),
        value,
    }
}

fn samples() -> Vec<StationSample> {
    vec![
        sample(19.65, 85.31, "Jan-24", 2.0),
        sample(19.69, 85.35, "Jan-24", 8.0),
        sample(19.65, 85.31, "Feb-24", 4.0),
        sample(19.69, 85.35, "Feb-24", 6.0),
    ]
}

fn config() -> RenderConfig {
    RenderConfig {
        bandwidth: 0.0,
        grid: GridSpec {
            size: GridSize { rows: 6, cols: 6 },
            margin: 0.0,
        },
        ..RenderConfig::default()
    }
}

#[test]
fn state_progresses_through_the_lifecycle() {
    let mut session = RenderSession::new();
    assert_eq!(session.state(), SessionState::Empty);

    session.load_samples(samples());
    assert_eq!(session.state(), SessionState::SamplesLoaded);

    session
        .compute_fields("pH", &config(), &PipelineOpts::default())
        .unwrap();
    assert_eq!(session.state(), SessionState::FieldsComputed);

    session.render_frames("pH").unwrap();
    assert_eq!(session.state(), SessionState::FramesRendered);

    session
        .request_animation(
            "pH",
            &AnimationConfig {
                start: "Jan-24".to_string(),
                end: "Feb-24".to_string(),
                intermediate: 1,
            },
        )
        .unwrap();
    session.await_animation().unwrap();
    assert_eq!(session.state(), SessionState::AnimationReady);
}

#[test]
fn render_frames_requires_compute_fields_first() {
    let mut session = RenderSession::new();
    session.load_samples(samples());
    let err = session.render_frames("pH").unwrap_err();
    assert!(matches!(err, HydroError::Validation(_)));
}

#[test]
fn animation_requires_a_computed_batch() {
    let mut session = RenderSession::new();
    session.load_samples(samples());
    let err = session
        .request_animation(
            "pH",
            &AnimationConfig {
                start: "Jan-24".to_string(),
                end: "Feb-24".to_string(),
                intermediate: 1,
            },
        )
        .unwrap_err();
    assert!(matches!(err, HydroError::Validation(_)));
}

#[test]
fn mutation_resets_state_and_drops_caches() {
    let mut session = RenderSession::new();
    session.load_samples(samples());
    session
        .compute_fields("pH", &config(), &PipelineOpts::default())
        .unwrap();
    session.render_frames("pH").unwrap();
    assert!(session.frames("pH").is_some());

    let key = SampleKey::new(19.65, 85.31, "pH", "Jan-24");
    assert!(session.delete_sample(&key).is_some());
    assert_eq!(session.state(), SessionState::SamplesLoaded);
    assert!(session.frames("pH").is_none());
}

#[test]
fn deleting_a_missing_key_changes_nothing() {
    let mut session = RenderSession::new();
    session.load_samples(samples());
    session
        .compute_fields("pH", &config(), &PipelineOpts::default())
        .unwrap();
    let key = SampleKey::new(0.0, 0.0, "pH", "nope");
    assert!(session.delete_sample(&key).is_none());
    assert_eq!(session.state(), SessionState::FieldsComputed);
}

#[test]
fn boundary_is_immutable_for_the_session() {
    let square = vec![
        Point::new(85.30, 19.64),
        Point::new(85.36, 19.64),
        Point::new(85.36, 19.70),
        Point::new(85.30, 19.70),
        Point::new(85.30, 19.64),
    ];
    let mut session = RenderSession::new();
    session
        .set_boundary(BoundaryPolygon::new(vec![square.clone()]).unwrap())
        .unwrap();
    let err = session
        .set_boundary(BoundaryPolygon::new(vec![square]).unwrap())
        .unwrap_err();
    assert!(matches!(err, HydroError::Validation(_)));
}

#[test]
fn mutation_cancels_in_flight_animation() {
    let mut session = RenderSession::new();
    session.load_samples(samples());
    session
        .compute_fields("pH", &config(), &PipelineOpts::default())
        .unwrap();
    session
        .request_animation(
            "pH",
            &AnimationConfig {
                start: "Jan-24".to_string(),
                end: "Feb-24".to_string(),
                intermediate: 4,
            },
        )
        .unwrap();

    // Mutating while the job is in flight bumps the epoch; whatever the worker
    // produces is stale and must never surface.
    session.load_samples(vec![sample(19.67, 85.33, "Mar-24", 5.0)]);
    for _ in 0..50 {
        assert!(session.poll_animation().unwrap().is_none());
        std::thread::sleep(std::time::Duration::from_millis(2));
    }
}

#[test]
fn empty_session_cannot_compute() {
    let mut session = RenderSession::new();
    let err = session
        .compute_fields("pH", &config(), &PipelineOpts::default())
        .unwrap_err();
    assert!(matches!(err, HydroError::InsufficientStations));
}
