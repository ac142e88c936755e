use super::*;

use crate::foundation::core::GridSize;
use crate::geometry::boundary::RectExtent;
use crate::geometry::grid::GridSpec;
use crate::render::pipeline::{PipelineOpts, RenderConfig};
use crate::sample::model::StationSample;

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

fn sample(lat: f64, lon: f64, ts: &str, value: f64) -> StationSample {
    StationSample {
        latitude: lat,
        longitude: lon,
        parameter: "pH".to_string(),
        timestamp: ts.to_string(),
        value,
    }
}

fn setup(samples: Vec<StationSample>) -> (SampleStore, RectExtent, FieldBatch) {
    let mut store = SampleStore::new();
    let report = store.ingest(samples);
    assert!(report.skipped.is_empty());
    let region = RectExtent::from_points(store.positions()).unwrap();
    let batch = FieldBatch::compute(&store, "pH", &region, &config(), &PipelineOpts::default())
        .unwrap();
    (store, region, batch)
}

fn shared_samples() -> Vec<StationSample> {
    vec![
        sample(19.65, 85.31, "t0", 2.0),
        sample(19.69, 85.35, "t0", 8.0),
        sample(19.65, 85.31, "t1", 4.0),
        sample(19.69, 85.35, "t1", 6.0),
    ]
}

#[test]
fn sequence_has_k_plus_2_frames_with_measured_endpoints() {
    let (store, region, batch) = setup(shared_samples());
    let seq = render_animation(
        &store,
        &region,
        &batch,
        &AnimationConfig {
            start: "t0".to_string(),
            end: "t1".to_string(),
            intermediate: 3,
        },
    )
    .unwrap();

    assert_eq!(seq.len(), 5);
    assert!(seq.skipped.is_empty());
    assert!(seq.experimental());
    assert_eq!(seq.frames[0].step, 0);
    assert_eq!(seq.frames[4].step, 4);
    assert_eq!(seq.frames[0].frame.provenance, Provenance::Measured);
    assert_eq!(seq.frames[4].frame.provenance, Provenance::Measured);
    for f in &seq.frames[1..4] {
        assert_eq!(f.frame.provenance, Provenance::Synthetic);
    }
}

#[test]
fn endpoints_equal_independently_rendered_frames() {
    let (store, region, batch) = setup(shared_samples());
    let rendered = batch.render(&region).unwrap();
    let seq = render_animation(
        &store,
        &region,
        &batch,
        &AnimationConfig {
            start: "t0".to_string(),
            end: "t1".to_string(),
            intermediate: 2,
        },
    )
    .unwrap();

    assert_eq!(
        seq.frames[0].frame.raster.data,
        rendered.frames["t0"].raster.data
    );
    assert_eq!(
        seq.frames[3].frame.raster.data,
        rendered.frames["t1"].raster.data
    );
}

#[test]
fn synthetic_frames_reuse_the_measured_range() {
    let (store, region, batch) = setup(shared_samples());
    let seq = render_animation(
        &store,
        &region,
        &batch,
        &AnimationConfig {
            start: "t0".to_string(),
            end: "t1".to_string(),
            intermediate: 2,
        },
    )
    .unwrap();
    assert_eq!(&seq.range, batch.range());
    for f in &seq.frames {
        assert_eq!(&f.frame.range, batch.range());
    }
}

#[test]
fn disjoint_stations_skip_steps_but_keep_endpoints() {
    let (store, region, batch) = setup(vec![
        sample(19.65, 85.31, "t0", 2.0),
        sample(19.69, 85.35, "t1", 8.0),
    ]);
    let seq = render_animation(
        &store,
        &region,
        &batch,
        &AnimationConfig {
            start: "t0".to_string(),
            end: "t1".to_string(),
            intermediate: 2,
        },
    )
    .unwrap();

    assert_eq!(seq.len(), 2);
    assert_eq!(seq.skipped.len(), 2);
    for (i, skip) in seq.skipped.iter().enumerate() {
        assert_eq!(skip.step, i + 1);
        assert!(matches!(skip.error, HydroError::MissingStations { .. }));
    }
}

#[test]
fn identical_endpoints_are_rejected() {
    let (store, region, batch) = setup(shared_samples());
    let err = render_animation(
        &store,
        &region,
        &batch,
        &AnimationConfig {
            start: "t0".to_string(),
            end: "t0".to_string(),
            intermediate: 1,
        },
    )
    .unwrap_err();
    assert!(matches!(err, HydroError::Validation(_)));
}

#[test]
fn cancellation_aborts_between_steps() {
    let (store, region, batch) = setup(shared_samples());
    let cancel = AtomicBool::new(true);
    let err = render_animation_with_cancel(
        &store,
        &region,
        &batch,
        &AnimationConfig {
            start: "t0".to_string(),
            end: "t1".to_string(),
            intermediate: 2,
        },
        &cancel,
    )
    .unwrap_err();
    assert!(matches!(err, HydroError::Cancelled));
}

#[test]
fn streaming_preserves_step_order() {
    let (store, region, batch) = setup(shared_samples());
    let seq = render_animation(
        &store,
        &region,
        &batch,
        &AnimationConfig {
            start: "t0".to_string(),
            end: "t1".to_string(),
            intermediate: 2,
        },
    )
    .unwrap();

    let mut sink = crate::encode::sink::InMemorySink::new();
    seq.stream_into(&mut sink).unwrap();
    let steps: Vec<usize> = sink.frames().iter().map(|(s, _)| *s).collect();
    assert_eq!(steps, vec![0, 1, 2, 3]);
    assert_eq!(sink.config().unwrap().width, 6);
}
