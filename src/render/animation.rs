//! Animation sequences from temporally interpolated station values.
//!
//! This path is experimental. Interior frames are linear per-station synthesis with no
//! physical validation; the sequence reports itself as such and its frames carry
//! [`Provenance::Synthetic`]. Treat the output as visualization, not measurement.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::encode::sink::{FrameSink, SinkConfig};
use crate::field::normalize::GlobalRange;
use crate::field::temporal::synthesize_steps;
use crate::foundation::error::{HydroError, HydroResult};
use crate::geometry::boundary::Region;
use crate::render::frame::{Frame, Provenance};
use crate::render::legend::render_legend;
use crate::render::mask::CellMask;
use crate::render::pipeline::{FieldBatch, compute_field, render_field};
use crate::sample::store::SampleStore;

/// Animation request: two measured endpoint timestamps and an intermediate frame count.
///
/// `start` precedes `end` by the caller's declared ordering; the labels themselves are
/// opaque.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationConfig {
    /// First measured timestamp.
    pub start: String,
    /// Last measured timestamp.
    pub end: String,
    /// Number of synthetic frames between the endpoints.
    pub intermediate: u32,
}

impl AnimationConfig {
    /// Validate endpoint labels.
    pub fn validate(&self) -> HydroResult<()> {
        if self.start == self.end {
            return Err(HydroError::validation(
                "animation endpoints must be distinct timestamps",
            ));
        }
        Ok(())
    }
}

/// One frame of an animation sequence.
#[derive(Clone, Debug)]
pub struct AnimationFrame {
    /// Position in the sequence; 0 and `intermediate + 1` are the measured endpoints.
    pub step: usize,
    /// The rendered frame.
    pub frame: Frame,
}

/// A synthetic step that failed and was skipped.
#[derive(Debug)]
pub struct StepError {
    /// Step index in the sequence.
    pub step: usize,
    /// Why the step could not synthesize.
    pub error: HydroError,
}

/// Ordered animation output.
///
/// The first and last frames equal the independently rendered frames for the two real
/// timestamps; everything in between is synthetic. Failed steps are skipped and
/// reported in [`AnimationSequence::skipped`] without aborting the remaining steps.
#[derive(Debug)]
pub struct AnimationSequence {
    /// Parameter the sequence renders.
    pub parameter: String,
    /// Start timestamp label.
    pub start: String,
    /// End timestamp label.
    pub end: String,
    /// Frames in step order.
    pub frames: Vec<AnimationFrame>,
    /// Steps that failed to synthesize.
    pub skipped: Vec<StepError>,
    /// The measured-data range every frame was colorized with.
    pub range: GlobalRange,
}

impl AnimationSequence {
    /// Always `true`: temporal synthesis is scientifically unvalidated output.
    pub fn experimental(&self) -> bool {
        true
    }

    /// Number of frames actually rendered.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when no frames rendered.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Push every frame into a sink in strictly increasing step order.
    pub fn stream_into(&self, sink: &mut dyn FrameSink) -> HydroResult<()> {
        let (width, height) = match self.frames.first() {
            Some(f) => (f.frame.raster.width, f.frame.raster.height),
            None => (0, 0),
        };
        sink.begin(SinkConfig { width, height })?;
        for f in &self.frames {
            sink.push_frame(f.step, &f.frame)?;
        }
        sink.end()
    }
}

/// Render an animation between two measured timestamps of an existing field batch.
///
/// Endpoint frames come from the batch's real fields; interior frames run the full
/// interpolate/smooth/colorize/mask chain per synthetic step, always against the
/// batch's [`GlobalRange`]. The range is never recomputed from synthetic values, so
/// the color scale cannot drift with the interpolation.
pub fn render_animation(
    store: &SampleStore,
    region: &dyn Region,
    batch: &FieldBatch,
    config: &AnimationConfig,
) -> HydroResult<AnimationSequence> {
    let cancel = AtomicBool::new(false);
    render_animation_with_cancel(store, region, batch, config, &cancel)
}

/// [`render_animation`] with a cooperative cancellation flag, checked between steps.
#[tracing::instrument(skip_all, fields(parameter = %batch.parameter(), start = %config.start, end = %config.end, intermediate = config.intermediate))]
pub fn render_animation_with_cancel(
    store: &SampleStore,
    region: &dyn Region,
    batch: &FieldBatch,
    config: &AnimationConfig,
    cancel: &AtomicBool,
) -> HydroResult<AnimationSequence> {
    config.validate()?;
    let parameter = batch.parameter();
    let start_field = batch.field(&config.start).ok_or_else(|| {
        HydroError::validation(format!("start timestamp '{}' has no computed field", config.start))
    })?;
    let end_field = batch.field(&config.end).ok_or_else(|| {
        HydroError::validation(format!("end timestamp '{}' has no computed field", config.end))
    })?;

    let mask = CellMask::build(batch.grid(), region)?;
    let cmap = batch.config().colormap.colormap();
    let legend = render_legend(cmap, batch.range(), &batch.config().legend)?;
    let opacity = batch.config().opacity;

    let mut frames = Vec::with_capacity(config.intermediate as usize + 2);
    frames.push(AnimationFrame {
        step: 0,
        frame: render_field(
            &config.start,
            start_field,
            batch.range(),
            cmap,
            opacity,
            &mask,
            &legend,
            Provenance::Measured,
        )?,
    });

    let start_stations = store.stations(parameter, &config.start);
    let end_stations = store.stations(parameter, &config.end);
    let mut skipped = Vec::new();

    let outcomes = synthesize_steps(&start_stations, &end_stations, config.intermediate);
    for (i, outcome) in outcomes.into_iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            return Err(HydroError::Cancelled);
        }
        let step = i + 1;
        match outcome.and_then(|synth| {
            let field = compute_field(
                batch.grid(),
                &synth.stations,
                &batch.config().idw,
                batch.config().bandwidth,
            )?;
            let label = format!("{}..{}:{}", config.start, config.end, synth.step);
            render_field(
                &label,
                &field,
                batch.range(),
                cmap,
                opacity,
                &mask,
                &legend,
                Provenance::Synthetic,
            )
        }) {
            Ok(frame) => frames.push(AnimationFrame { step, frame }),
            Err(error) => {
                tracing::debug!(step, %error, "skipping synthetic step");
                skipped.push(StepError { step, error });
            }
        }
    }

    if cancel.load(Ordering::Relaxed) {
        return Err(HydroError::Cancelled);
    }

    frames.push(AnimationFrame {
        step: config.intermediate as usize + 1,
        frame: render_field(
            &config.end,
            end_field,
            batch.range(),
            cmap,
            opacity,
            &mask,
            &legend,
            Provenance::Measured,
        )?,
    });

    Ok(AnimationSequence {
        parameter: parameter.to_string(),
        start: config.start.clone(),
        end: config.end.clone(),
        frames,
        skipped,
        range: *batch.range(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/animation.rs"]
mod tests;
